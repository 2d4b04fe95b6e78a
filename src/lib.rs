// Export modules for library usage
pub mod classify;
pub mod cli;
pub mod config;
pub mod core;
pub mod disambiguate;
pub mod edits;
pub mod errors;
pub mod feed;
pub mod namespace;
pub mod orchestrator;
pub mod signature;
pub mod store;

// Re-export commonly used types
pub use crate::core::{
    Accessibility, Declaration, DeclarationId, DeclarationKind, Edit, Finding, FindingKind,
    Locator, MemberKind, ResolvedPointer, SourceLocation, TypeKind,
};

pub use crate::classify::{classify, Classification, Ineligible, Target, CONSTRUCTOR_NAME};
pub use crate::config::{DocrefConfig, ProjectConfig, RunConfig};
pub use crate::disambiguate::{disambiguate, OverloadIndex};
pub use crate::errors::{Error, Result};
pub use crate::feed::DeclarationSet;
pub use crate::namespace::NamespaceMapper;
pub use crate::orchestrator::{run_projects, Orchestrator, PartitionFailure, RunReport};
pub use crate::signature::{normalize, NormalizedSignature};
pub use crate::store::{ArtifactHandle, DocumentationStore, Resolution, Unresolved};
