pub mod declaration;
pub mod finding;

pub use declaration::{
    Accessibility, Declaration, DeclarationId, DeclarationKind, MemberKind, SourceLocation,
    TypeKind,
};
pub use finding::{Edit, Finding, FindingKind, Locator, ResolvedPointer};
