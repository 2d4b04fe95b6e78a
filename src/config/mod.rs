// Core configuration types
mod core;
mod loader;
mod parallel;
pub mod validation;

pub use self::core::{ArtifactLayout, DocrefConfig, ProjectConfig, CONFIG_FILE_NAME};
pub use loader::{directory_ancestors, load_config, load_config_from_path, parse_and_validate_config};
pub use parallel::RunConfig;
