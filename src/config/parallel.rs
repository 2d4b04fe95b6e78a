//! Execution settings for a migration run.

use serde::{Deserialize, Serialize};

/// Default value for parallel processing enabled
fn default_enabled() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunConfig {
    /// Analyze declarations on the rayon pool (default: true)
    ///
    /// When disabled, declarations are processed sequentially.
    #[serde(default = "default_enabled")]
    pub parallel: bool,

    /// Worker threads, 0 for one per CPU
    #[serde(default)]
    pub jobs: usize,

    /// Compute edits without touching source files
    #[serde(default)]
    pub dry_run: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            parallel: default_enabled(),
            jobs: 0,
            dry_run: false,
        }
    }
}

impl RunConfig {
    /// Create a config with parallel processing disabled.
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }
}
