//! Configuration validation with error accumulation.
//!
//! Every problem is collected before reporting so a broken config file can be
//! fixed in one pass.

use super::DocrefConfig;
use crate::errors::{Error, Result};
use crate::namespace::roots_overlap;

/// Collect every validation problem with its field path.
pub fn collect_errors(config: &DocrefConfig) -> Vec<String> {
    let mut errors = Vec::new();

    if config.legacy_docs_root.as_os_str().is_empty() {
        errors.push("legacy_docs_root: must not be empty".to_string());
    }
    if config.artifact_extension.is_empty() {
        errors.push("artifact_extension: must not be empty".to_string());
    } else if config.artifact_extension.starts_with('.') {
        errors.push(format!(
            "artifact_extension: must not start with a dot (got: {})",
            config.artifact_extension
        ));
    }
    if config.projects.is_empty() {
        errors.push("projects: at least one project is required".to_string());
    }

    for (idx, project) in config.projects.iter().enumerate() {
        let field = |name: &str| format!("projects[{idx}].{name}");
        if project.root.as_os_str().is_empty() {
            errors.push(format!("{}: must not be empty", field("root")));
        }
        if project.docs_root.as_os_str().is_empty() {
            errors.push(format!("{}: must not be empty", field("docs_root")));
        }
        if project.legacy_namespace.trim().is_empty() {
            errors.push(format!("{}: must not be empty", field("legacy_namespace")));
        }
        if project.current_namespace.trim().is_empty() {
            errors.push(format!("{}: must not be empty", field("current_namespace")));
        }
        if !project.legacy_namespace.is_empty()
            && !project.current_namespace.is_empty()
            && roots_overlap(&project.legacy_namespace, &project.current_namespace)
        {
            errors.push(format!(
                "{}: namespace roots overlap ({} / {})",
                field("current_namespace"),
                project.legacy_namespace,
                project.current_namespace
            ));
        }
    }

    errors
}

pub fn validate_config(config: &DocrefConfig) -> Result<()> {
    let errors = collect_errors(config);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(Error::Config(errors.join("; ")))
    }
}
