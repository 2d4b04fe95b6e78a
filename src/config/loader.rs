use std::fs;
use std::path::{Path, PathBuf};

use super::core::{DocrefConfig, CONFIG_FILE_NAME};
use super::validation::validate_config;
use crate::errors::{Error, Result};

const MAX_TRAVERSAL_DEPTH: usize = 10;

/// Pure function to parse and validate config from TOML string
pub fn parse_and_validate_config(contents: &str) -> Result<DocrefConfig> {
    let config = toml::from_str::<DocrefConfig>(contents)
        .map_err(|e| Error::Config(format!("Failed to parse {}: {}", CONFIG_FILE_NAME, e)))?;
    validate_config(&config)?;
    Ok(config)
}

/// Load a config file and anchor its relative paths at the file's directory.
pub fn load_config_from_path(config_path: &Path) -> Result<DocrefConfig> {
    let contents = fs::read_to_string(config_path)
        .map_err(|e| Error::io("Failed to read config file", config_path, e))?;
    let mut config = parse_and_validate_config(&contents)?;

    let base = config_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    config.resolve_paths(&base);

    log::debug!("Loaded config from {}", config_path.display());
    Ok(config)
}

/// Pure function to generate directory ancestors up to a depth limit
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Use `explicit` if given, otherwise search the working directory and its ancestors.
pub fn load_config(explicit: Option<&Path>) -> Result<DocrefConfig> {
    if let Some(path) = explicit {
        return load_config_from_path(path);
    }

    let current = std::env::current_dir()
        .map_err(|e| Error::io("Failed to get current directory", ".", e))?;

    let found = directory_ancestors(current, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find(|path| path.is_file());

    match found {
        Some(path) => load_config_from_path(&path),
        None => {
            log::debug!(
                "No {} found after checking {} directories",
                CONFIG_FILE_NAME,
                MAX_TRAVERSAL_DEPTH
            );
            Err(Error::Config(format!(
                "no {} found; run `docref init` or pass --config",
                CONFIG_FILE_NAME
            )))
        }
    }
}
