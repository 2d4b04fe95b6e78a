use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::parallel::RunConfig;
use crate::namespace::NamespaceMapper;

pub const CONFIG_FILE_NAME: &str = ".docref.toml";

fn default_extension() -> String {
    "xml".to_string()
}

/// How a namespace becomes a directory under a documentation root.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactLayout {
    /// `Contoso.Forms` becomes `Contoso/Forms/`
    #[default]
    Nested,
    /// `Contoso.Forms` becomes `Contoso.Forms/`
    Flat,
}

/// Root configuration structure for docref
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocrefConfig {
    /// Legacy documentation store shared by every project
    pub legacy_docs_root: PathBuf,

    /// Artifact file extension, without the dot
    #[serde(default = "default_extension")]
    pub artifact_extension: String,

    #[serde(default)]
    pub layout: ArtifactLayout,

    #[serde(default)]
    pub projects: Vec<ProjectConfig>,

    #[serde(default)]
    pub run: RunConfig,
}

/// One source project and the documentation root it references.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProjectConfig {
    #[serde(default)]
    pub name: Option<String>,

    /// Source tree root; declaration file paths are relative to it
    pub root: PathBuf,

    /// Declaration feed written by the source front end
    pub declarations: PathBuf,

    /// Current documentation root for this project
    pub docs_root: PathBuf,

    pub legacy_namespace: String,

    pub current_namespace: String,

    /// Directory the generated `file=` attribute is relative to (default: `root`)
    #[serde(default)]
    pub include_base: Option<PathBuf>,
}

impl ProjectConfig {
    pub fn mapper(&self) -> NamespaceMapper {
        NamespaceMapper::new(&self.legacy_namespace, &self.current_namespace)
    }

    pub fn include_base(&self) -> &Path {
        self.include_base.as_deref().unwrap_or(&self.root)
    }

    pub fn display_name(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| self.root.display().to_string())
    }
}

impl DocrefConfig {
    /// Anchor every relative path at `base` (the config file's directory).
    pub fn resolve_paths(&mut self, base: &Path) {
        let anchor = |path: &mut PathBuf| {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        };
        anchor(&mut self.legacy_docs_root);
        for project in &mut self.projects {
            anchor(&mut project.root);
            anchor(&mut project.declarations);
            anchor(&mut project.docs_root);
            if let Some(include_base) = project.include_base.as_mut() {
                anchor(include_base);
            }
        }
    }
}
