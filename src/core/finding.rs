use super::declaration::Declaration;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Partition key for the batch orchestrator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FindingKind {
    TypeLevel,
    MemberLevel,
}

impl FindingKind {
    pub const ALL: [FindingKind; 2] = [FindingKind::TypeLevel, FindingKind::MemberLevel];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::TypeLevel => "type-level",
            Self::MemberLevel => "member-level",
        }
    }
}

impl fmt::Display for FindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structural query selecting a documentation block inside an artifact.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "scope", rename_all = "snake_case")]
pub enum Locator {
    Type { full_name: String },
    Member { name: String, index: Option<usize> },
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Type { full_name } => write!(f, "Type[@FullName='{full_name}']/Docs"),
            Self::Member { name, index } => {
                write!(f, "//Member[@MemberName='{name}']")?;
                if let Some(index) = index {
                    write!(f, "[{index}]")?;
                }
                f.write_str("/Docs")
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ResolvedPointer {
    /// Artifact path relative to the include base, always `/`-separated
    pub artifact_relative_path: String,
    pub locator: Locator,
}

/// An eligible declaration paired with the documentation it should reference.
#[derive(Clone, Debug)]
pub struct Finding<'a> {
    pub declaration: &'a Declaration,
    pub pointer: ResolvedPointer,
}

/// A single text insertion into one source file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Edit {
    pub file: PathBuf,
    pub offset: usize,
    pub text: String,
}
