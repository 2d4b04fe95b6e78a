//! Declarations as delivered by the source front end.
//!
//! The front end parses the source tree and hands over a flat list of
//! declarations. Each one names its lexical parent so that members can be
//! attributed to the type whose documentation artifact describes them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Identifier assigned by the front end, unique within one feed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeclarationId(pub u32);

impl fmt::Display for DeclarationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    Class,
    Struct,
    Interface,
    Enum,
    Record,
    Delegate,
}

impl TypeKind {
    /// Whether members declared inside this kind are documented in its artifact.
    pub fn can_contain_members(self) -> bool {
        !matches!(self, Self::Delegate)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberKind {
    Method,
    Property,
    Field,
    EnumMember,
    Constructor,
    Event,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclarationKind {
    Type(TypeKind),
    Member(MemberKind),
}

impl DeclarationKind {
    pub fn is_member(self) -> bool {
        matches!(self, Self::Member(_))
    }

    /// The type kind when this declaration can own member documentation.
    pub fn container_kind(self) -> Option<TypeKind> {
        match self {
            Self::Type(kind) if kind.can_contain_members() => Some(kind),
            _ => None,
        }
    }
}

/// Declared accessibility. Enum members carry no keyword and arrive as `Unspecified`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Accessibility {
    Public,
    Protected,
    Internal,
    Private,
    #[default]
    Unspecified,
}

impl Accessibility {
    pub fn is_public(self) -> bool {
        self == Self::Public
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    /// File path, relative to the project root
    pub file: PathBuf,
    /// Byte offset of the declaration's first token, attributes included
    pub offset: usize,
    /// Whitespace preceding the first token on its line
    #[serde(default)]
    pub indent: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    pub id: DeclarationId,
    #[serde(default)]
    pub parent: Option<DeclarationId>,
    pub kind: DeclarationKind,
    pub name: String,
    #[serde(default)]
    pub namespace: String,
    #[serde(default)]
    pub accessibility: Accessibility,
    #[serde(default)]
    pub has_inline_doc: bool,
    pub source: SourceLocation,
    /// Parameter type names in declaration order
    #[serde(default)]
    pub parameters: Vec<String>,
}

impl Declaration {
    pub fn is_member(&self) -> bool {
        self.kind.is_member()
    }
}
