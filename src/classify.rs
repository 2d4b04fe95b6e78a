//! Eligibility and identity of declarations.
//!
//! A declaration needs a reference when it is public and has no inline
//! documentation comment. Eligible declarations are tagged with the
//! artifact unit that documents them and, for members, the member name
//! used inside that artifact.

use crate::core::{Declaration, DeclarationKind, FindingKind, MemberKind};
use crate::errors::{Error, Result};
use crate::feed::DeclarationSet;

/// Member name under which artifacts document constructors.
pub const CONSTRUCTOR_NAME: &str = ".ctor";

/// Separator between a containing type and a nested type in unit names.
pub const NESTED_TYPE_SEPARATOR: char = '+';

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Classification {
    Eligible(Target),
    Ineligible(Ineligible),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ineligible {
    HasInlineDoc,
    NotPublic,
}

/// Where an eligible declaration's documentation lives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Target {
    pub namespace: String,
    /// Artifact unit: the type name, `Outer+Inner` for nested types
    pub unit_name: String,
    pub member: Option<MemberTarget>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemberTarget {
    /// Name inside the artifact; constructors use [`CONSTRUCTOR_NAME`]
    pub name: String,
    pub kind: MemberKind,
    pub container_name: String,
}

impl Target {
    pub fn finding_kind(&self) -> FindingKind {
        match self.member {
            Some(_) => FindingKind::MemberLevel,
            None => FindingKind::TypeLevel,
        }
    }
}

/// Nearest enclosing declaration able to own member documentation.
///
/// `None` is an ordinary answer for top-level types; callers that require a
/// container turn it into an error.
pub fn enclosing_container<'a>(
    decl: &'a Declaration,
    declarations: &'a DeclarationSet,
) -> Option<&'a Declaration> {
    declarations
        .ancestors(decl)
        .find(|ancestor| ancestor.kind.container_kind().is_some())
}

/// Fails with [`Error::Structural`] for a member outside any type.
pub fn classify(decl: &Declaration, declarations: &DeclarationSet) -> Result<Classification> {
    let member_kind = match decl.kind {
        DeclarationKind::Member(kind) => Some(kind),
        DeclarationKind::Type(_) => None,
    };

    let container = match member_kind {
        Some(_) => Some(enclosing_container(decl, declarations).ok_or_else(|| {
            Error::Structural {
                member: decl.name.clone(),
                file: decl.source.file.clone(),
            }
        })?),
        None => None,
    };

    if decl.has_inline_doc {
        return Ok(Classification::Ineligible(Ineligible::HasInlineDoc));
    }

    let is_public = match (member_kind, container) {
        (Some(MemberKind::EnumMember), Some(owner)) => owner.accessibility.is_public(),
        _ => decl.accessibility.is_public(),
    };
    if !is_public {
        return Ok(Classification::Ineligible(Ineligible::NotPublic));
    }

    let target = match (member_kind, container) {
        (Some(kind), Some(owner)) => Target {
            namespace: namespace_of(decl, owner),
            unit_name: unit_name(owner, declarations),
            member: Some(MemberTarget {
                name: match kind {
                    MemberKind::Constructor => CONSTRUCTOR_NAME.to_string(),
                    _ => decl.name.clone(),
                },
                kind,
                container_name: owner.name.clone(),
            }),
        },
        _ => Target {
            namespace: decl.namespace.clone(),
            unit_name: unit_name(decl, declarations),
            member: None,
        },
    };
    Ok(Classification::Eligible(target))
}

/// Type name prefixed by its enclosing types, outermost first.
fn unit_name(ty: &Declaration, declarations: &DeclarationSet) -> String {
    let mut parts: Vec<&str> = declarations
        .ancestors(ty)
        .take_while(|ancestor| matches!(ancestor.kind, DeclarationKind::Type(_)))
        .map(|ancestor| ancestor.name.as_str())
        .collect();
    parts.reverse();
    parts.push(&ty.name);
    parts.join(&NESTED_TYPE_SEPARATOR.to_string())
}

fn namespace_of(member: &Declaration, owner: &Declaration) -> String {
    if member.namespace.is_empty() {
        owner.namespace.clone()
    } else {
        member.namespace.clone()
    }
}
