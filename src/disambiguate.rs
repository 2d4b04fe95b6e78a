//! Overload selection within a documentation artifact.
//!
//! When several member entries share a name, the declaration's parameter
//! types are matched against each entry's stored signature. Stored
//! document order is authoritative: the first match wins, and candidates
//! are never re-sorted.

use crate::signature::{normalize, parameters_from_signature, NormalizedSignature};
use crate::store::MemberEntry;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverloadIndex {
    /// Zero or one entry with this name
    NotNeeded,
    /// Position among same-named entries, 0-based
    Index(usize),
    /// The declaration's signature has generic parameters
    Unsupported,
    /// Several candidates and none matched
    NoMatch,
}

impl OverloadIndex {
    pub fn index(self) -> Option<usize> {
        match self {
            Self::Index(index) => Some(index),
            _ => None,
        }
    }

    /// Whether the reference will be left for a human to refine.
    pub fn is_ambiguous(self) -> bool {
        matches!(self, Self::Unsupported | Self::NoMatch)
    }
}

pub fn disambiguate<S: AsRef<str>>(
    parameters: &[S],
    entries: &[MemberEntry],
    member_name: &str,
) -> OverloadIndex {
    let candidates: Vec<&MemberEntry> = entries
        .iter()
        .filter(|entry| entry.name == member_name)
        .collect();
    if candidates.len() <= 1 {
        return OverloadIndex::NotNeeded;
    }

    let wanted = match normalize(parameters) {
        NormalizedSignature::Unsupported => return OverloadIndex::Unsupported,
        sig => sig,
    };

    candidates
        .iter()
        .position(|entry| normalize(&parameters_from_signature(&entry.signature)) == wanted)
        .map_or(OverloadIndex::NoMatch, OverloadIndex::Index)
}
