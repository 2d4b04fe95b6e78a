//! Translation between the legacy and current namespace roots.
//!
//! A namespace belongs to a root when it equals the root or continues it
//! after a `.` separator, so `Contoso.FormsLegacy` is not under `Contoso.Forms`.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamespaceMapper {
    legacy_root: String,
    current_root: String,
}

impl NamespaceMapper {
    pub fn new(legacy_root: impl Into<String>, current_root: impl Into<String>) -> Self {
        Self {
            legacy_root: legacy_root.into(),
            current_root: current_root.into(),
        }
    }

    pub fn legacy_root(&self) -> &str {
        &self.legacy_root
    }

    pub fn current_root(&self) -> &str {
        &self.current_root
    }

    /// Map a namespace into the current tree, or `None` when it lies outside both roots.
    pub fn to_current(&self, namespace: &str) -> Option<String> {
        translate(namespace, &self.current_root, &self.legacy_root)
    }

    /// Map a namespace into the legacy tree, or `None` when it lies outside both roots.
    pub fn to_legacy(&self, namespace: &str) -> Option<String> {
        translate(namespace, &self.legacy_root, &self.current_root)
    }
}

fn translate(namespace: &str, target: &str, other: &str) -> Option<String> {
    if strip_root(namespace, target).is_some() {
        return Some(namespace.to_string());
    }
    strip_root(namespace, other).map(|rest| format!("{target}{rest}"))
}

/// Returns the remainder after `root` (empty or starting with `.`).
fn strip_root<'a>(namespace: &'a str, root: &str) -> Option<&'a str> {
    let rest = namespace.strip_prefix(root)?;
    (rest.is_empty() || rest.starts_with('.')).then_some(rest)
}

/// Whether either root is a dotted prefix of the other.
pub fn roots_overlap(a: &str, b: &str) -> bool {
    strip_root(a, b).is_some() || strip_root(b, a).is_some()
}
