//! Canonical parameter signatures.
//!
//! Declarations arrive with a list of parameter type names from the source
//! front end, while documentation artifacts store a full C# signature
//! string. Both are reduced to the same `(T1, T2)` form so overloads can be
//! matched by plain string equality.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

/// Dotted identifier chains; the last segment is kept.
static QUALIFIED_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:[A-Za-z_]\w*\.)+([A-Za-z_]\w*)").unwrap());
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Parameter modifiers that do not take part in overload resolution.
const IGNORED_MODIFIERS: &[&str] = &["this", "scoped", "readonly"];

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum NormalizedSignature {
    Canonical(String),
    /// At least one parameter type carries generic arguments
    Unsupported,
}

impl NormalizedSignature {
    pub fn is_supported(&self) -> bool {
        matches!(self, Self::Canonical(_))
    }
}

impl fmt::Display for NormalizedSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Canonical(sig) => f.write_str(sig),
            Self::Unsupported => f.write_str("<unsupported>"),
        }
    }
}

/// Reduce a list of parameter types to canonical form.
///
/// Nullability markers are dropped and namespace qualification is removed
/// from every type name. Generic argument lists make the whole signature
/// unsupported.
pub fn normalize<S: AsRef<str>>(parameters: &[S]) -> NormalizedSignature {
    let mut canonical = Vec::with_capacity(parameters.len());
    for parameter in parameters {
        match normalize_type(parameter.as_ref()) {
            Some(ty) => canonical.push(ty),
            None => return NormalizedSignature::Unsupported,
        }
    }
    NormalizedSignature::Canonical(format!("({})", canonical.join(", ")))
}

fn normalize_type(raw: &str) -> Option<String> {
    if raw.contains('<') {
        return None;
    }
    let without_nullable = raw.replace('?', "");
    let without_global = without_nullable.replace("global::", "");
    let simple = QUALIFIED_NAME.replace_all(&without_global, "$1");
    let collapsed = WHITESPACE.replace_all(simple.trim(), " ");
    let tokens: Vec<&str> = collapsed
        .split(' ')
        .skip_while(|token| IGNORED_MODIFIERS.contains(token))
        .collect();
    Some(tokens.join(" "))
}

/// Extract parameter types from a stored C# member signature.
///
/// `public void Foo (ref int count, string? name = null);` yields
/// `["ref int", "string?"]`. Indexers use their bracketed parameter list.
/// Signatures without a parameter list (fields, properties) yield an empty
/// list.
pub fn parameters_from_signature(signature: &str) -> Vec<String> {
    let Some((open, close)) = parameter_list_bounds(signature) else {
        return Vec::new();
    };
    split_top_level(&signature[open + 1..close], ',')
        .into_iter()
        .map(str::trim)
        .filter(|param| !param.is_empty())
        .map(parameter_type)
        .collect()
}

/// Byte range of the outermost parameter list delimiters.
fn parameter_list_bounds(signature: &str) -> Option<(usize, usize)> {
    let open = match signature.find('(') {
        Some(paren) => paren,
        None => signature.find("this[").map(|at| at + "this".len())?,
    };
    let mut depth = 0usize;
    for (idx, ch) in signature[open..].char_indices() {
        match ch {
            '(' | '[' | '<' => depth += 1,
            ')' | ']' | '>' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some((open, open + idx));
                }
            }
            _ => {}
        }
    }
    None
}

fn split_top_level(text: &str, separator: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (idx, ch) in text.char_indices() {
        match ch {
            '(' | '[' | '<' => depth += 1,
            ')' | ']' | '>' => depth = depth.saturating_sub(1),
            c if c == separator && depth == 0 => {
                parts.push(&text[start..idx]);
                start = idx + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&text[start..]);
    parts
}

/// Type portion of a single parameter: attributes, default value and name removed.
fn parameter_type(param: &str) -> String {
    let param = skip_attributes(param);
    let param = split_top_level(param, '=')[0].trim();

    let mut depth = 0usize;
    let mut name_start = None;
    for (idx, ch) in param.char_indices() {
        match ch {
            '(' | '[' | '<' => depth += 1,
            ')' | ']' | '>' => depth = depth.saturating_sub(1),
            c if c.is_whitespace() && depth == 0 => name_start = Some(idx),
            _ => {}
        }
    }

    match name_start {
        Some(idx) => param[..idx].trim().to_string(),
        None => param.to_string(),
    }
}

fn skip_attributes(mut param: &str) -> &str {
    while param.starts_with('[') {
        match param.find(']') {
            Some(end) => param = param[end + 1..].trim_start(),
            None => break,
        }
    }
    param
}
