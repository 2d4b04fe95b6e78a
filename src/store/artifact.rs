//! Member entries stored in a documentation artifact.
//!
//! Artifacts are ECMA-style XML: a `<Type>` root with a `<Members>` list of
//! `<Member MemberName="...">` elements, each carrying one or more
//! `<MemberSignature Language="..." Value="..."/>` children. Only the data
//! needed to pick an overload is extracted; the markup is never rewritten.

use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

static MEMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<Member\s([^>]*?)\s*(?:/>|>(.*?)</Member>)").unwrap()
});
static MEMBER_SIGNATURE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<MemberSignature\s([^>]*?)/?>").unwrap());
static ATTRIBUTE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"([\w:]+)\s*=\s*"([^"]*)""#).unwrap());

const SIGNATURE_LANGUAGE: &str = "C#";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemberEntry {
    pub name: String,
    /// Stored C# signature, entities decoded; empty when none is present
    pub signature: String,
    /// Position among all members of the artifact
    pub order: usize,
}

/// Scan member entries in document order.
pub fn parse_members(content: &str) -> Vec<MemberEntry> {
    MEMBER
        .captures_iter(content)
        .filter_map(|caps| {
            let name = attribute(&caps[1], "MemberName")?;
            let body = caps.get(2).map_or("", |m| m.as_str());
            Some((name, member_signature(body).unwrap_or_default()))
        })
        .enumerate()
        .map(|(order, (name, signature))| MemberEntry {
            name,
            signature,
            order,
        })
        .collect()
}

/// The C# signature if present, otherwise the first signature of any language.
fn member_signature(body: &str) -> Option<String> {
    let mut fallback = None;
    for caps in MEMBER_SIGNATURE.captures_iter(body) {
        let attrs = &caps[1];
        let Some(value) = attribute(attrs, "Value") else {
            continue;
        };
        if attribute(attrs, "Language").as_deref() == Some(SIGNATURE_LANGUAGE) {
            return Some(value);
        }
        fallback.get_or_insert(value);
    }
    fallback
}

fn attribute(attrs: &str, name: &str) -> Option<String> {
    ATTRIBUTE
        .captures_iter(attrs)
        .find(|caps| &caps[1] == name)
        .map(|caps| decode(&caps[2]).into_owned())
}

fn decode(value: &str) -> Cow<'_, str> {
    html_escape::decode_html_entities(value)
}
