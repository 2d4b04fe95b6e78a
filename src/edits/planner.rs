use crate::core::{Declaration, Edit, ResolvedPointer};
use html_escape::encode_double_quoted_attribute;

/// Marker that starts every generated reference line.
pub const INCLUDE_PREFIX: &str = "/// <include ";

/// Reference line inserted in front of `decl`.
///
/// The line goes at the declaration's first token, so the existing
/// indentation before it is reused for the comment and the declaration is
/// re-indented after the inserted newline.
pub fn plan(decl: &Declaration, pointer: &ResolvedPointer) -> Edit {
    Edit {
        file: decl.source.file.clone(),
        offset: decl.source.offset,
        text: format!("{}\n{}", include_line(pointer), decl.source.indent),
    }
}

pub fn include_line(pointer: &ResolvedPointer) -> String {
    format!(
        "{INCLUDE_PREFIX}file=\"{}\" path=\"{}\" />",
        encode_double_quoted_attribute(&pointer.artifact_relative_path),
        encode_double_quoted_attribute(&pointer.locator.to_string()),
    )
}
