//! Template loader for CloudFormation documents.
//!
//! Parses YAML or JSON templates into an ordered resource map with
//! position tracking for accurate reporting.

pub mod loader;
pub mod template;

pub use template::{
    ParseError, Position, Resource, TagsValue, Template, TemplateFormat, parse_template,
};

use serde_json::Value;

/// Parse a YAML string and return the first document.
///
/// Short-form intrinsics (`!Ref`, `!If`, ...) load as their long-form objects.
pub fn parse_yaml(content: &str) -> Result<Value, ParseError> {
    loader::load_documents(content)?
        .into_iter()
        .next()
        .ok_or(ParseError::EmptyDocument)
}

/// Find the position of the key at `path` in the source text.
///
/// Walks the source line by line, descending one path element each time a
/// line at the first indentation level below the last matched key starts with
/// the next key. Keys of more deeply nested blocks are never matched. Both
/// YAML (`Key:`) and JSON (`"Key":`) spellings are recognised. The search stops as soon as it
/// leaves the block of the last matched key, so a missing child never picks up
/// a same-named key from a sibling block.
pub fn find_position_for_key(source: &str, path: &[&str]) -> Option<Position> {
    if path.is_empty() {
        return Some(Position::new(1, 1));
    }

    let mut depth = 0;
    let mut root_indent: Option<usize> = None;
    let mut parent_indent: Option<usize> = None;
    let mut child_indent: Option<usize> = None;

    for (line_idx, line) in source.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed == "{" {
            continue;
        }

        let indent = line.len() - line.trim_start().len();
        let root = *root_indent.get_or_insert(indent);
        if let Some(parent) = parent_indent
            && indent <= parent
        {
            return None;
        }

        // Keys only match directly under the last matched key.
        let expected = if depth == 0 {
            root
        } else {
            *child_indent.get_or_insert(indent)
        };
        if indent != expected {
            continue;
        }

        if is_key_line(trimmed, path[depth]) {
            depth += 1;
            parent_indent = Some(indent);
            child_indent = None;

            if depth == path.len() {
                return Some(Position::new(line_idx as u32 + 1, indent as u32 + 1));
            }
        }
    }

    None
}

/// Find the line number for a given path in the source text.
pub fn find_line_for_key(source: &str, path: &[&str]) -> Option<u32> {
    find_position_for_key(source, path).map(|p| p.line)
}

/// Whether a trimmed line opens the mapping entry `key`.
fn is_key_line(trimmed: &str, key: &str) -> bool {
    for quote in ["", "\"", "'"] {
        if let Some(rest) = trimmed
            .strip_prefix(quote)
            .and_then(|r| r.strip_prefix(key))
            .and_then(|r| r.strip_prefix(quote))
            && rest.trim_start().starts_with(':')
        {
            return true;
        }
    }
    false
}
