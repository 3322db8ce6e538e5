//! Cleanup of raw model output.

use intake_core::models::ArtifactKind;

/// Prologue every markup artifact starts with.
pub const XML_PROLOGUE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

const FENCE: &str = "```";

fn tag_len(s: &str) -> usize {
    s.find(|c: char| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '+')))
        .unwrap_or(s.len())
}

/// A line holding nothing but a fence marker and an optional language tag.
fn is_fence_line(line: &str) -> bool {
    line.trim()
        .strip_prefix(FENCE)
        .is_some_and(|rest| tag_len(rest) == rest.len())
}

/// Remove triple-backtick fences, with or without a language tag.
///
/// Text outside the outermost fences is dropped, and fence lines between
/// several fenced blocks are removed so the blocks join up. Input without
/// fences is returned trimmed.
pub fn strip_code_fences(raw: &str) -> String {
    let Some(open) = raw.find(FENCE) else {
        return raw.trim().to_string();
    };

    let after_open = &raw[open + FENCE.len()..];
    let body = &after_open[tag_len(after_open)..];

    let body = match body.rfind(FENCE) {
        Some(close) => &body[..close],
        None => body,
    };

    body.lines()
        .filter(|line| !is_fence_line(line))
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

/// Prepend the standard prologue unless the document already has one.
pub fn ensure_xml_prologue(document: &str) -> String {
    let trimmed = document.trim_start();
    if trimmed.starts_with("<?xml") {
        trimmed.to_string()
    } else {
        format!("{XML_PROLOGUE}\n{trimmed}")
    }
}

/// Normalize model output for the given artifact kind.
pub fn normalize(kind: ArtifactKind, raw: &str) -> String {
    if kind.is_markup() {
        ensure_xml_prologue(&strip_code_fences(raw))
    } else {
        raw.trim().to_string()
    }
}
