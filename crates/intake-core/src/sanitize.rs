//! Content sanitization applied before text leaves the process.
//!
//! The external language API has a bounded context window, so every piece of
//! content is trimmed and capped at [`MAX_CONTENT_CHARS`] characters. Content
//! that is empty after trimming is rejected by returning `None`.

/// Upper bound, in characters, on content forwarded to the language API.
pub const MAX_CONTENT_CHARS: usize = 16_000;

/// Appended to content that was cut at [`MAX_CONTENT_CHARS`].
pub const TRUNCATION_MARKER: &str = "\n\n...[Truncated for token limit]";

/// Trim and bound raw content.
///
/// Returns `None` for missing or blank input. Otherwise returns the trimmed
/// content, truncated to [`MAX_CONTENT_CHARS`] characters with
/// [`TRUNCATION_MARKER`] appended when it was longer.
pub fn sanitize(content: Option<&str>) -> Option<String> {
    let trimmed = content?.trim();
    if trimmed.is_empty() {
        return None;
    }

    match trimmed.char_indices().nth(MAX_CONTENT_CHARS) {
        Some((cut, _)) => {
            let mut bounded = String::with_capacity(cut + TRUNCATION_MARKER.len());
            bounded.push_str(&trimmed[..cut]);
            bounded.push_str(TRUNCATION_MARKER);
            Some(bounded)
        }
        None => Some(trimmed.to_string()),
    }
}
