//! Text cleanup for extracted slide content.
//!
//! Archive text is kept close to the source: node text is joined with single
//! spaces and only the three markup entities a slide body commonly carries
//! are decoded. Raster text items come from a layout engine and get a light
//! normalization pass (NFC, collapsed whitespace) before being stored.

use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

/// Regex to collapse runs of whitespace (including newlines) into one space.
static WHITESPACE_COLLAPSE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("static regex"));

/// Decode `&lt;`, `&gt;` and `&amp;`, in that order.
///
/// Other entities and character references are left untouched.
pub fn decode_minimal_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

/// Join text nodes (or layout items) with single spaces.
pub fn join_text_items<S: AsRef<str>>(items: &[S]) -> String {
    items
        .iter()
        .map(|s| s.as_ref())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Normalize text reported by a layout engine.
///
/// - Composes Unicode to NFC
/// - Collapses whitespace runs to single spaces
/// - Trims leading/trailing whitespace
pub fn clean_layout_text(text: &str) -> String {
    let composed: String = text.nfc().collect();
    WHITESPACE_COLLAPSE_REGEX
        .replace_all(&composed, " ")
        .trim()
        .to_string()
}

/// Shorten `text` to at most `max_chars` characters, appending an ellipsis.
pub fn preview(text: &str, max_chars: usize) -> String {
    let flat = WHITESPACE_COLLAPSE_REGEX.replace_all(text.trim(), " ");
    if flat.chars().count() <= max_chars {
        return flat.into_owned();
    }
    let mut out: String = flat.chars().take(max_chars.saturating_sub(1)).collect();
    out.push('…');
    out
}
