//! Output filename derivation.

use regex::Regex;
use std::sync::LazyLock;

/// Suffix appended to the input's base name.
pub const OUTPUT_SUFFIX: &str = "_with_notes.pptx";

/// Name used when there is no usable input name.
pub const DEFAULT_OUTPUT_NAME: &str = "presentation_with_notes.pptx";

/// Regex to match the input extensions stripped from the base name.
static INPUT_EXTENSION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\.(pptx|pdf)$").expect("static regex"));

/// Derive the default output filename for an input file.
///
/// `Deck.pptx` becomes `Deck_with_notes.pptx`. Without an input name, or
/// when stripping the extension leaves nothing, the generic default is used.
pub fn output_file_name(input_name: Option<&str>) -> String {
    let base = input_name
        .map(|name| INPUT_EXTENSION_REGEX.replace(name.trim(), "").into_owned())
        .unwrap_or_default();

    if base.is_empty() {
        DEFAULT_OUTPUT_NAME.to_string()
    } else {
        format!("{}{}", base, OUTPUT_SUFFIX)
    }
}

/// Make sure a user-supplied output name ends in `.pptx`.
pub fn ensure_pptx_extension(name: &str) -> String {
    if name.to_lowercase().ends_with(".pptx") {
        name.to_string()
    } else {
        format!("{}.pptx", name)
    }
}
