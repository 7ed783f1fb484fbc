//! Free-text sanitizing for saved documents.
//!
//! Text typed by users ends up in saved files and, eventually, in HTML.
//! On save the reserved quote character is replaced; on load anything that
//! looks like executable markup is stripped. Plain angle brackets such as the
//! ones in `List<String>` are left alone.

use regex::Regex;
use std::sync::OnceLock;

/// Character that may not appear in saved free text.
pub const RESERVED_QUOTE: char = '"';

/// Replacement written in place of [`RESERVED_QUOTE`].
pub const QUOTE_REPLACEMENT: char = '\'';

fn script_regex() -> &'static Regex {
    static SCRIPT_REGEX: OnceLock<Regex> = OnceLock::new();
    SCRIPT_REGEX.get_or_init(|| {
        Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>").expect("invalid regex pattern")
    })
}

fn tag_regex() -> &'static Regex {
    // Tags carrying attributes, plus stray script/iframe/embed tags
    static TAG_REGEX: OnceLock<Regex> = OnceLock::new();
    TAG_REGEX.get_or_init(|| {
        Regex::new(r"(?i)<[a-z][a-z0-9]*\s+[^<>]*=[^<>]*>|</?(script|iframe|embed)\b[^<>]*>")
            .expect("invalid regex pattern")
    })
}

/// Prepares free text for serialization.
pub fn for_save(text: &str) -> String {
    text.replace(RESERVED_QUOTE, &QUOTE_REPLACEMENT.to_string())
}

/// Strips markup from free text read from a file.
pub fn for_load(text: &str) -> String {
    let without_scripts = script_regex().replace_all(text, "");
    let cleaned = tag_regex().replace_all(&without_scripts, "");
    if cleaned.len() != text.len() {
        tracing::warn!("Stripped markup from loaded text");
    }
    cleaned.into_owned()
}
