//! Input sanitization applied by the API handlers before persistence.
//!
//! Sanitizing trims, strips `<` and `>`, and bounds the length of a value. It
//! is deliberately shallow and is NOT an HTML safety mechanism: anything that
//! ends up in markup must still be escaped at render time.
//!
//! All lengths are counted in characters, never bytes, so truncation cannot
//! split a multi-byte character.

use serde_json::Value;

/// Maximum length for fields submitted to the comments endpoint.
pub const COMMENT_FIELD_MAX: usize = 1000;

/// Maximum length for fields submitted to the recipes endpoint.
pub const RECIPE_FIELD_MAX: usize = 10_000;

/// Sanitize an arbitrary JSON field.
///
/// Absent, `null`, and non-string values become the empty string.
///
/// # Examples
///
/// ```
/// use recipe_box_core::sanitize::{sanitize, RECIPE_FIELD_MAX};
/// use serde_json::json;
///
/// assert_eq!(sanitize(Some(&json!("  <b>Pie</b> ")), RECIPE_FIELD_MAX), "bPie/b");
/// assert_eq!(sanitize(Some(&json!(42)), RECIPE_FIELD_MAX), "");
/// assert_eq!(sanitize(None, RECIPE_FIELD_MAX), "");
/// ```
#[must_use]
pub fn sanitize(input: Option<&Value>, max_chars: usize) -> String {
    match input {
        Some(Value::String(text)) => sanitize_str(text, max_chars),
        _ => String::new(),
    }
}

/// Sanitize a string: strip angle brackets, trim, and truncate to `max_chars`.
///
/// The result never has surrounding whitespace, so sanitizing is idempotent.
#[must_use]
pub fn sanitize_str(input: &str, max_chars: usize) -> String {
    let stripped = strip(input);
    if stripped.chars().count() <= max_chars {
        return stripped;
    }
    stripped
        .chars()
        .take(max_chars)
        .collect::<String>()
        .trim_end()
        .to_owned()
}

/// Remove every `<` and `>` and trim surrounding whitespace, without truncating.
///
/// Handlers that must reject over-long input (instead of silently shortening
/// it) measure this value against their limit.
#[must_use]
pub fn strip(input: &str) -> String {
    input
        .chars()
        .filter(|c| !matches!(c, '<' | '>'))
        .collect::<String>()
        .trim()
        .to_owned()
}

/// Count the characters of a string.
#[must_use]
pub fn char_len(input: &str) -> usize {
    input.chars().count()
}
