//! Lenient timestamp decoding for document fields.
//!
//! Documents written by this system always carry RFC 3339 timestamps, but the
//! readers must survive documents that lack one or carry something unparseable.
//! Such values decode as `None` and render as a fallback string downstream.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

/// Deserialize an optional RFC 3339 timestamp, mapping anything invalid to `None`.
///
/// Use together with `#[serde(default)]` so that an absent field is also `None`.
///
/// # Errors
///
/// Never fails on content; only propagates errors from the underlying deserializer.
pub fn deserialize_lenient<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(parse_timestamp))
}

/// Parse a JSON value as an RFC 3339 timestamp.
fn parse_timestamp(value: &serde_json::Value) -> Option<DateTime<Utc>> {
    let text = value.as_str()?;
    DateTime::parse_from_rfc3339(text)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Doc {
        #[serde(default, deserialize_with = "deserialize_lenient")]
        at: Option<DateTime<Utc>>,
    }

    #[test]
    fn test_valid_timestamp() {
        let doc: Doc = serde_json::from_str(r#"{"at":"2024-03-05T10:00:00Z"}"#).unwrap();
        assert_eq!(doc.at, Some(Utc.with_ymd_and_hms(2024, 3, 5, 10, 0, 0).unwrap()));
    }

    #[test]
    fn test_offset_is_normalized_to_utc() {
        let doc: Doc = serde_json::from_str(r#"{"at":"2024-03-05T12:00:00+02:00"}"#).unwrap();
        assert_eq!(doc.at, Some(Utc.with_ymd_and_hms(2024, 3, 5, 10, 0, 0).unwrap()));
    }

    #[test]
    fn test_garbage_becomes_none() {
        let doc: Doc = serde_json::from_str(r#"{"at":"yesterday-ish"}"#).unwrap();
        assert!(doc.at.is_none());

        let doc: Doc = serde_json::from_str(r#"{"at":12345}"#).unwrap();
        assert!(doc.at.is_none());
    }

    #[test]
    fn test_absent_and_null_become_none() {
        let doc: Doc = serde_json::from_str("{}").unwrap();
        assert!(doc.at.is_none());

        let doc: Doc = serde_json::from_str(r#"{"at":null}"#).unwrap();
        assert!(doc.at.is_none());
    }
}
