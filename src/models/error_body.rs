//! Extraction of human-readable messages from backend error bodies.
//!
//! The portal backend is not uniform about error shapes. Observed bodies:
//! `{"error": "..."}`, `{"detail": "..."}`, `{"message": "..."}`, and
//! validation maps like `{"phone": ["This field is required."]}`. The
//! extractor tries each in turn and gives up quietly on anything else so
//! the transport can fall back to a generic message.

use serde_json::Value;

/// Keys that carry a top-level message, in order of preference.
const MESSAGE_KEYS: [&str; 4] = ["error", "detail", "message", "non_field_errors"];

/// Extract a display-ready message from a raw error body, if one exists.
pub(crate) fn extract_message(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    let map = value.as_object()?;

    for key in MESSAGE_KEYS {
        if let Some(found) = map.get(key).and_then(first_string) {
            return Some(found);
        }
    }

    // Fall back to the first field-error entry, formatted as "field: msg".
    for (field, entry) in map {
        if let Some(msg) = first_string(entry) {
            return Some(format!("{}: {}", field, msg));
        }
    }

    None
}

/// Pull a string out of a value that is either a string or an array of
/// strings (the two shapes Django-style validation errors use).
fn first_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Array(items) => items.iter().find_map(|item| match item {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            _ => None,
        }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_error_key() {
        let body = br#"{"error": "Failed to generate guest token"}"#;
        assert_eq!(extract_message(body).as_deref(), Some("Failed to generate guest token"));
    }

    #[test]
    fn test_extracts_detail_key() {
        let body = br#"{"detail": "Authentication credentials were not provided."}"#;
        assert_eq!(
            extract_message(body).as_deref(),
            Some("Authentication credentials were not provided.")
        );
    }

    #[test]
    fn test_prefers_error_over_field_map() {
        let body = br#"{"error": "Validation failed", "details": {"query": ["required"]}}"#;
        assert_eq!(extract_message(body).as_deref(), Some("Validation failed"));
    }

    #[test]
    fn test_field_error_map() {
        let body = br#"{"phone": ["This field is required."]}"#;
        assert_eq!(extract_message(body).as_deref(), Some("phone: This field is required."));
    }

    #[test]
    fn test_non_field_errors_array() {
        let body = br#"{"non_field_errors": ["Invalid credentials."]}"#;
        assert_eq!(extract_message(body).as_deref(), Some("Invalid credentials."));
    }

    #[test]
    fn test_garbage_body_yields_none() {
        assert_eq!(extract_message(b"<html>502 Bad Gateway</html>"), None);
        assert_eq!(extract_message(b""), None);
        assert_eq!(extract_message(br#"["not", "an", "object"]"#), None);
    }
}
