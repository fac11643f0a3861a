//! Payload normalization.
//!
//! Auth widgets sometimes deliver their success payload as a JSON-encoded
//! string rather than a structured value. Normalization is best-effort: a
//! parse failure keeps the original text and never fails the flow.

use serde_json::Value;
use tracing::warn;

/// Converts a raw widget payload into a canonical value for extraction.
///
/// Textual payloads are parsed as JSON when possible; anything else passes
/// through unchanged. Never fails.
pub fn normalize(raw: Value) -> Value {
    match raw {
        Value::String(text) => match serde_json::from_str::<Value>(&text) {
            Ok(parsed) => parsed,
            Err(err) => {
                warn!("auth payload is not valid JSON, keeping raw text: {err}");
                Value::String(text)
            }
        },
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::*;

    /// Test: a JSON-encoded string payload is parsed into the object.
    #[test]
    fn test_parses_encoded_object() {
        let raw = Value::String(r#"{"token":"abc123"}"#.to_string());
        assert_eq!(normalize(raw), json!({"token": "abc123"}));
    }

    /// Test: invalid JSON text is kept unchanged, no error raised.
    #[test]
    fn test_invalid_json_degrades_to_raw_text() {
        let raw = Value::String("not {json".to_string());
        assert_eq!(normalize(raw), Value::String("not {json".to_string()));
    }

    /// Test: structured payloads pass through untouched.
    #[test]
    fn test_object_passthrough() {
        let raw = json!({"data": {"proxy_auth_token": "abc123"}});
        assert_eq!(normalize(raw.clone()), raw);
    }
}
