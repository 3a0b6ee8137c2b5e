//! JSON helpers for response display.

use super::FormatError;
use serde::Serialize;
use serde_json::Value;

/// Re-serializes `json` with 2-space indentation, keeping key order.
///
/// # Examples
///
/// ```
/// use rest_workbench::formatter::json::format_json_pretty;
///
/// assert_eq!(format_json_pretty(r#"{"a":1}"#).unwrap(), "{\n  \"a\": 1\n}");
/// ```
pub fn format_json_pretty(json: &str) -> Result<String, FormatError> {
    let value: Value =
        serde_json::from_str(json).map_err(|e| FormatError::InvalidJson(e.to_string()))?;

    let mut buf = Vec::with_capacity(json.len() + json.len() / 2);
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"  ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value
        .serialize(&mut serializer)
        .map_err(|e| FormatError::InvalidJson(e.to_string()))?;

    // serde_json only emits valid UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Returns the string `error` field of a JSON object body, if any.
pub fn error_field(body: &str) -> Option<String> {
    match serde_json::from_str::<Value>(body).ok()? {
        Value::Object(map) => match map.get("error") {
            Some(Value::String(message)) => Some(message.clone()),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pretty_keeps_key_order() {
        let formatted = format_json_pretty(r#"{"z":1,"a":[true,null]}"#).unwrap();
        assert_eq!(
            formatted,
            "{\n  \"z\": 1,\n  \"a\": [\n    true,\n    null\n  ]\n}"
        );
    }

    #[test]
    fn test_pretty_rejects_malformed() {
        let err = format_json_pretty("{not json").unwrap_err();
        assert!(matches!(err, FormatError::InvalidJson(_)));
    }

    #[test]
    fn test_error_field() {
        assert_eq!(
            error_field(r#"{"error":"Invalid token"}"#).as_deref(),
            Some("Invalid token")
        );
        assert_eq!(error_field(r#"{"error":{"code":1}}"#), None);
        assert_eq!(error_field(r#"["error"]"#), None);
        assert_eq!(error_field("plain text"), None);
    }
}
