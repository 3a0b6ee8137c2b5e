//! Wire types exchanged with the relay endpoint.

use crate::models::{HttpMethod, KeyValue};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Body POSTed to the relay endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayRequest {
    pub method: HttpMethod,

    /// Target URL with its own query string removed.
    pub target_url: String,

    /// Headers with a non-empty key.
    pub headers: Vec<KeyValue>,

    /// Query parameters with a non-empty key, appended by the relay.
    pub query_params: Vec<KeyValue>,

    pub body: String,
}

/// JSON body returned by a reachable relay.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RelayResponse {
    /// Status of the target response.
    #[serde(default)]
    pub status: Option<u16>,

    /// Target response headers with lower-cased names.
    #[serde(default)]
    pub headers: Option<HashMap<String, String>>,

    /// Raw target response text.
    #[serde(default)]
    pub body: Option<String>,

    /// Present when the target (or the outbound call) failed.
    #[serde(default)]
    pub error: Option<String>,
}

/// Raw HTTP-level reply from the relay endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportReply {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl TransportReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// A successful relayed response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelaySuccess {
    pub body: Option<String>,
    pub status: Option<u16>,
    pub headers: HashMap<String, String>,
    pub content_type: Option<String>,
}

/// Structured failure payload: validation, transport or target errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayFailure {
    pub message: String,
    pub status: u16,
    pub body: Option<String>,
}

impl RelayFailure {
    pub fn new(message: impl Into<String>, status: u16, body: Option<String>) -> Self {
        Self {
            message: message.into(),
            status,
            body,
        }
    }
}

/// Looks up a header value by case-insensitive name.
pub fn header_value<'a>(headers: &'a HashMap<String, String>, name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relay_request_wire_format() {
        let request = RelayRequest {
            method: HttpMethod::POST,
            target_url: "https://api.example.com/users".to_string(),
            headers: vec![KeyValue::new("Content-Type", "application/json")],
            query_params: vec![KeyValue::new("page", "1")],
            body: "{}".to_string(),
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["method"], "POST");
        assert_eq!(json["targetUrl"], "https://api.example.com/users");
        assert_eq!(json["queryParams"][0]["key"], "page");
        assert_eq!(json["headers"][0]["value"], "application/json");
    }

    #[test]
    fn test_relay_response_accepts_sparse_json() {
        let parsed: RelayResponse = serde_json::from_str(r#"{"status": 204}"#).unwrap();
        assert_eq!(parsed.status, Some(204));
        assert!(parsed.headers.is_none());
        assert!(parsed.body.is_none());
        assert!(parsed.error.is_none());

        let parsed: RelayResponse =
            serde_json::from_str(r#"{"status": 500, "body": null, "error": "boom"}"#).unwrap();
        assert_eq!(parsed.error.as_deref(), Some("boom"));
    }

    #[test]
    fn test_header_value_case_insensitive() {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "text/html".to_string());
        assert_eq!(header_value(&headers, "content-type"), Some("text/html"));
        assert_eq!(header_value(&headers, "accept"), None);
    }
}
