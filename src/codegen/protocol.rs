//! Wire types exchanged with the code-generation endpoint.

use crate::models::{HttpMethod, KeyValue};
use serde::{Deserialize, Serialize};

/// Body POSTed to the code-generation endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodegenRequest {
    /// Free-form language label, resolved server-side.
    pub selected_language: String,
    pub method: HttpMethod,
    pub url: String,
    #[serde(default)]
    pub headers: Vec<KeyValue>,
    #[serde(default)]
    pub request_body: String,
}

impl CodegenRequest {
    /// Value of the `Content-Type` header, matched case-insensitively.
    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .iter()
            .find(|header| header.key.eq_ignore_ascii_case("content-type"))
            .map(|header| header.value.as_str())
    }

    pub fn is_json(&self) -> bool {
        self.content_type()
            .is_some_and(|ct| ct.to_lowercase().contains("json"))
    }

    /// The body, if the snippet should send one.
    pub fn body(&self) -> Option<&str> {
        if self.request_body.is_empty() || !self.method.allows_body() {
            None
        } else {
            Some(&self.request_body)
        }
    }
}

/// JSON reply: `code` on success, `error` on failure.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CodegenReply {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CodegenReply {
    pub fn code(code: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            error: None,
        }
    }

    pub fn error(error: impl Into<String>) -> Self {
        Self {
            code: None,
            error: Some(error.into()),
        }
    }
}

/// Status plus JSON body produced by the endpoint handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodegenResponse {
    pub status: u16,
    pub reply: CodegenReply,
}
