//! Server side of the code-generation endpoint.
//!
//! [`handle_codegen_request`] validates the incoming JSON, resolves the
//! target from the free-form language label and delegates to a
//! [`SnippetGenerator`]. Missing fields yield 400, generation failures 500.

use super::protocol::{CodegenReply, CodegenRequest, CodegenResponse};
use super::target::SnippetTarget;
use super::{curl, javascript, python};
use crate::models::{HttpMethod, KeyValue};
use serde_json::Value;
use std::fmt;

const REQUIRED_FIELDS: [&str; 3] = ["selectedLanguage", "method", "url"];

/// Errors raised by snippet generators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// No generator exists for the resolved target.
    UnsupportedTarget(SnippetTarget),

    /// The request cannot be turned into a snippet.
    InvalidRequest(String),
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationError::UnsupportedTarget(target) => {
                write!(f, "Code generation for {} is not supported", target)
            }
            GenerationError::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
        }
    }
}

impl std::error::Error for GenerationError {}

/// Produces a snippet for a resolved target.
pub trait SnippetGenerator: Send + Sync {
    fn generate(
        &self,
        target: SnippetTarget,
        request: &CodegenRequest,
    ) -> Result<String, GenerationError>;
}

/// Generators shipped with the crate: curl, JavaScript fetch and Python requests.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinGenerator;

impl SnippetGenerator for BuiltinGenerator {
    fn generate(
        &self,
        target: SnippetTarget,
        request: &CodegenRequest,
    ) -> Result<String, GenerationError> {
        if request.url.trim().is_empty() {
            return Err(GenerationError::InvalidRequest("url is empty".to_string()));
        }

        match target {
            SnippetTarget::Curl => Ok(curl::generate_curl(request)),
            SnippetTarget::JavaScriptFetch => Ok(javascript::generate_fetch(request)),
            SnippetTarget::PythonRequests => Ok(python::generate_requests(request)),
            other => Err(GenerationError::UnsupportedTarget(other)),
        }
    }
}

/// Handles one code-generation request body.
pub fn handle_codegen_request<G: SnippetGenerator + ?Sized>(
    payload: &Value,
    generator: &G,
) -> CodegenResponse {
    let request = match parse_request(payload) {
        Ok(request) => request,
        Err(message) => {
            return CodegenResponse {
                status: 400,
                reply: CodegenReply::error(message),
            }
        }
    };

    let target = SnippetTarget::resolve(&request.selected_language);
    log::debug!(
        "Generating {} snippet for {} {}",
        target,
        request.method,
        request.url
    );

    match generator.generate(target, &request) {
        Ok(code) => CodegenResponse {
            status: 200,
            reply: CodegenReply::code(code),
        },
        Err(err) => {
            log::warn!("Code generation failed: {}", err);
            CodegenResponse {
                status: 500,
                reply: CodegenReply::error(err.to_string()),
            }
        }
    }
}

fn required_str<'a>(payload: &'a Value, field: &str) -> Option<&'a str> {
    payload
        .get(field)
        .and_then(Value::as_str)
        .filter(|value| !value.is_empty())
}

fn parse_request(payload: &Value) -> Result<CodegenRequest, String> {
    let missing: Vec<&str> = REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|field| required_str(payload, field).is_none())
        .collect();
    if !missing.is_empty() {
        return Err(format!("Missing required fields: {}", missing.join(", ")));
    }

    let selected_language = required_str(payload, "selectedLanguage").unwrap_or_default();
    let method: HttpMethod = required_str(payload, "method")
        .unwrap_or_default()
        .to_uppercase()
        .parse()?;
    let url = required_str(payload, "url").unwrap_or_default();

    let headers: Vec<KeyValue> = match payload.get("headers") {
        None | Some(Value::Null) => Vec::new(),
        Some(value) => serde_json::from_value(value.clone())
            .map_err(|e| format!("Invalid headers: {}", e))?,
    };
    let request_body = payload
        .get("requestBody")
        .and_then(Value::as_str)
        .unwrap_or_default();

    Ok(CodegenRequest {
        selected_language: selected_language.to_string(),
        method,
        url: url.to_string(),
        headers: headers.into_iter().filter(|h| !h.key.is_empty()).collect(),
        request_body: request_body.to_string(),
    })
}
