//! Code-generation client port.

use super::protocol::{CodegenReply, CodegenRequest};
use super::service::{handle_codegen_request, SnippetGenerator};
use crate::relay::{TransportError, TransportReply};
use std::fmt;

#[cfg(feature = "native")]
use crate::config::ClientConfig;

/// Errors returned by a [`CodeGenerator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodegenError {
    /// The endpoint answered with a non-2xx status.
    Rejected { status: u16, message: String },

    /// The endpoint could not be reached.
    Transport(String),

    /// The endpoint answered 2xx with a body that is not a code reply.
    Malformed(String),
}

impl fmt::Display for CodegenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodegenError::Rejected { status, message } => {
                write!(f, "Code generation failed ({}): {}", status, message)
            }
            CodegenError::Transport(msg) => write!(f, "Code generator unreachable: {}", msg),
            CodegenError::Malformed(msg) => write!(f, "Malformed code generator reply: {}", msg),
        }
    }
}

impl std::error::Error for CodegenError {}

impl From<TransportError> for CodegenError {
    fn from(err: TransportError) -> Self {
        CodegenError::Transport(err.0)
    }
}

/// Turns a request into a code snippet.
#[allow(async_fn_in_trait)]
pub trait CodeGenerator {
    /// Returns the snippet. A reply without code yields an empty string.
    async fn generate(&self, request: &CodegenRequest) -> Result<String, CodegenError>;
}

/// Classifies a raw reply from the code-generation endpoint.
pub fn classify_codegen_reply(reply: TransportReply) -> Result<String, CodegenError> {
    if !reply.is_success() {
        let message = serde_json::from_str::<CodegenReply>(&reply.body)
            .ok()
            .and_then(|parsed| parsed.error)
            .unwrap_or(reply.status_text);
        return Err(CodegenError::Rejected {
            status: reply.status,
            message,
        });
    }

    let parsed: CodegenReply =
        serde_json::from_str(&reply.body).map_err(|e| CodegenError::Malformed(e.to_string()))?;
    Ok(parsed.code.unwrap_or_default())
}

/// Runs the code-generation endpoint handler in process.
#[derive(Debug, Clone, Default)]
pub struct LocalCodeGenerator<G> {
    generator: G,
}

impl<G: SnippetGenerator> LocalCodeGenerator<G> {
    pub fn new(generator: G) -> Self {
        Self { generator }
    }
}

impl<G: SnippetGenerator> CodeGenerator for LocalCodeGenerator<G> {
    async fn generate(&self, request: &CodegenRequest) -> Result<String, CodegenError> {
        let payload =
            serde_json::to_value(request).map_err(|e| CodegenError::Malformed(e.to_string()))?;
        let response = handle_codegen_request(&payload, &self.generator);

        if response.status != 200 {
            return Err(CodegenError::Rejected {
                status: response.status,
                message: response.reply.error.unwrap_or_default(),
            });
        }
        Ok(response.reply.code.unwrap_or_default())
    }
}

/// reqwest-backed client for a remote code-generation endpoint.
#[cfg(feature = "native")]
#[derive(Debug, Clone)]
pub struct HttpCodeGenerator {
    client: reqwest::Client,
    endpoint: String,
}

#[cfg(feature = "native")]
impl HttpCodeGenerator {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, TransportError> {
        Self::new(config.codegen_endpoint())
    }
}

#[cfg(feature = "native")]
impl CodeGenerator for HttpCodeGenerator {
    async fn generate(&self, request: &CodegenRequest) -> Result<String, CodegenError> {
        let reply = crate::relay::transport::post_json(&self.client, &self.endpoint, request).await?;
        classify_codegen_reply(reply)
    }
}
