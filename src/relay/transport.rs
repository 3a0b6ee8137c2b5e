//! Transport port for the relay endpoint.
//!
//! The relay client only needs to POST a JSON body and read back the raw
//! reply, so the seam is a small trait. [`HttpRelayTransport`] implements it
//! with reqwest; tests substitute their own transports.

use super::error::TransportError;
use super::protocol::{RelayRequest, TransportReply};

#[cfg(feature = "native")]
use crate::config::ClientConfig;
#[cfg(feature = "native")]
use serde::Serialize;

/// Sends relay requests to the relay endpoint.
#[allow(async_fn_in_trait)]
pub trait RelayTransport {
    /// POSTs `request` as JSON and returns the raw HTTP reply.
    ///
    /// An `Err` means no reply was received at all.
    async fn post_relay(&self, request: &RelayRequest) -> Result<TransportReply, TransportError>;
}

/// reqwest-backed relay transport.
#[cfg(feature = "native")]
#[derive(Debug, Clone)]
pub struct HttpRelayTransport {
    client: reqwest::Client,
    endpoint: String,
}

#[cfg(feature = "native")]
impl HttpRelayTransport {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    /// Creates a transport for the relay endpoint named by `config`.
    pub fn from_config(config: &ClientConfig) -> Result<Self, TransportError> {
        Self::new(config.relay_endpoint())
    }

    /// The relay endpoint URL requests are posted to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[cfg(feature = "native")]
impl RelayTransport for HttpRelayTransport {
    async fn post_relay(&self, request: &RelayRequest) -> Result<TransportReply, TransportError> {
        log::debug!(
            "Relaying {} {} via {}",
            request.method,
            request.target_url,
            self.endpoint
        );
        post_json(&self.client, &self.endpoint, request).await
    }
}

/// POSTs `payload` as JSON to `endpoint` and collects the reply as text.
#[cfg(feature = "native")]
pub(crate) async fn post_json<P: Serialize + ?Sized>(
    client: &reqwest::Client,
    endpoint: &str,
    payload: &P,
) -> Result<TransportReply, TransportError> {
    let response = client.post(endpoint).json(payload).send().await?;

    let status = response.status();
    let status_text = status.canonical_reason().unwrap_or("").to_string();
    let body = response.text().await?;

    Ok(TransportReply {
        status: status.as_u16(),
        status_text,
        body,
    })
}
