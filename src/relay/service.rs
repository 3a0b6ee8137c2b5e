//! Relay forwarder: the server side of the relay hop.
//!
//! Receives a [`RelayRequest`], performs the outbound call against the target
//! API and packs the outcome into a [`RelayResponse`]. The HTTP status of the
//! relay's own reply is 200 whenever the target answered (even with an error
//! status) and 500 when no answer could be obtained.

use super::error::ForwardError;
use super::protocol::{RelayRequest, RelayResponse};
use crate::models::{HttpMethod, KeyValue};
use std::collections::HashMap;
use url::Url;

/// Headers never forwarded to the target API.
const STRIPPED_HEADERS: [&str; 2] = ["host", "content-length"];

/// Reply produced by the forwarder: the relay's HTTP status plus JSON body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForwardReply {
    pub status: u16,
    pub response: RelayResponse,
}

impl ForwardReply {
    fn failure(err: &ForwardError) -> Self {
        Self {
            status: 500,
            response: RelayResponse {
                status: Some(500),
                headers: None,
                body: None,
                error: Some(err.to_string()),
            },
        }
    }
}

/// Builds the outbound URL: the target URL with query parameters appended.
pub fn target_url(request: &RelayRequest) -> Result<Url, ForwardError> {
    let mut url = Url::parse(&request.target_url)?;
    if !request.query_params.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for param in &request.query_params {
            pairs.append_pair(&param.key, &param.value);
        }
    }
    Ok(url)
}

/// Drops headers the outbound client must set itself.
pub fn forwarded_headers(headers: &[KeyValue]) -> Vec<&KeyValue> {
    headers
        .iter()
        .filter(|header| {
            !STRIPPED_HEADERS
                .iter()
                .any(|stripped| header.key.eq_ignore_ascii_case(stripped))
        })
        .collect()
}

fn to_reqwest_method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::GET => reqwest::Method::GET,
        HttpMethod::POST => reqwest::Method::POST,
        HttpMethod::PUT => reqwest::Method::PUT,
        HttpMethod::DELETE => reqwest::Method::DELETE,
        HttpMethod::PATCH => reqwest::Method::PATCH,
        HttpMethod::OPTIONS => reqwest::Method::OPTIONS,
        HttpMethod::HEAD => reqwest::Method::HEAD,
    }
}

/// Forwards relay requests to target APIs.
#[derive(Debug, Clone, Default)]
pub struct RelayForwarder {
    client: reqwest::Client,
}

impl RelayForwarder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Performs the outbound call and never fails: errors become a 500 reply.
    pub async fn forward(&self, request: &RelayRequest) -> ForwardReply {
        match self.try_forward(request).await {
            Ok(response) => ForwardReply {
                status: 200,
                response,
            },
            Err(err) => {
                log::warn!(
                    "Relay forwarding of {} {} failed: {}",
                    request.method,
                    request.target_url,
                    err
                );
                ForwardReply::failure(&err)
            }
        }
    }

    async fn try_forward(&self, request: &RelayRequest) -> Result<RelayResponse, ForwardError> {
        let url = target_url(request)?;
        let mut builder = self.client.request(to_reqwest_method(request.method), url);

        for header in forwarded_headers(&request.headers) {
            builder = builder.header(header.key.as_str(), header.value.as_str());
        }

        if request.method.allows_body() {
            builder = builder.body(request.body.clone());
        }

        let response = builder.send().await?;
        let status = response.status();

        let mut headers = HashMap::new();
        for (name, value) in response.headers() {
            if let Ok(value) = value.to_str() {
                headers.insert(name.as_str().to_ascii_lowercase(), value.to_string());
            }
        }

        let body = response.text().await?;
        let error = if status.is_success() {
            None
        } else {
            Some(format!("Target API returned status {}", status.as_u16()))
        };

        Ok(RelayResponse {
            status: Some(status.as_u16()),
            headers: Some(headers),
            body: Some(body),
            error,
        })
    }
}
