//! Relay client: builds the relay request from a draft, sends it and sorts
//! the reply into success, target failure or transport failure.

use super::error::{SendError, TransportError};
use super::protocol::{
    header_value, RelayFailure, RelayRequest, RelayResponse, RelaySuccess, TransportReply,
};
use super::transport::RelayTransport;
use crate::draft::RequestDraft;
use crate::models::{to_pairs, HttpMethod};
use crate::sync::{derive_params_from_url, strip_query};
use crate::variables::{interpolate, interpolate_entries, Variable};
use serde_json::Value;

/// Message for a GET or HEAD submission that carries a body.
pub const BODY_NOT_ALLOWED_MESSAGE: &str = "Request body is not allowed for GET/HEAD methods";

const BODY_NOT_ALLOWED_DETAIL: &str =
    "Remove the request body or switch to a method that supports a body, such as POST, PUT or PATCH.";

const UNKNOWN_NETWORK_ERROR: &str = "unknown network error";

const FALLBACK_STATUS: u16 = 500;

/// Rejects a body on methods that cannot carry one.
pub fn validate_body(method: HttpMethod, body: &str) -> Result<(), RelayFailure> {
    if !method.allows_body() && !body.is_empty() {
        return Err(RelayFailure::new(
            BODY_NOT_ALLOWED_MESSAGE,
            400,
            Some(BODY_NOT_ALLOWED_DETAIL.to_string()),
        ));
    }
    Ok(())
}

/// Builds the relay request for `draft`.
///
/// Validation runs first, then the target URL and header values are
/// interpolated against `variables`. The body and query parameters are
/// forwarded as written. When the draft has no keyed parameters, the query
/// of the interpolated URL is forwarded instead.
pub fn build_relay_request(
    draft: &RequestDraft,
    variables: &[Variable],
) -> Result<RelayRequest, SendError> {
    validate_body(draft.method, &draft.request_body).map_err(SendError::Rejected)?;

    let target_url =
        interpolate(&draft.url, variables).map_err(|e| SendError::Failed(e.to_string()))?;
    let headers = interpolate_entries(&draft.headers, variables)
        .map_err(|e| SendError::Failed(e.to_string()))?;

    // A URL that only parses after interpolation still carries its own query.
    let mut query_params = to_pairs(&draft.query_params);
    if query_params.is_empty() {
        query_params = to_pairs(&derive_params_from_url(&target_url));
    }

    Ok(RelayRequest {
        method: draft.method,
        target_url: strip_query(&target_url),
        headers: to_pairs(&headers),
        query_params,
        body: draft.request_body.clone(),
    })
}

/// Sends a prepared relay request and classifies the outcome.
pub async fn send_relay_request<T: RelayTransport + ?Sized>(
    transport: &T,
    request: &RelayRequest,
) -> Result<RelaySuccess, RelayFailure> {
    match transport.post_relay(request).await {
        Ok(reply) => classify_reply(reply),
        Err(err) => Err(classify_transport_error(err)),
    }
}

/// Builds, sends and classifies a submission of `draft`.
///
/// # Arguments
///
/// * `transport` - Carries the relay request to the relay endpoint
/// * `draft` - The request being submitted
/// * `variables` - Variables interpolated into the URL and header values
///
/// # Returns
///
/// The relay's success payload, `SendError::Rejected` for validation and
/// relay failures, or `SendError::Failed` if interpolation fails before
/// anything is sent.
pub async fn send_request<T: RelayTransport + ?Sized>(
    transport: &T,
    draft: &RequestDraft,
    variables: &[Variable],
) -> Result<RelaySuccess, SendError> {
    let request = build_relay_request(draft, variables)?;
    send_relay_request(transport, &request)
        .await
        .map_err(SendError::Rejected)
}

/// Maps a network-level failure to a structured failure.
pub fn classify_transport_error(err: TransportError) -> RelayFailure {
    let message = if err.0.is_empty() {
        UNKNOWN_NETWORK_ERROR.to_string()
    } else {
        err.0
    };
    RelayFailure::new(message, FALLBACK_STATUS, None)
}

/// Classifies a raw relay reply.
pub fn classify_reply(reply: TransportReply) -> Result<RelaySuccess, RelayFailure> {
    if !reply.is_success() {
        let detail = error_detail(&reply.body).unwrap_or_else(|| reply.status_text.clone());
        return Err(RelayFailure::new(
            format!("Error {}: {}", reply.status, detail),
            reply.status,
            Some(reply.body),
        ));
    }

    let response: RelayResponse = serde_json::from_str(&reply.body)
        .map_err(|e| RelayFailure::new(e.to_string(), FALLBACK_STATUS, None))?;

    if let Some(error) = response.error {
        let status = response
            .status
            .filter(|status| *status != 0)
            .unwrap_or(FALLBACK_STATUS);
        return Err(RelayFailure::new(error, status, response.body));
    }

    let headers = response.headers.unwrap_or_default();
    let content_type = header_value(&headers, "content-type").map(str::to_string);

    Ok(RelaySuccess {
        body: response.body,
        status: response.status,
        headers,
        content_type,
    })
}

/// Pulls a human-readable message out of a JSON error body.
fn error_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ["error", "message"]
        .iter()
        .find_map(|field| value.get(field).and_then(Value::as_str))
        .map(str::to_string)
}
