//! Relay client error types.

use super::protocol::RelayFailure;
use std::fmt;

/// Outcome of a submission that did not succeed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendError {
    /// A structured failure with status and optional raw body.
    ///
    /// Covers validation failures, relay transport failures, target API
    /// failures and network errors.
    Rejected(RelayFailure),

    /// An unstructured failure raised before any network activity, such as
    /// an interpolation error.
    Failed(String),
}

impl fmt::Display for SendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SendError::Rejected(failure) => {
                write!(f, "{} (status {})", failure.message, failure.status)
            }
            SendError::Failed(message) => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for SendError {}

/// The relay (or code generation) endpoint could not be reached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportError(pub String);

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Transport error: {}", self.0)
    }
}

impl std::error::Error for TransportError {}

#[cfg(feature = "native")]
impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        TransportError(err.to_string())
    }
}

/// The relay forwarder could not complete the outbound call.
#[derive(Debug)]
pub enum ForwardError {
    /// The target URL could not be parsed.
    InvalidUrl(url::ParseError),

    /// The outbound request failed before a response arrived.
    Outbound(String),
}

impl fmt::Display for ForwardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ForwardError::InvalidUrl(err) => write!(f, "Invalid target URL: {}", err),
            ForwardError::Outbound(msg) => write!(f, "Failed to reach target API: {}", msg),
        }
    }
}

impl std::error::Error for ForwardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ForwardError::InvalidUrl(err) => Some(err),
            ForwardError::Outbound(_) => None,
        }
    }
}

impl From<url::ParseError> for ForwardError {
    fn from(err: url::ParseError) -> Self {
        ForwardError::InvalidUrl(err)
    }
}

#[cfg(feature = "native")]
impl From<reqwest::Error> for ForwardError {
    fn from(err: reqwest::Error) -> Self {
        ForwardError::Outbound(err.to_string())
    }
}
