//! Request relay.
//!
//! The client half turns a draft into a [`RelayRequest`], posts it through a
//! [`RelayTransport`] and classifies the reply. The forwarder half
//! ([`RelayForwarder`]) performs the outbound call on the other side of the
//! relay endpoint.

pub mod client;
pub mod error;
pub mod protocol;
#[cfg(feature = "native")]
pub mod service;
pub mod transport;

pub use client::{
    build_relay_request, classify_reply, classify_transport_error, send_relay_request,
    send_request, validate_body, BODY_NOT_ALLOWED_MESSAGE,
};
pub use error::{ForwardError, SendError, TransportError};
pub use protocol::{
    header_value, RelayFailure, RelayRequest, RelayResponse, RelaySuccess, TransportReply,
};
#[cfg(feature = "native")]
pub use service::{ForwardReply, RelayForwarder};
pub use transport::RelayTransport;
#[cfg(feature = "native")]
pub use transport::HttpRelayTransport;
