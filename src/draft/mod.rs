//! The in-progress request draft and the reducer that owns its transitions.
//!
//! A session holds a single [`RequestDraft`]. It is changed only through
//! [`reduce`] with a [`DraftAction`], which keeps the query parameter rows
//! and the URL's query string consistent and applies relay outcomes.

pub mod actions;
pub mod reducer;

pub use actions::{DraftAction, EntryField, RequestSnapshot};
pub use reducer::reduce;

use crate::models::{BodyLanguage, HttpMethod, KeyValueEntry};
use serde::{Deserialize, Serialize};

/// Editable request state plus the transient response of the last submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestDraft {
    pub method: HttpMethod,

    /// Request URL. May contain `{{variable}}` references and may be relative.
    pub url: String,

    /// Query parameter rows, always consistent with the query string of `url`.
    pub query_params: Vec<KeyValueEntry>,

    pub headers: Vec<KeyValueEntry>,

    pub request_body: String,

    pub body_language: BodyLanguage,

    pub response_data: Option<String>,

    pub response_status: Option<u16>,

    pub response_content_type: Option<String>,

    pub is_loading: bool,

    pub error: Option<String>,

    /// Number of the submission whose outcome the response fields reflect.
    #[serde(default)]
    pub submission: u64,
}

impl Default for RequestDraft {
    fn default() -> Self {
        Self {
            method: HttpMethod::GET,
            url: String::new(),
            query_params: vec![KeyValueEntry::placeholder()],
            headers: vec![KeyValueEntry::placeholder()],
            request_body: String::new(),
            body_language: BodyLanguage::Json,
            response_data: None,
            response_status: None,
            response_content_type: None,
            is_loading: false,
            error: None,
            submission: 0,
        }
    }
}

impl RequestDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the last completed submission returned a 2xx status.
    pub fn is_success(&self) -> bool {
        !self.is_loading
            && self.error.is_none()
            && self
                .response_status
                .is_some_and(|status| (200..300).contains(&status))
    }

    /// Captures the editable request fields.
    pub fn snapshot(&self) -> RequestSnapshot {
        RequestSnapshot {
            method: self.method,
            url: self.url.clone(),
            headers: self.headers.clone(),
            query_params: self.query_params.clone(),
            body: self.request_body.clone(),
            body_language: self.body_language,
        }
    }
}
