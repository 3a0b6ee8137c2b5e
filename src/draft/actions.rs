//! Actions accepted by the draft reducer.

use crate::models::{BodyLanguage, HttpMethod, KeyValueEntry};
use crate::relay::{RelayFailure, RelaySuccess};
use serde::{Deserialize, Serialize};

/// Which half of a key/value row an edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryField {
    Key,
    Value,
}

/// The editable part of a request, as stored in history or restored from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestSnapshot {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<KeyValueEntry>,
    pub query_params: Vec<KeyValueEntry>,
    pub body: String,
    pub body_language: BodyLanguage,
}

/// A change to the request draft.
#[derive(Debug, Clone, PartialEq)]
pub enum DraftAction {
    SetMethod(HttpMethod),

    /// Sets the URL and re-derives the query parameter rows from it.
    SetUrl(String),

    SetRequestBody(String),

    SetBodyLanguage(BodyLanguage),

    /// Appends an empty query parameter row.
    AddQueryParam,

    /// Edits one query parameter row and rebuilds the URL's query string.
    UpdateQueryParam {
        id: String,
        field: EntryField,
        value: String,
    },

    /// Removes a query parameter row and rebuilds the URL's query string.
    DeleteQueryParam(String),

    AddHeader,

    UpdateHeader {
        id: String,
        field: EntryField,
        value: String,
    },

    DeleteHeader(String),

    /// Replaces every header row.
    SetHeaders(Vec<KeyValueEntry>),

    /// Loads a stored request into the draft, e.g. when restoring history.
    LoadRequest(RequestSnapshot),

    /// A submission started: clears the previous response.
    RequestStarted { submission: u64 },

    RequestSucceeded {
        submission: u64,
        response: RelaySuccess,
    },

    /// The submission failed with a structured payload.
    RequestRejected {
        submission: u64,
        failure: RelayFailure,
    },

    /// The submission failed without a structured payload.
    RequestFailed { submission: u64, message: String },
}
