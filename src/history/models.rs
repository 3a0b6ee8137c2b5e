//! Data models for request history.

use crate::draft::{RequestDraft, RequestSnapshot};
use crate::models::{non_empty_entries, BodyLanguage, HttpMethod, KeyValueEntry};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A recorded successful request. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryItem {
    /// Unique identifier, UUID v4.
    pub id: String,

    /// Completion time of the recorded submission.
    pub timestamp: DateTime<Utc>,

    pub method: HttpMethod,

    pub url: String,

    /// Headers with a non-empty key.
    pub headers: Vec<KeyValueEntry>,

    /// Query parameters with a non-empty key.
    pub query_params: Vec<KeyValueEntry>,

    pub body: String,

    pub body_language: BodyLanguage,
}

impl HistoryItem {
    /// Captures the request fields of `draft`, dropping rows with an empty key.
    pub fn from_draft(draft: &RequestDraft) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            method: draft.method,
            url: draft.url.clone(),
            headers: non_empty_entries(&draft.headers),
            query_params: non_empty_entries(&draft.query_params),
            body: draft.request_body.clone(),
            body_language: draft.body_language,
        }
    }

    /// The request fields, ready to load back into a draft.
    pub fn to_snapshot(&self) -> RequestSnapshot {
        RequestSnapshot {
            method: self.method,
            url: self.url.clone(),
            headers: self.headers.clone(),
            query_params: self.query_params.clone(),
            body: self.body.clone(),
            body_language: self.body_language,
        }
    }
}
