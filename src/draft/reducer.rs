//! Draft reducer.
//!
//! Invariants maintained here:
//! - `query_params` always mirrors the query string of `url`.
//! - `query_params` and `headers` are never empty; removing the last row
//!   leaves a single placeholder.
//! - Completions for a submission other than the current one are dropped.

use super::actions::{DraftAction, EntryField, RequestSnapshot};
use super::RequestDraft;
use crate::models::entry::ensure_placeholder;
use crate::models::KeyValueEntry;
use crate::sync::{derive_params_from_url, rebuild_url_from_params};

/// Applies `action` to `draft`.
///
/// URL edits re-derive the parameter rows and parameter edits rebuild the
/// URL, so both stay in step after every call. Relay outcomes whose
/// submission number is not the draft's current one leave it unchanged.
///
/// # Arguments
///
/// * `draft` - The draft to update in place
/// * `action` - The change to apply
pub fn reduce(draft: &mut RequestDraft, action: DraftAction) {
    match action {
        DraftAction::SetMethod(method) => draft.method = method,
        DraftAction::SetUrl(url) => {
            draft.query_params = derive_params_from_url(&url);
            draft.url = url;
        }
        DraftAction::SetRequestBody(body) => draft.request_body = body,
        DraftAction::SetBodyLanguage(language) => draft.body_language = language,

        DraftAction::AddQueryParam => draft.query_params.push(KeyValueEntry::placeholder()),
        DraftAction::UpdateQueryParam { id, field, value } => {
            if update_entry(&mut draft.query_params, &id, field, value) {
                draft.url = rebuild_url_from_params(&draft.url, &draft.query_params);
            }
        }
        DraftAction::DeleteQueryParam(id) => {
            if delete_entry(&mut draft.query_params, &id) {
                draft.url = rebuild_url_from_params(&draft.url, &draft.query_params);
            }
        }

        DraftAction::AddHeader => draft.headers.push(KeyValueEntry::placeholder()),
        DraftAction::UpdateHeader { id, field, value } => {
            update_entry(&mut draft.headers, &id, field, value);
        }
        DraftAction::DeleteHeader(id) => {
            delete_entry(&mut draft.headers, &id);
        }
        DraftAction::SetHeaders(headers) => {
            draft.headers = headers;
            ensure_placeholder(&mut draft.headers);
        }

        DraftAction::LoadRequest(snapshot) => load_snapshot(draft, snapshot),

        DraftAction::RequestStarted { submission } => {
            draft.submission = submission;
            draft.response_data = None;
            draft.response_status = None;
            draft.response_content_type = None;
            draft.is_loading = true;
            draft.error = None;
        }
        DraftAction::RequestSucceeded {
            submission,
            response,
        } => {
            if is_current(draft, submission) {
                draft.response_data = response.body;
                draft.response_status = response.status;
                draft.response_content_type = response.content_type;
                draft.error = None;
                draft.is_loading = false;
            }
        }
        DraftAction::RequestRejected {
            submission,
            failure,
        } => {
            if is_current(draft, submission) {
                draft.error = Some(failure.message);
                draft.response_status = Some(failure.status);
                draft.response_data = failure.body;
                draft.response_content_type = None;
                draft.is_loading = false;
            }
        }
        DraftAction::RequestFailed {
            submission,
            message,
        } => {
            if is_current(draft, submission) {
                draft.error = Some(message);
                draft.response_status = None;
                draft.response_data = None;
                draft.response_content_type = None;
                draft.is_loading = false;
            }
        }
    }
}

fn is_current(draft: &RequestDraft, submission: u64) -> bool {
    if draft.submission == submission {
        return true;
    }
    log::debug!(
        "Dropping stale result for submission {} (current is {})",
        submission,
        draft.submission
    );
    false
}

fn update_entry(entries: &mut [KeyValueEntry], id: &str, field: EntryField, value: String) -> bool {
    let Some(entry) = entries.iter_mut().find(|entry| entry.id == id) else {
        return false;
    };
    match field {
        EntryField::Key => entry.key = value,
        EntryField::Value => entry.value = value,
    }
    true
}

fn delete_entry(entries: &mut Vec<KeyValueEntry>, id: &str) -> bool {
    let before = entries.len();
    entries.retain(|entry| entry.id != id);
    let removed = entries.len() != before;
    ensure_placeholder(entries);
    removed
}

fn fresh_rows(entries: Vec<KeyValueEntry>) -> Vec<KeyValueEntry> {
    let mut rows: Vec<KeyValueEntry> = entries
        .into_iter()
        .map(|entry| KeyValueEntry::new(entry.key, entry.value))
        .collect();
    ensure_placeholder(&mut rows);
    rows
}

fn load_snapshot(draft: &mut RequestDraft, snapshot: RequestSnapshot) {
    draft.method = snapshot.method;
    draft.url = snapshot.url;
    draft.headers = fresh_rows(snapshot.headers);
    draft.query_params = fresh_rows(snapshot.query_params);
    draft.request_body = snapshot.body;
    draft.body_language = snapshot.body_language;
}
