//! History recorder.
//!
//! Watches the draft's request lifecycle and records a snapshot whenever a
//! submission finishes with a 2xx status. The log is kept newest-first,
//! capped at a configurable length and written through to storage.

use super::models::HistoryItem;
use crate::draft::RequestDraft;
use crate::storage::{load_json, save_json, SharedStorage, HISTORY_KEY};

pub struct HistoryRecorder {
    items: Vec<HistoryItem>,
    storage: SharedStorage,
    limit: usize,
    was_loading: bool,
    last_recorded: Option<u64>,
}

impl HistoryRecorder {
    /// Loads the log from storage, keeping at most `limit` entries.
    pub fn load(storage: SharedStorage, limit: usize) -> Self {
        let mut items: Vec<HistoryItem> = load_json(storage.as_ref(), HISTORY_KEY);
        items.truncate(limit);
        log::debug!("Loaded {} history entries", items.len());
        Self {
            items,
            storage,
            limit,
            was_loading: false,
            last_recorded: None,
        }
    }

    /// Entries sorted by timestamp, newest first.
    pub fn entries(&self) -> Vec<HistoryItem> {
        let mut entries = self.items.clone();
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        entries
    }

    /// Looks up a history item by id.
    pub fn get(&self, id: &str) -> Option<&HistoryItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Maximum number of items kept.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Feeds the current draft state to the recorder.
    ///
    /// Records once per submission, on the transition out of loading, and
    /// only when the outcome was a 2xx response.
    pub fn observe(&mut self, draft: &RequestDraft) -> Option<HistoryItem> {
        let finished = self.was_loading && !draft.is_loading;
        self.was_loading = draft.is_loading;

        if !finished || !draft.is_success() || self.last_recorded == Some(draft.submission) {
            return None;
        }

        self.last_recorded = Some(draft.submission);
        let item = HistoryItem::from_draft(draft);
        self.add(item.clone());
        Some(item)
    }

    /// Inserts an item at the front of the log and persists.
    pub fn add(&mut self, item: HistoryItem) {
        log::debug!("Recording {} {} in history", item.method, item.url);
        self.items.insert(0, item);
        self.items.truncate(self.limit);
        self.persist();
    }

    /// Removes one entry and persists. Returns `false` if none matched.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        if self.items.len() == before {
            return false;
        }
        self.persist();
        true
    }

    /// Empties the log and removes it from storage.
    pub fn clear(&mut self) {
        self.items.clear();
        if let Err(e) = self.storage.remove(HISTORY_KEY) {
            log::warn!("Failed to remove history from storage: {}", e);
        }
    }

    fn persist(&self) {
        if let Err(e) = save_json(self.storage.as_ref(), HISTORY_KEY, &self.items) {
            log::warn!("Failed to persist history: {}", e);
        }
    }
}
