//! Search and filtering over history entries.

use super::models::HistoryItem;
use crate::models::HttpMethod;

/// Case-insensitive substring search over URL, method and body.
///
/// An empty query matches everything. Results keep their input order.
pub fn search_history(query: &str, entries: &[HistoryItem]) -> Vec<HistoryItem> {
    if query.is_empty() {
        return entries.to_vec();
    }

    let query_lower = query.to_lowercase();

    entries
        .iter()
        .filter(|entry| matches_query(entry, &query_lower))
        .cloned()
        .collect()
}

fn matches_query(entry: &HistoryItem, query_lower: &str) -> bool {
    entry.url.to_lowercase().contains(query_lower)
        || entry.method.as_str().to_lowercase().contains(query_lower)
        || entry.body.to_lowercase().contains(query_lower)
}

/// Entries recorded with `method`.
pub fn filter_by_method(method: HttpMethod, entries: &[HistoryItem]) -> Vec<HistoryItem> {
    entries
        .iter()
        .filter(|entry| entry.method == method)
        .cloned()
        .collect()
}
