//! Request history: recording, persistence and search.

pub mod models;
pub mod recorder;
pub mod search;

pub use models::HistoryItem;
pub use recorder::HistoryRecorder;
pub use search::{filter_by_method, search_history};
