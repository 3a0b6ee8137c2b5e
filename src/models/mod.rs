//! Data models shared by the draft, relay, history and code generation modules.

pub mod entry;
pub mod request;

pub use entry::{non_empty_entries, to_pairs, KeyValue, KeyValueEntry};
pub use request::{BodyLanguage, HttpMethod};
