//! REST Workbench core
//!
//! Request state, variable interpolation and relay client for a browser-based
//! REST API workbench. Hosts compose requests through a [`Session`], which
//! keeps the draft in step with the visible address, resolves `{{variable}}`
//! references at submission time, sends the request through a same-origin
//! relay and derives display text and code snippets from the result.
//!
//! # Architecture
//!
//! - **codec**: URL-safe text encoding for address path segments
//! - **models**: HTTP methods, body languages and key/value rows
//! - **storage**: Key-value persistence port with memory and file backends
//! - **variables**: Variable store, interpolation and key checks
//! - **draft**: The request draft and its reducer
//! - **sync**: URL ↔ query params, draft ↔ address, debounced values
//! - **relay**: Relay client, transport port and the relay forwarder
//! - **formatter**: Response display formatting
//! - **history**: History recording and search
//! - **codegen**: Code snippet requests, target resolution and generators
//! - **notify**: Notification and translation interfaces
//! - **config**: Configuration schema and loading
//! - **session**: The state container wiring everything together
//!
//! # Example
//!
//! ```no_run
//! use rest_workbench::codegen::{BuiltinGenerator, LocalCodeGenerator};
//! use rest_workbench::config::load_config;
//! use rest_workbench::draft::DraftAction;
//! use rest_workbench::relay::HttpRelayTransport;
//! use rest_workbench::session::{Collaborators, Session};
//! use rest_workbench::storage::MemoryStorage;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config(None)?;
//! let transport = HttpRelayTransport::from_config(&config)?;
//! let generator = LocalCodeGenerator::new(BuiltinGenerator);
//! let storage = Arc::new(MemoryStorage::new());
//!
//! let mut session = Session::new(config, Collaborators::new(storage, transport, generator));
//! session.dispatch(DraftAction::SetUrl("https://api.example.com/users?page=1".to_string()));
//! session.submit().await;
//!
//! println!("{}", session.response_display().display.value);
//! # Ok(())
//! # }
//! ```

pub mod codec;
pub mod codegen;
pub mod config;
pub mod draft;
pub mod formatter;
pub mod history;
pub mod models;
pub mod notify;
pub mod relay;
pub mod session;
pub mod storage;
pub mod sync;
pub mod variables;

pub use config::ClientConfig;
pub use draft::{DraftAction, RequestDraft};
pub use models::{BodyLanguage, HttpMethod, KeyValue, KeyValueEntry};
pub use session::{Collaborators, Completion, PendingSubmission, Session};
