//! Integration tests module for REST Workbench
//!
//! Shared fixtures: logging setup, a scripted relay transport and a
//! recording notifier.

pub mod session_workflow_test;

#[cfg(feature = "native")]
pub mod codegen_http_test;
#[cfg(feature = "native")]
pub mod relay_http_test;

use rest_workbench::notify::{NotificationKind, Notifier};
use rest_workbench::relay::{RelayRequest, RelayTransport, TransportError, TransportReply};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, Once};

static INIT: Once = Once::new();

/// Initialize test environment (run once)
pub fn init_test_env() {
    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

/// Relay transport that replays queued replies and records every request.
///
/// Clones share state, so a test can keep a handle after moving one into a
/// session.
#[derive(Clone, Default)]
pub struct ScriptedRelay {
    replies: Arc<Mutex<VecDeque<Result<TransportReply, TransportError>>>>,
    requests: Arc<Mutex<Vec<RelayRequest>>>,
}

impl ScriptedRelay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a 200 reply from the relay carrying `body` as JSON.
    pub fn reply(&self, body: Value) -> &Self {
        self.replies.lock().unwrap().push_back(Ok(TransportReply {
            status: 200,
            status_text: "OK".to_string(),
            body: body.to_string(),
        }));
        self
    }

    /// Queues a network failure.
    pub fn fail(&self, message: &str) -> &Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(Err(TransportError(message.to_string())));
        self
    }

    pub fn requests(&self) -> Vec<RelayRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl RelayTransport for ScriptedRelay {
    async fn post_relay(&self, request: &RelayRequest) -> Result<TransportReply, TransportError> {
        self.requests.lock().unwrap().push(request.clone());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError("no reply queued".to_string())))
    }
}

/// Notifier that keeps every notification.
#[derive(Default)]
pub struct RecordingNotifier {
    seen: Mutex<Vec<(NotificationKind, String, Option<String>)>>,
}

impl RecordingNotifier {
    pub fn seen(&self) -> Vec<(NotificationKind, String, Option<String>)> {
        self.seen.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, kind: NotificationKind, message: &str, detail: Option<&str>) {
        self.seen
            .lock()
            .unwrap()
            .push((kind, message.to_string(), detail.map(str::to_string)));
    }
}
