//! User-facing notifications and message translation.
//!
//! The workbench reports recoverable problems (a failed snippet, a response
//! that could not be pretty-printed) through a [`Notifier`] and looks up
//! display strings through a [`Translator`]. Presentation is up to the host.

pub mod translate;

pub use translate::{DefaultTranslator, Translator};

use std::fmt;

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    Info,
    Success,
    Warning,
    Error,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Info => "info",
            NotificationKind::Success => "success",
            NotificationKind::Warning => "warning",
            NotificationKind::Error => "error",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Receives notifications meant for the user.
pub trait Notifier: Send + Sync {
    fn notify(&self, kind: NotificationKind, message: &str, detail: Option<&str>);
}

/// Notifier that writes to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, kind: NotificationKind, message: &str, detail: Option<&str>) {
        let text = match detail {
            Some(detail) => format!("{}: {}", message, detail),
            None => message.to_string(),
        };
        match kind {
            NotificationKind::Error => log::error!("{}", text),
            NotificationKind::Warning => log::warn!("{}", text),
            NotificationKind::Info | NotificationKind::Success => log::info!("{}", text),
        }
    }
}
