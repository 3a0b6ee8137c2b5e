//! Code-snippet requestor.
//!
//! Follows the draft with debounced URL and body values, interpolates the
//! request and asks a [`CodeGenerator`] for a snippet. No URL means no remote
//! call and a placeholder is shown instead.

use super::client::CodeGenerator;
use super::protocol::CodegenRequest;
use crate::draft::RequestDraft;
use crate::models::to_pairs;
use crate::notify::translate::{CODEGEN_ENTER_URL, CODEGEN_FAILED, CODEGEN_UNAVAILABLE};
use crate::notify::{NotificationKind, Notifier, Translator};
use crate::sync::Debounced;
use crate::variables::{interpolate, interpolate_entries, InterpolationError, Variable};
use std::sync::Arc;
use std::time::Duration;

/// What the snippet panel shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnippetState {
    /// No URL yet.
    Placeholder(String),

    /// A request to the generator is in flight.
    Loading,

    Ready(String),

    /// The generator failed. The detail went out as a notification.
    Failed { placeholder: String, detail: String },

    /// Interpolation failed. The detail is shown in place of the code.
    InvalidTemplate(String),
}

impl SnippetState {
    /// Text for the snippet panel.
    pub fn display(&self) -> &str {
        match self {
            SnippetState::Placeholder(text) => text,
            SnippetState::Loading => "",
            SnippetState::Ready(code) => code,
            SnippetState::Failed { placeholder, .. } => placeholder,
            SnippetState::InvalidTemplate(detail) => detail,
        }
    }
}

pub struct CodeSnippetRequestor {
    language: String,
    url: Debounced<String>,
    body: Debounced<String>,
    last_url: String,
    last_body: String,
    state: SnippetState,
    notifier: Arc<dyn Notifier>,
    translator: Arc<dyn Translator>,
}

impl CodeSnippetRequestor {
    pub fn new(
        language: impl Into<String>,
        delay: Duration,
        notifier: Arc<dyn Notifier>,
        translator: Arc<dyn Translator>,
    ) -> Self {
        let placeholder = translator.translate(CODEGEN_ENTER_URL, &[]);
        Self {
            language: language.into(),
            url: Debounced::new(String::new(), delay),
            body: Debounced::new(String::new(), delay),
            last_url: String::new(),
            last_body: String::new(),
            state: SnippetState::Placeholder(placeholder),
            notifier,
            translator,
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn set_language(&mut self, language: impl Into<String>) {
        self.language = language.into();
    }

    pub fn state(&self) -> &SnippetState {
        &self.state
    }

    /// Feeds the latest draft. Only URL or body edits restart their timers.
    pub fn observe(&mut self, draft: &RequestDraft) {
        if draft.url != self.last_url {
            self.last_url = draft.url.clone();
            self.url.push(draft.url.clone());
        }
        if draft.request_body != self.last_body {
            self.last_body = draft.request_body.clone();
            self.body.push(draft.request_body.clone());
        }
    }

    /// Settles URL and body immediately.
    pub fn flush(&mut self, draft: &RequestDraft) {
        self.last_url = draft.url.clone();
        self.last_body = draft.request_body.clone();
        self.url.flush(draft.url.clone());
        self.body.flush(draft.request_body.clone());
    }

    /// Whether a URL or body edit is still waiting for its timer.
    pub fn is_pending(&self) -> bool {
        self.url.is_pending() || self.body.is_pending()
    }

    /// Builds the generator request from the settled URL and body.
    ///
    /// Returns `Ok(None)` when there is no URL.
    pub fn prepare(
        &self,
        draft: &RequestDraft,
        variables: &[Variable],
    ) -> Result<Option<CodegenRequest>, InterpolationError> {
        let url = self.url.settled();
        if url.is_empty() {
            return Ok(None);
        }

        let headers = interpolate_entries(&draft.headers, variables)?;
        Ok(Some(CodegenRequest {
            selected_language: self.language.clone(),
            method: draft.method,
            url: interpolate(&url, variables)?,
            headers: to_pairs(&headers),
            request_body: interpolate(&self.body.settled(), variables)?,
        }))
    }

    /// Regenerates the snippet for the current draft.
    pub async fn refresh<G: CodeGenerator + ?Sized>(
        &mut self,
        draft: &RequestDraft,
        variables: &[Variable],
        generator: &G,
    ) -> &SnippetState {
        let request = match self.prepare(draft, variables) {
            Ok(Some(request)) => request,
            Ok(None) => {
                self.state =
                    SnippetState::Placeholder(self.translator.translate(CODEGEN_ENTER_URL, &[]));
                return &self.state;
            }
            Err(err) => {
                self.state = SnippetState::InvalidTemplate(err.to_string());
                return &self.state;
            }
        };

        self.state = SnippetState::Loading;
        self.state = match generator.generate(&request).await {
            Ok(code) => SnippetState::Ready(code),
            Err(err) => {
                let detail = err.to_string();
                self.notifier.notify(
                    NotificationKind::Error,
                    &self.translator.translate(CODEGEN_FAILED, &[]),
                    Some(&detail),
                );
                SnippetState::Failed {
                    placeholder: self.translator.translate(CODEGEN_UNAVAILABLE, &[]),
                    detail,
                }
            }
        };
        &self.state
    }
}
