//! Workbench session.
//!
//! A [`Session`] owns the request draft and every collaborator that reads or
//! reacts to it: variables, history, the address synchronizer and the code
//! snippet requestor. Each part is handed in explicitly through
//! [`Collaborators`]. All draft changes go through [`Session::dispatch`].
//!
//! Submissions are split in two so the host can keep editing while a request
//! is in flight: [`Session::begin_submission`] marks the draft as loading and
//! returns a [`PendingSubmission`] that runs without borrowing the session,
//! and [`Session::complete`] applies its outcome. Outcomes of superseded
//! submissions are dropped.

use crate::codegen::{CodeGenerator, CodeSnippetRequestor, SnippetState};
use crate::config::ClientConfig;
use crate::draft::{reduce, DraftAction, RequestDraft};
use crate::formatter::{format_draft_response, FormatOutcome};
use crate::history::{search_history, HistoryItem, HistoryRecorder};
use crate::notify::translate::{REQUEST_FAILED, RESPONSE_INVALID_JSON, VARIABLE_REJECTED};
use crate::notify::{DefaultTranslator, LogNotifier, NotificationKind, Notifier, Translator};
use crate::relay::{
    build_relay_request, send_relay_request, RelayRequest, RelaySuccess, RelayTransport, SendError,
};
use crate::storage::{load_code_panel_open, save_code_panel_open, SharedStorage};
use crate::sync::{parse_address, Address, AddressBar, AddressSynchronizer, MemoryAddressBar};
use crate::variables::{check_unique_key, NewVariable, Variable, VariableError, VariableStore};
use std::sync::Arc;
use tokio::sync::watch;

/// External capabilities a session depends on.
pub struct Collaborators<T, G> {
    pub storage: SharedStorage,
    pub transport: T,
    pub generator: G,
    pub address_bar: Box<dyn AddressBar + Send>,
    pub notifier: Arc<dyn Notifier>,
    pub translator: Arc<dyn Translator>,
}

impl<T, G> Collaborators<T, G> {
    /// Collaborators with an in-memory address bar, log notifications and
    /// English messages.
    pub fn new(storage: SharedStorage, transport: T, generator: G) -> Self {
        Self {
            storage,
            transport,
            generator,
            address_bar: Box::new(MemoryAddressBar::default()),
            notifier: Arc::new(LogNotifier),
            translator: Arc::new(DefaultTranslator),
        }
    }

    pub fn with_address_bar(mut self, address_bar: impl AddressBar + Send + 'static) -> Self {
        self.address_bar = Box::new(address_bar);
        self
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn with_translator(mut self, translator: Arc<dyn Translator>) -> Self {
        self.translator = translator;
        self
    }
}

/// A submission that has been started but not yet sent.
pub struct PendingSubmission<T> {
    submission: u64,
    request: Result<RelayRequest, SendError>,
    transport: Arc<T>,
}

impl<T: RelayTransport> PendingSubmission<T> {
    pub fn submission(&self) -> u64 {
        self.submission
    }

    /// The relay request, or the error that stopped it from being built.
    pub fn request(&self) -> &Result<RelayRequest, SendError> {
        &self.request
    }

    /// Sends the request. Validation and interpolation failures complete
    /// without any network call.
    pub async fn execute(self) -> Completion {
        let outcome = match self.request {
            Ok(request) => send_relay_request(self.transport.as_ref(), &request)
                .await
                .map_err(SendError::Rejected),
            Err(err) => Err(err),
        };
        Completion {
            submission: self.submission,
            outcome,
        }
    }
}

/// Outcome of a submission, ready to apply to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub submission: u64,
    pub outcome: Result<RelaySuccess, SendError>,
}

pub struct Session<T, G> {
    config: ClientConfig,
    storage: SharedStorage,
    draft: RequestDraft,
    variables: VariableStore,
    history: HistoryRecorder,
    address: AddressSynchronizer,
    address_bar: Box<dyn AddressBar + Send>,
    snippets: CodeSnippetRequestor,
    transport: Arc<T>,
    generator: G,
    notifier: Arc<dyn Notifier>,
    translator: Arc<dyn Translator>,
    next_submission: u64,
    code_panel_open: bool,
}

impl<T, G> Session<T, G>
where
    T: RelayTransport,
    G: CodeGenerator,
{
    /// Creates a session, loading variables, history and the code panel flag
    /// from storage.
    ///
    /// Debounce timers are spawned on the ambient tokio runtime.
    pub fn new(config: ClientConfig, collaborators: Collaborators<T, G>) -> Self {
        let Collaborators {
            storage,
            transport,
            generator,
            address_bar,
            notifier,
            translator,
        } = collaborators;

        let variables = VariableStore::load(Arc::clone(&storage));
        let history = HistoryRecorder::load(Arc::clone(&storage), config.history_limit);
        let code_panel_open = load_code_panel_open(storage.as_ref());
        let address = AddressSynchronizer::new(config.locale.clone(), config.debounce());
        let snippets = CodeSnippetRequestor::new(
            config.default_snippet_language.clone(),
            config.debounce(),
            Arc::clone(&notifier),
            Arc::clone(&translator),
        );

        log::info!(
            "Session started (relay {}, {} variables, {} history entries)",
            config.relay_endpoint(),
            variables.len(),
            history.len()
        );

        Self {
            config,
            storage,
            draft: RequestDraft::default(),
            variables,
            history,
            address,
            address_bar,
            snippets,
            transport: Arc::new(transport),
            generator,
            notifier,
            translator,
            next_submission: 0,
            code_panel_open,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn draft(&self) -> &RequestDraft {
        &self.draft
    }

    /// Applies a draft action and lets every observer react to it.
    pub fn dispatch(&mut self, action: DraftAction) {
        reduce(&mut self.draft, action);
        self.address.observe(&self.draft);
        self.snippets.observe(&self.draft);
        self.history.observe(&self.draft);
        self.sync_address();
    }

    // Address

    pub fn address(&self) -> Address {
        self.address_bar.current()
    }

    /// Writes the draft's address if it changed. Returns `true` on a write.
    ///
    /// URL and body contribute their debounced values; call this again when
    /// the receivers from [`Session::address_updates`] fire.
    pub fn sync_address(&mut self) -> bool {
        self.address.sync(&self.draft, self.address_bar.as_mut())
    }

    /// Receivers notified when the debounced URL or body settles.
    pub fn address_updates(&self) -> (watch::Receiver<String>, watch::Receiver<String>) {
        self.address.subscribe()
    }

    /// Loads the request encoded in the current address into the draft.
    ///
    /// Returns `false` if the address does not describe a request.
    pub fn hydrate_from_address(&mut self) -> bool {
        let Some(request) = parse_address(&self.address_bar.current()) else {
            return false;
        };

        log::debug!("Hydrating draft from address ({} {})", request.method, request.url);
        reduce(&mut self.draft, DraftAction::SetMethod(request.method));
        reduce(&mut self.draft, DraftAction::SetUrl(request.url));
        reduce(&mut self.draft, DraftAction::SetRequestBody(request.body));
        reduce(&mut self.draft, DraftAction::SetHeaders(request.headers));
        self.address.flush(&self.draft);
        self.snippets.flush(&self.draft);
        true
    }

    // Submission

    /// Starts a new submission against the current draft and variables.
    pub fn begin_submission(&mut self) -> PendingSubmission<T> {
        self.next_submission += 1;
        let submission = self.next_submission;
        let request = build_relay_request(&self.draft, self.variables.variables());

        self.dispatch(DraftAction::RequestStarted { submission });

        PendingSubmission {
            submission,
            request,
            transport: Arc::clone(&self.transport),
        }
    }

    /// Applies a submission outcome. Returns `false` if it was superseded.
    pub fn complete(&mut self, completion: Completion) -> bool {
        let Completion {
            submission,
            outcome,
        } = completion;
        if submission != self.draft.submission {
            log::debug!("Ignoring completion of superseded submission {}", submission);
            return false;
        }

        let action = match outcome {
            Ok(response) => DraftAction::RequestSucceeded {
                submission,
                response,
            },
            Err(SendError::Rejected(failure)) => DraftAction::RequestRejected {
                submission,
                failure,
            },
            Err(SendError::Failed(message)) => DraftAction::RequestFailed {
                submission,
                message,
            },
        };
        self.dispatch(action);

        if let Some(message) = &self.draft.error {
            self.notifier.notify(
                NotificationKind::Error,
                &self
                    .translator
                    .translate(REQUEST_FAILED, &[("message", message.as_str())]),
                None,
            );
        }
        if let Some(warning) = self.response_display().warning {
            self.notifier.notify(
                NotificationKind::Warning,
                &self.translator.translate(RESPONSE_INVALID_JSON, &[]),
                Some(&warning.to_string()),
            );
        }
        true
    }

    /// Sends the draft and applies the outcome.
    pub async fn submit(&mut self) -> bool {
        let pending = self.begin_submission();
        let completion = pending.execute().await;
        self.complete(completion)
    }

    /// Display text derived from the response fields.
    pub fn response_display(&self) -> FormatOutcome {
        format_draft_response(&self.draft)
    }

    // Variables

    pub fn variables(&self) -> &[Variable] {
        self.variables.variables()
    }

    /// Adds a variable after checking its key is non-empty and unused.
    pub fn add_variable(&mut self, new: NewVariable) -> Result<Variable, VariableError> {
        check_unique_key(self.variables.variables(), &new.key, None)
            .map_err(|e| self.reject_variable(&new.key, e))?;
        let key = new.key.trim().to_string();
        Ok(self.variables.add(NewVariable::new(key, new.value)))
    }

    /// Updates a variable after checking its key against the others.
    pub fn update_variable(&mut self, variable: Variable) -> Result<(), VariableError> {
        if self.variables.get(&variable.id).is_none() {
            return Err(VariableError::NotFound(variable.id));
        }
        check_unique_key(self.variables.variables(), &variable.key, Some(&variable.id))
            .map_err(|e| self.reject_variable(&variable.key, e))?;
        self.variables.update(Variable {
            key: variable.key.trim().to_string(),
            ..variable
        });
        Ok(())
    }

    fn reject_variable(&self, key: &str, err: VariableError) -> VariableError {
        self.notifier.notify(
            NotificationKind::Warning,
            &self.translator.translate(VARIABLE_REJECTED, &[("key", key.trim())]),
            Some(&err.to_string()),
        );
        err
    }

    pub fn delete_variable(&mut self, id: &str) -> Result<(), VariableError> {
        if self.variables.delete(id) {
            Ok(())
        } else {
            Err(VariableError::NotFound(id.to_string()))
        }
    }

    // History

    /// History entries, newest first.
    pub fn history(&self) -> Vec<HistoryItem> {
        self.history.entries()
    }

    pub fn search_history(&self, query: &str) -> Vec<HistoryItem> {
        search_history(query, &self.history.entries())
    }

    /// Loads a history entry into the draft.
    ///
    /// The restore flag is held on the address while the draft is replaced,
    /// then the address is rewritten once for the restored request.
    pub fn restore_history(&mut self, id: &str) -> bool {
        let Some(snapshot) = self.history.get(id).map(HistoryItem::to_snapshot) else {
            return false;
        };

        self.address_bar.set_restore_flag(true);
        self.dispatch(DraftAction::LoadRequest(snapshot));
        self.address.flush(&self.draft);
        self.snippets.flush(&self.draft);
        self.address_bar.set_restore_flag(false);
        self.sync_address();
        true
    }

    pub fn delete_history_item(&mut self, id: &str) -> bool {
        self.history.delete(id)
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    // Code snippets

    pub fn snippet(&self) -> &SnippetState {
        self.snippets.state()
    }

    pub fn snippet_language(&self) -> &str {
        self.snippets.language()
    }

    pub fn set_snippet_language(&mut self, language: impl Into<String>) {
        self.snippets.set_language(language);
    }

    /// Regenerates the snippet from the settled URL and body.
    pub async fn refresh_snippet(&mut self) -> &SnippetState {
        self.snippets
            .refresh(&self.draft, self.variables.variables(), &self.generator)
            .await
    }

    pub fn code_panel_open(&self) -> bool {
        self.code_panel_open
    }

    pub fn set_code_panel_open(&mut self, open: bool) {
        self.code_panel_open = open;
        if let Err(e) = save_code_panel_open(self.storage.as_ref(), open) {
            log::warn!("Failed to persist code panel state: {}", e);
        }
    }
}
