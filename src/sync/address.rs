//! Draft ↔ visible address synchronization.
//!
//! The visible address mirrors the draft as
//! `/{locale}/{method}[/{encode(url)}[/{encode(body)}]]` with the headers as
//! the query string. Writes are skipped while a `restore` query flag is
//! present, and a write only happens when the candidate differs from the
//! current address, which makes the sync idempotent.

use super::debounce::Debounced;
use crate::codec::{decode, encode};
use crate::draft::RequestDraft;
use crate::models::{HttpMethod, KeyValueEntry};
use std::time::Duration;
use tokio::sync::watch;
use url::form_urlencoded;

/// Query flag set by the history-restore flow to suppress address writes.
pub const RESTORE_FLAG: &str = "restore";

/// A path plus query string (without the leading `?`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Address {
    pub path: String,
    pub query: String,
}

impl Address {
    pub fn new(path: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: query.into(),
        }
    }

    /// Returns `true` if the query string carries the restore flag.
    pub fn has_restore_flag(&self) -> bool {
        form_urlencoded::parse(self.query.as_bytes()).any(|(key, _)| key == RESTORE_FLAG)
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.query.is_empty() {
            write!(f, "{}", self.path)
        } else {
            write!(f, "{}?{}", self.path, self.query)
        }
    }
}

/// The browser-visible address.
pub trait AddressBar {
    /// Reads the current path and query.
    fn current(&self) -> Address;

    /// Replaces path and query without creating a navigation history entry.
    fn replace(&mut self, address: Address);

    /// Sets or clears the restore flag on the current address.
    fn set_restore_flag(&mut self, on: bool) {
        let current = self.current();
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in form_urlencoded::parse(current.query.as_bytes()) {
            if key != RESTORE_FLAG {
                serializer.append_pair(&key, &value);
            }
        }
        if on {
            serializer.append_pair(RESTORE_FLAG, "true");
        }
        self.replace(Address::new(current.path, serializer.finish()));
    }

    fn has_restore_flag(&self) -> bool {
        self.current().has_restore_flag()
    }
}

/// In-memory address bar for headless hosts and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryAddressBar {
    address: Address,
    replacements: usize,
}

impl MemoryAddressBar {
    pub fn new(address: Address) -> Self {
        Self {
            address,
            replacements: 0,
        }
    }

    /// Number of times the address has been replaced.
    pub fn replacements(&self) -> usize {
        self.replacements
    }
}

impl AddressBar for MemoryAddressBar {
    fn current(&self) -> Address {
        self.address.clone()
    }

    fn replace(&mut self, address: Address) {
        self.address = address;
        self.replacements += 1;
    }
}

/// Builds the candidate address for a request.
///
/// The body segment is only emitted when a URL segment precedes it. Headers
/// become an `application/x-www-form-urlencoded` query, the same encoding a
/// browser's `URLSearchParams` writes: reserved bytes are percent-encoded
/// and a space is written as `+`.
pub fn build_address(
    locale: &str,
    method: HttpMethod,
    url: &str,
    body: &str,
    headers: &[KeyValueEntry],
) -> Address {
    let mut path = format!("/{}/{}", locale, method.as_str());
    if !url.is_empty() {
        path.push('/');
        path.push_str(&encode(url));
        if !body.is_empty() {
            path.push('/');
            path.push_str(&encode(body));
        }
    }

    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for header in headers.iter().filter(|h| !h.key.is_empty()) {
        serializer.append_pair(&header.key, &header.value);
    }

    Address::new(path, serializer.finish())
}

/// Writes `candidate` to the address bar unless a restore is in progress or
/// the address already matches. Returns `true` if the address was replaced.
pub fn sync_address<B: AddressBar + ?Sized>(bar: &mut B, candidate: &Address) -> bool {
    if bar.has_restore_flag() {
        log::debug!("Address sync skipped: restore in progress");
        return false;
    }

    if bar.current() == *candidate {
        return false;
    }

    bar.replace(candidate.clone());
    true
}

/// Request fields carried by a visible address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressRequest {
    pub locale: String,
    pub method: HttpMethod,
    pub url: String,
    pub body: String,
    pub headers: Vec<KeyValueEntry>,
}

/// Decodes an address produced by [`build_address`].
///
/// Returns `None` if the path has no locale and method segments or the
/// method is not supported. The restore flag is not treated as a header.
pub fn parse_address(address: &Address) -> Option<AddressRequest> {
    let mut segments = address.path.split('/').filter(|s| !s.is_empty());

    let locale = segments.next()?.to_string();
    let method = segments.next()?.parse::<HttpMethod>().ok()?;
    let url = segments.next().map(decode).unwrap_or_default();
    let body = segments.next().map(decode).unwrap_or_default();

    let headers = form_urlencoded::parse(address.query.as_bytes())
        .filter(|(key, _)| key != RESTORE_FLAG)
        .map(|(key, value)| KeyValueEntry::new(key, value))
        .collect();

    Some(AddressRequest {
        locale,
        method,
        url,
        body,
        headers,
    })
}

/// Keeps the visible address in step with the draft.
///
/// Method and header changes apply immediately; URL and body changes are
/// debounced so typing does not rewrite the address on every keystroke.
pub struct AddressSynchronizer {
    locale: String,
    url: Debounced<String>,
    body: Debounced<String>,
    last_url: String,
    last_body: String,
}

impl AddressSynchronizer {
    pub fn new(locale: impl Into<String>, delay: Duration) -> Self {
        Self {
            locale: locale.into(),
            url: Debounced::new(String::new(), delay),
            body: Debounced::new(String::new(), delay),
            last_url: String::new(),
            last_body: String::new(),
        }
    }

    pub fn locale(&self) -> &str {
        &self.locale
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

    /// Settles URL and body immediately, e.g. after hydrating from the address.
    pub fn flush(&mut self, draft: &RequestDraft) {
        self.last_url = draft.url.clone();
        self.last_body = draft.request_body.clone();
        self.url.flush(draft.url.clone());
        self.body.flush(draft.request_body.clone());
    }

    /// The address the draft currently maps to.
    pub fn candidate(&self, draft: &RequestDraft) -> Address {
        build_address(
            &self.locale,
            draft.method,
            &self.url.settled(),
            &self.body.settled(),
            &draft.headers,
        )
    }

    /// Writes the candidate address if needed. Returns `true` on a write.
    pub fn sync<B: AddressBar + ?Sized>(&self, draft: &RequestDraft, bar: &mut B) -> bool {
        sync_address(bar, &self.candidate(draft))
    }

    /// Receivers notified when the debounced URL or body settles.
    pub fn subscribe(&self) -> (watch::Receiver<String>, watch::Receiver<String>) {
        (self.url.subscribe(), self.body.subscribe())
    }
}
