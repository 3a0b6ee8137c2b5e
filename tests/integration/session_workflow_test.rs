//! End-to-end session workflows against a scripted relay
//!
//! Covers submission, response display, history, variables, address sync
//! and snippet generation as a host would drive them.

use super::{init_test_env, RecordingNotifier, ScriptedRelay};
use rest_workbench::codec::encode;
use rest_workbench::codegen::{BuiltinGenerator, LocalCodeGenerator, SnippetState};
use rest_workbench::config::ClientConfig;
use rest_workbench::draft::DraftAction;
use rest_workbench::formatter::{DisplayLanguage, NOT_FOUND_TEXT};
use rest_workbench::models::{HttpMethod, KeyValue, KeyValueEntry};
use rest_workbench::notify::NotificationKind;
use rest_workbench::relay::BODY_NOT_ALLOWED_MESSAGE;
use rest_workbench::session::{Collaborators, Session};
use rest_workbench::storage::{FileStorage, MemoryStorage, SharedStorage};
use rest_workbench::sync::{build_address, Address, MemoryAddressBar};
use rest_workbench::variables::{NewVariable, VariableError};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

type TestSession = Session<ScriptedRelay, LocalCodeGenerator<BuiltinGenerator>>;

fn immediate_config() -> ClientConfig {
    ClientConfig {
        debounce_ms: 0,
        ..ClientConfig::default()
    }
}

fn session_with(storage: SharedStorage, relay: &ScriptedRelay) -> TestSession {
    Session::new(
        immediate_config(),
        Collaborators::new(storage, relay.clone(), LocalCodeGenerator::new(BuiltinGenerator)),
    )
}

fn session_notifying(relay: &ScriptedRelay, notifier: Arc<RecordingNotifier>) -> TestSession {
    Session::new(
        immediate_config(),
        Collaborators::new(
            Arc::new(MemoryStorage::new()),
            relay.clone(),
            LocalCodeGenerator::new(BuiltinGenerator),
        )
        .with_notifier(notifier),
    )
}

fn json_reply(status: u16, body: &str) -> serde_json::Value {
    json!({
        "status": status,
        "headers": { "content-type": "application/json" },
        "body": body
    })
}

#[tokio::test]
async fn test_successful_submission_formats_and_records() {
    init_test_env();

    let relay = ScriptedRelay::new();
    relay.reply(json_reply(201, r#"{"id":7}"#));
    let mut session = session_with(Arc::new(MemoryStorage::new()), &relay);

    session.dispatch(DraftAction::SetMethod(HttpMethod::POST));
    session.dispatch(DraftAction::SetUrl("https://api.test/items?page=2".to_string()));
    session.dispatch(DraftAction::SetRequestBody(r#"{"name":"x"}"#.to_string()));

    assert!(session.submit().await);

    let draft = session.draft();
    assert!(!draft.is_loading);
    assert_eq!(draft.error, None);
    assert_eq!(draft.response_status, Some(201));

    let display = session.response_display();
    assert_eq!(display.display.language, DisplayLanguage::Json);
    assert_eq!(display.display.value, "{\n  \"id\": 7\n}");
    assert!(display.warning.is_none());

    let sent = relay.requests();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].method, HttpMethod::POST);
    assert_eq!(sent[0].target_url, "https://api.test/items");
    assert_eq!(sent[0].query_params, vec![KeyValue::new("page", "2")]);
    assert_eq!(sent[0].body, r#"{"name":"x"}"#);

    let history = session.history();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].method, HttpMethod::POST);
    assert_eq!(history[0].url, "https://api.test/items?page=2");
}

#[tokio::test]
async fn test_get_with_body_is_rejected_without_network() {
    init_test_env();

    let relay = ScriptedRelay::new();
    let mut session = session_with(Arc::new(MemoryStorage::new()), &relay);

    session.dispatch(DraftAction::SetUrl("https://api.test/items".to_string()));
    session.dispatch(DraftAction::SetRequestBody("{}".to_string()));
    session.submit().await;

    let draft = session.draft();
    assert!(!draft.is_loading);
    assert_eq!(draft.error.as_deref(), Some(BODY_NOT_ALLOWED_MESSAGE));
    assert_eq!(draft.response_status, Some(400));
    assert!(relay.requests().is_empty());
    assert!(session.history().is_empty());
}

#[tokio::test]
async fn test_target_not_found_is_reported() {
    init_test_env();

    let relay = ScriptedRelay::new();
    relay.reply(json!({
        "status": 404,
        "error": "Target API returned status 404",
        "body": "nope"
    }));
    let mut session = session_with(Arc::new(MemoryStorage::new()), &relay);

    session.dispatch(DraftAction::SetUrl("https://api.test/missing".to_string()));
    session.submit().await;

    let draft = session.draft();
    assert_eq!(draft.error.as_deref(), Some("Target API returned status 404"));
    assert_eq!(draft.response_status, Some(404));
    assert_eq!(session.response_display().display.value, NOT_FOUND_TEXT);
    assert!(session.history().is_empty());
}

#[tokio::test]
async fn test_network_failure_is_reported() {
    init_test_env();

    let relay = ScriptedRelay::new();
    relay.fail("connection refused");
    let notifier = Arc::new(RecordingNotifier::default());
    let mut session = session_notifying(&relay, notifier.clone());

    session.dispatch(DraftAction::SetUrl("https://api.test/items".to_string()));
    session.submit().await;

    let draft = session.draft();
    assert!(!draft.is_loading);
    assert_eq!(draft.error.as_deref(), Some("connection refused"));
    assert_eq!(draft.response_status, Some(500));

    let seen = notifier.seen();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].0, NotificationKind::Error);
    assert_eq!(seen[0].1, "Request failed: connection refused");
}

#[tokio::test]
async fn test_invalid_json_response_warns() {
    init_test_env();

    let relay = ScriptedRelay::new();
    relay.reply(json_reply(200, "not json"));
    let notifier = Arc::new(RecordingNotifier::default());
    let mut session = session_notifying(&relay, notifier.clone());

    session.dispatch(DraftAction::SetUrl("https://api.test/items".to_string()));
    session.submit().await;

    let display = session.response_display();
    assert_eq!(display.display.language, DisplayLanguage::Plaintext);
    assert_eq!(display.display.value, "not json");

    let seen = notifier.seen();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].0, NotificationKind::Warning);
    assert_eq!(seen[0].1, "Response is not valid JSON");
}

#[tokio::test]
async fn test_superseded_submission_is_dropped() {
    init_test_env();

    let relay = ScriptedRelay::new();
    relay.reply(json_reply(200, r#"{"first":true}"#));
    relay.reply(json_reply(200, r#"{"second":true}"#));
    let mut session = session_with(Arc::new(MemoryStorage::new()), &relay);

    session.dispatch(DraftAction::SetUrl("https://api.test/items".to_string()));
    let first = session.begin_submission();
    let second = session.begin_submission();
    assert!(second.submission() > first.submission());

    let first_done = first.execute().await;
    let second_done = second.execute().await;

    assert!(session.complete(second_done));
    assert!(!session.complete(first_done));

    let draft = session.draft();
    assert!(!draft.is_loading);
    assert_eq!(draft.response_data.as_deref(), Some(r#"{"second":true}"#));
    assert_eq!(session.history().len(), 1);
}

#[tokio::test]
async fn test_variables_are_interpolated_into_url_and_headers() {
    init_test_env();

    let relay = ScriptedRelay::new();
    relay.reply(json_reply(200, "[]"));
    let mut session = session_with(Arc::new(MemoryStorage::new()), &relay);

    session
        .add_variable(NewVariable::new("resource", "users"))
        .unwrap();
    session
        .add_variable(NewVariable::new(" token ", "abc123"))
        .unwrap();
    assert_eq!(session.variables()[1].key, "token");

    session.dispatch(DraftAction::SetUrl(
        "https://api.test/{{resource}}?page=2".to_string(),
    ));
    session.dispatch(DraftAction::SetHeaders(vec![KeyValueEntry::new(
        "Authorization",
        "Bearer {{ token }}",
    )]));
    session.submit().await;

    let sent = relay.requests();
    assert_eq!(sent[0].target_url, "https://api.test/users");
    assert_eq!(sent[0].query_params, vec![KeyValue::new("page", "2")]);
    assert_eq!(
        sent[0].headers,
        vec![KeyValue::new("Authorization", "Bearer abc123")]
    );

    // The draft keeps the template
    assert_eq!(session.draft().url, "https://api.test/{{resource}}?page=2");
}

#[tokio::test]
async fn test_duplicate_variable_key_is_rejected() {
    init_test_env();

    let relay = ScriptedRelay::new();
    let notifier = Arc::new(RecordingNotifier::default());
    let mut session = session_notifying(&relay, notifier.clone());

    let first = session.add_variable(NewVariable::new("host", "a")).unwrap();
    let err = session
        .add_variable(NewVariable::new("host", "b"))
        .unwrap_err();
    assert!(matches!(err, VariableError::DuplicateKey(_)));
    assert_eq!(session.variables().len(), 1);

    let seen = notifier.seen();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].0, NotificationKind::Warning);
    assert_eq!(seen[0].1, "Variable 'host' was not saved");

    assert!(session.delete_variable(&first.id).is_ok());
    assert!(matches!(
        session.delete_variable(&first.id),
        Err(VariableError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_history_restore_rewrites_address_once() {
    init_test_env();

    let storage: SharedStorage = Arc::new(MemoryStorage::new());
    let relay = ScriptedRelay::new();
    relay.reply(json_reply(200, "{}"));

    let mut session = session_with(Arc::clone(&storage), &relay);
    session.dispatch(DraftAction::SetMethod(HttpMethod::PUT));
    session.dispatch(DraftAction::SetUrl("https://api.test/items/1".to_string()));
    session.dispatch(DraftAction::SetRequestBody(r#"{"done":true}"#.to_string()));
    session.submit().await;
    let id = session.history()[0].id.clone();

    // A fresh session sees the persisted history
    let mut restored = session_with(storage, &relay);
    assert_eq!(restored.history().len(), 1);
    assert!(restored.restore_history(&id));

    let draft = restored.draft();
    assert_eq!(draft.method, HttpMethod::PUT);
    assert_eq!(draft.url, "https://api.test/items/1");
    assert_eq!(draft.request_body, r#"{"done":true}"#);

    let address = restored.address();
    assert!(!address.has_restore_flag());
    assert_eq!(
        address.path,
        format!(
            "/en/PUT/{}/{}",
            encode("https://api.test/items/1"),
            encode(r#"{"done":true}"#)
        )
    );

    assert!(!restored.restore_history("missing"));
}

#[tokio::test]
async fn test_hydrate_from_address() {
    init_test_env();

    let headers = vec![KeyValueEntry::new("Accept", "application/json")];
    let address = build_address(
        "en",
        HttpMethod::POST,
        "https://api.test/items?x=1",
        r#"{"a":1}"#,
        &headers,
    );
    let relay = ScriptedRelay::new();
    let mut session: TestSession = Session::new(
        immediate_config(),
        Collaborators::new(
            Arc::new(MemoryStorage::new()),
            relay.clone(),
            LocalCodeGenerator::new(BuiltinGenerator),
        )
        .with_address_bar(MemoryAddressBar::new(address.clone())),
    );

    assert!(session.hydrate_from_address());

    let draft = session.draft();
    assert_eq!(draft.method, HttpMethod::POST);
    assert_eq!(draft.url, "https://api.test/items?x=1");
    assert_eq!(draft.request_body, r#"{"a":1}"#);
    assert_eq!(draft.query_params[0].key, "x");
    assert_eq!(draft.query_params[0].value, "1");
    assert_eq!(draft.headers[0].key, "Accept");

    // The hydrated draft maps back to the same address
    assert!(!session.sync_address());
    assert_eq!(session.address(), address);
}

#[tokio::test]
async fn test_hydrate_ignores_unrelated_address() {
    init_test_env();

    let relay = ScriptedRelay::new();
    let mut session: TestSession = Session::new(
        immediate_config(),
        Collaborators::new(
            Arc::new(MemoryStorage::new()),
            relay.clone(),
            LocalCodeGenerator::new(BuiltinGenerator),
        )
        .with_address_bar(MemoryAddressBar::new(Address::new("/", ""))),
    );

    assert!(!session.hydrate_from_address());
    assert_eq!(session.draft().url, "");
}

#[tokio::test(start_paused = true)]
async fn test_address_follows_debounced_url() {
    init_test_env();

    let relay = ScriptedRelay::new();
    let config = ClientConfig {
        debounce_ms: 500,
        ..ClientConfig::default()
    };
    let mut session: TestSession = Session::new(
        config,
        Collaborators::new(
            Arc::new(MemoryStorage::new()),
            relay.clone(),
            LocalCodeGenerator::new(BuiltinGenerator),
        ),
    );

    session.dispatch(DraftAction::SetUrl("https://api.test/a".to_string()));
    assert_eq!(session.address().path, "/en/GET");

    tokio::time::sleep(Duration::from_millis(600)).await;

    assert!(session.sync_address());
    assert_eq!(
        session.address().path,
        format!("/en/GET/{}", encode("https://api.test/a"))
    );
    assert!(!session.sync_address());
}

#[tokio::test]
async fn test_snippet_refresh() {
    init_test_env();

    let relay = ScriptedRelay::new();
    let mut session = session_with(Arc::new(MemoryStorage::new()), &relay);

    let state = session.refresh_snippet().await.clone();
    assert_eq!(
        state,
        SnippetState::Placeholder("Enter a URL to generate a code snippet".to_string())
    );

    session
        .add_variable(NewVariable::new("id", "42"))
        .unwrap();
    session.dispatch(DraftAction::SetMethod(HttpMethod::DELETE));
    session.dispatch(DraftAction::SetUrl("https://api.test/items/{{id}}".to_string()));

    let state = session.refresh_snippet().await.clone();
    assert_eq!(
        state,
        SnippetState::Ready("curl -X DELETE https://api.test/items/42".to_string())
    );

    session.set_snippet_language("C# - RestSharp");
    let state = session.refresh_snippet().await.clone();
    assert!(matches!(state, SnippetState::Failed { .. }));
    assert_eq!(state.display(), "Code snippet unavailable");
}

#[tokio::test]
async fn test_state_survives_restart_with_file_storage() {
    init_test_env();

    let dir = tempfile::tempdir().unwrap();
    let relay = ScriptedRelay::new();
    relay.reply(json_reply(200, "{}"));

    {
        let storage: SharedStorage = Arc::new(FileStorage::open(dir.path()).unwrap());
        let mut session = session_with(storage, &relay);
        session
            .add_variable(NewVariable::new("base", "https://api.test"))
            .unwrap();
        session.set_code_panel_open(true);
        session.dispatch(DraftAction::SetUrl("https://api.test/ping".to_string()));
        session.submit().await;
    }

    let storage: SharedStorage = Arc::new(FileStorage::open(dir.path()).unwrap());
    let mut session = session_with(storage, &relay);
    assert_eq!(session.variables().len(), 1);
    assert_eq!(session.variables()[0].key, "base");
    assert!(session.code_panel_open());
    assert_eq!(session.history().len(), 1);

    session.clear_history();
    assert!(session.history().is_empty());
}
