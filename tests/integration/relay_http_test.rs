//! Relay transport and forwarder against mock HTTP servers

use super::init_test_env;
use rest_workbench::models::{HttpMethod, KeyValue};
use rest_workbench::relay::{
    send_relay_request, HttpRelayTransport, RelayForwarder, RelayRequest, RelayTransport,
};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn relay_request(method: HttpMethod, target_url: String) -> RelayRequest {
    RelayRequest {
        method,
        target_url,
        headers: Vec::new(),
        query_params: Vec::new(),
        body: String::new(),
    }
}

#[tokio::test]
async fn test_transport_posts_relay_request_as_json() {
    init_test_env();

    let relay = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/proxy"))
        .and(body_json(json!({
            "method": "GET",
            "targetUrl": "https://api.test/items",
            "headers": [{ "key": "Accept", "value": "application/json" }],
            "queryParams": [{ "key": "page", "value": "2" }],
            "body": ""
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": 200,
            "headers": { "content-type": "application/json" },
            "body": "[1,2]"
        })))
        .expect(1)
        .mount(&relay)
        .await;

    let transport = HttpRelayTransport::new(format!("{}/api/proxy", relay.uri())).unwrap();
    let mut request = relay_request(HttpMethod::GET, "https://api.test/items".to_string());
    request.headers = vec![KeyValue::new("Accept", "application/json")];
    request.query_params = vec![KeyValue::new("page", "2")];

    let success = send_relay_request(&transport, &request).await.unwrap();
    assert_eq!(success.status, Some(200));
    assert_eq!(success.body.as_deref(), Some("[1,2]"));
    assert_eq!(success.content_type.as_deref(), Some("application/json"));
}

#[tokio::test]
async fn test_transport_relay_error_status() {
    init_test_env();

    let relay = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(502).set_body_json(json!({ "error": "upstream down" })),
        )
        .mount(&relay)
        .await;

    let transport = HttpRelayTransport::new(relay.uri()).unwrap();
    let request = relay_request(HttpMethod::GET, "https://api.test/items".to_string());

    let reply = transport.post_relay(&request).await.unwrap();
    assert_eq!(reply.status, 502);
    assert_eq!(reply.status_text, "Bad Gateway");

    let failure = send_relay_request(&transport, &request).await.unwrap_err();
    assert_eq!(failure.status, 502);
    assert_eq!(failure.message, "Error 502: upstream down");
}

#[tokio::test]
async fn test_forwarder_appends_query_and_strips_host() {
    init_test_env();

    let target = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "rust lang"))
        .and(header("x-trace", "abc"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-Total", "1")
                .set_body_raw(r#"{"hits":1}"#, "application/json"),
        )
        .expect(1)
        .mount(&target)
        .await;

    let mut request = relay_request(HttpMethod::GET, format!("{}/search", target.uri()));
    request.headers = vec![
        KeyValue::new("Host", "elsewhere.example.com"),
        KeyValue::new("X-Trace", "abc"),
    ];
    request.query_params = vec![KeyValue::new("q", "rust lang")];
    request.body = "ignored for GET".to_string();

    let reply = RelayForwarder::new().forward(&request).await;
    assert_eq!(reply.status, 200);
    assert_eq!(reply.response.status, Some(200));
    assert_eq!(reply.response.body.as_deref(), Some(r#"{"hits":1}"#));
    assert_eq!(reply.response.error, None);

    let headers = reply.response.headers.unwrap();
    assert_eq!(headers.get("content-type").map(String::as_str), Some("application/json"));
    assert_eq!(headers.get("x-total").map(String::as_str), Some("1"));

    let received = target.received_requests().await.unwrap();
    assert_eq!(received.len(), 1);
    assert!(received[0].body.is_empty());
    let host = received[0].headers.get("host").unwrap().to_str().unwrap();
    assert_ne!(host, "elsewhere.example.com");
}

#[tokio::test]
async fn test_forwarder_sends_body_for_post() {
    init_test_env();

    let target = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/items"))
        .and(body_json(json!({ "name": "x" })))
        .respond_with(ResponseTemplate::new(201).set_body_string("created"))
        .expect(1)
        .mount(&target)
        .await;

    let mut request = relay_request(HttpMethod::POST, format!("{}/items", target.uri()));
    request.headers = vec![KeyValue::new("Content-Type", "application/json")];
    request.body = r#"{"name":"x"}"#.to_string();

    let reply = RelayForwarder::new().forward(&request).await;
    assert_eq!(reply.status, 200);
    assert_eq!(reply.response.status, Some(201));
    assert_eq!(reply.response.body.as_deref(), Some("created"));
}

#[tokio::test]
async fn test_forwarder_reports_target_error_status() {
    init_test_env();

    let target = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such item"))
        .mount(&target)
        .await;

    let request = relay_request(HttpMethod::GET, format!("{}/items/9", target.uri()));
    let reply = RelayForwarder::new().forward(&request).await;

    assert_eq!(reply.status, 200);
    assert_eq!(reply.response.status, Some(404));
    assert_eq!(
        reply.response.error.as_deref(),
        Some("Target API returned status 404")
    );
    assert_eq!(reply.response.body.as_deref(), Some("no such item"));
}

#[tokio::test]
async fn test_forwarder_unreachable_target() {
    init_test_env();

    let request = relay_request(HttpMethod::GET, "http://127.0.0.1:1/items".to_string());
    let reply = RelayForwarder::new().forward(&request).await;

    assert_eq!(reply.status, 500);
    assert_eq!(reply.response.status, Some(500));
    assert!(reply
        .response
        .error
        .unwrap()
        .starts_with("Failed to reach target API"));
}

#[tokio::test]
async fn test_forwarded_reply_round_trips_through_client() {
    init_test_env();

    let target = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/items/3"))
        .respond_with(ResponseTemplate::new(409).set_body_string(r#"{"message":"locked"}"#))
        .mount(&target)
        .await;

    let request = relay_request(HttpMethod::DELETE, format!("{}/items/3", target.uri()));
    let forwarded = RelayForwarder::new().forward(&request).await;

    // Serve the forwarder's reply from a relay endpoint
    let relay = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(forwarded.status).set_body_json(&forwarded.response),
        )
        .mount(&relay)
        .await;

    let transport = HttpRelayTransport::new(relay.uri()).unwrap();
    let failure = send_relay_request(&transport, &request).await.unwrap_err();
    assert_eq!(failure.status, 409);
    assert_eq!(failure.message, "Target API returned status 409");
    assert_eq!(failure.body.as_deref(), Some(r#"{"message":"locked"}"#));
}
