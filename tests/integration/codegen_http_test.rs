//! Remote code generation against a mock endpoint

use super::init_test_env;
use rest_workbench::codegen::{CodeGenerator, CodegenError, CodegenRequest, HttpCodeGenerator};
use rest_workbench::models::{HttpMethod, KeyValue};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn codegen_request() -> CodegenRequest {
    CodegenRequest {
        selected_language: "Python - Requests".to_string(),
        method: HttpMethod::POST,
        url: "https://api.test/items".to_string(),
        headers: vec![KeyValue::new("Content-Type", "application/json")],
        request_body: r#"{"a":1}"#.to_string(),
    }
}

#[tokio::test]
async fn test_http_generator_returns_code() {
    init_test_env();

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/code-generator"))
        .and(body_json(json!({
            "selectedLanguage": "Python - Requests",
            "method": "POST",
            "url": "https://api.test/items",
            "headers": [{ "key": "Content-Type", "value": "application/json" }],
            "requestBody": "{\"a\":1}"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "code": "import requests" })))
        .expect(1)
        .mount(&server)
        .await;

    let generator =
        HttpCodeGenerator::new(format!("{}/api/code-generator", server.uri())).unwrap();
    let code = generator.generate(&codegen_request()).await.unwrap();
    assert_eq!(code, "import requests");
}

#[tokio::test]
async fn test_http_generator_rejection() {
    init_test_env();

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({ "error": "Missing required fields: url" })),
        )
        .mount(&server)
        .await;

    let generator = HttpCodeGenerator::new(server.uri()).unwrap();
    let err = generator.generate(&codegen_request()).await.unwrap_err();
    assert_eq!(
        err,
        CodegenError::Rejected {
            status: 400,
            message: "Missing required fields: url".to_string()
        }
    );
}

#[tokio::test]
async fn test_http_generator_unreachable() {
    init_test_env();

    let generator = HttpCodeGenerator::new("http://127.0.0.1:1/api/code-generator").unwrap();
    let err = generator.generate(&codegen_request()).await.unwrap_err();
    assert!(matches!(err, CodegenError::Transport(_)));
}
