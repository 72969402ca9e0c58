//! Integration tests for `GeminiClient` using wiremock HTTP mocks.

use serde_json::json;
use sliedic_gemini::prompt::build_request;
use sliedic_gemini::{classify, ApiFailure, ErrorClass, GeminiClient, GenerateContent};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ENDPOINT: &str = "/v1beta/models/test-model:generateContent";

fn test_client(base_url: &str) -> GeminiClient {
    GeminiClient::with_base_url(base_url, "test-model", 5)
        .expect("client construction should not fail")
}

fn google_error(code: u16, status: &str, message: &str) -> ResponseTemplate {
    ResponseTemplate::new(code).set_body_json(json!({
        "error": { "code": code, "message": message, "status": status }
    }))
}

#[tokio::test]
async fn grounded_request_posts_key_tool_and_term() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .and(header("x-goog-api-key", "test-key"))
        .and(body_partial_json(json!({
            "contents": [{ "role": "user", "parts": [{ "text": "Nájdi ceny pre: Maslo v SR obchodoch." }] }],
            "tools": [{ "googleSearch": {} }],
            "generationConfig": { "thinkingConfig": { "thinkingBudget": 0 } }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": "Odpoveď" }] },
                "groundingMetadata": {
                    "groundingChunks": [{ "web": { "uri": "https://billa.sk", "title": "billa.sk" } }]
                }
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let response = client
        .generate_content("test-key", &build_request("Maslo", true))
        .await
        .expect("should parse response");

    assert_eq!(response.text(), "Odpoveď");
    assert_eq!(response.web_sources().len(), 1);
    assert_eq!(response.web_sources()[0].title, "billa.sk");
}

#[tokio::test]
async fn non_2xx_response_is_decoded_from_error_envelope() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(google_error(
            400,
            "INVALID_ARGUMENT",
            "API key not valid. Please pass a valid API key.",
        ))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .generate_content("bad-key", &build_request("Maslo", true))
        .await
        .expect_err("400 should be an error");

    assert!(
        matches!(err, ApiFailure::Api { code: 400, ref status, .. } if status == "INVALID_ARGUMENT"),
        "got {err:?}"
    );
    assert_eq!(classify(&err), ErrorClass::InvalidCredential);
}

#[tokio::test]
async fn too_many_requests_is_rate_limited() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(google_error(
            429,
            "RESOURCE_EXHAUSTED",
            "You exceeded your current quota.",
        ))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .generate_content("test-key", &build_request("Vajcia", true))
        .await
        .unwrap_err();

    assert_eq!(classify(&err), ErrorClass::RateLimited);
}

#[tokio::test]
async fn plain_text_server_error_is_transport() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .generate_content("test-key", &build_request("Olej", true))
        .await
        .unwrap_err();

    assert!(
        matches!(err, ApiFailure::Api { code: 502, ref message, .. } if message == "Bad Gateway"),
        "got {err:?}"
    );
    assert_eq!(classify(&err), ErrorClass::Transport);
}

#[tokio::test]
async fn malformed_success_body_is_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .generate_content("test-key", &build_request("Pivo", true))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiFailure::Deserialize { .. }), "got {err:?}");
}

#[tokio::test]
async fn unreachable_server_is_http_error() {
    let client = test_client("http://127.0.0.1:1");
    let err = client
        .generate_content("test-key", &build_request("Maslo", true))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiFailure::Http(_)), "got {err:?}");
    assert_eq!(classify(&err), ErrorClass::Transport);
}
