use super::*;

fn test_client(base_url: &str) -> GeminiClient {
    GeminiClient::with_base_url(base_url, "test-model", 30)
        .expect("client construction should not fail")
}

#[test]
fn endpoint_appends_model_path() {
    let client = test_client("https://generativelanguage.googleapis.com");
    assert_eq!(
        client.endpoint().as_str(),
        "https://generativelanguage.googleapis.com/v1beta/models/test-model:generateContent"
    );
}

#[test]
fn endpoint_strips_trailing_slashes() {
    let client = test_client("http://127.0.0.1:8080//");
    assert_eq!(
        client.endpoint().as_str(),
        "http://127.0.0.1:8080/v1beta/models/test-model:generateContent"
    );
}

#[test]
fn endpoint_keeps_base_path_prefix() {
    let client = test_client("https://proxy.example.com/gemini");
    assert_eq!(
        client.endpoint().as_str(),
        "https://proxy.example.com/gemini/v1beta/models/test-model:generateContent"
    );
}

#[test]
fn invalid_base_url_is_rejected() {
    let err = GeminiClient::with_base_url("not a url", "test-model", 30).unwrap_err();
    assert!(matches!(err, ApiFailure::InvalidBaseUrl { .. }), "got {err:?}");
}

#[test]
fn api_failure_reads_google_error_envelope() {
    let body = r#"{"error":{"code":400,"message":"API key not valid.","status":"INVALID_ARGUMENT"}}"#;
    let err = GeminiClient::api_failure(StatusCode::BAD_REQUEST, body);
    match err {
        ApiFailure::Api {
            code,
            status,
            message,
        } => {
            assert_eq!(code, 400);
            assert_eq!(status, "INVALID_ARGUMENT");
            assert_eq!(message, "API key not valid.");
        }
        other => panic!("expected Api, got {other:?}"),
    }
}

#[test]
fn api_failure_falls_back_to_truncated_raw_body() {
    let body = "x".repeat(1_000);
    let err = GeminiClient::api_failure(StatusCode::BAD_GATEWAY, &body);
    match err {
        ApiFailure::Api {
            code,
            status,
            message,
        } => {
            assert_eq!(code, 502);
            assert!(status.is_empty());
            assert_eq!(message.len(), MAX_ERROR_BODY_CHARS);
        }
        other => panic!("expected Api, got {other:?}"),
    }
}
