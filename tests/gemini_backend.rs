//! Gemini backend wire behavior against a local mock endpoint: JSON request
//! body, credential header, envelope extraction, and status mapping.

use axum::extract::Json;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::Router;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use linkverdict::error_handling::BackendError;
use linkverdict::verdict::{GeminiBackend, VerdictBackend};

const API_KEY: &str = "test-key";

/// /generate echoes the prompt back inside a generateContent envelope, but
/// only when the credential header is present; /quota always answers 429.
async fn start_gemini_server() -> String {
    let app = Router::new()
        .route(
            "/generate",
            post(|headers: HeaderMap, Json(body): Json<Value>| async move {
                let authorized = headers
                    .get("x-goog-api-key")
                    .map(|v| v == API_KEY)
                    .unwrap_or(false);
                if !authorized {
                    return (StatusCode::UNAUTHORIZED, Json(json!({})));
                }
                let prompt = body["contents"][0]["parts"][0]["text"]
                    .as_str()
                    .unwrap_or_default();
                let envelope = json!({
                    "candidates": [{
                        "content": { "parts": [{ "text": format!("echo: {prompt}") }] }
                    }]
                });
                (StatusCode::OK, Json(envelope))
            }),
        )
        .route(
            "/quota",
            post(|| async { (StatusCode::TOO_MANY_REQUESTS, Json(json!({}))) }),
        )
        .route(
            "/empty",
            post(|| async { (StatusCode::OK, Json(json!({ "candidates": [] }))) }),
        );

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().expect("Failed to get address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });
    format!("http://{}", addr)
}

#[tokio::test]
async fn test_generate_posts_json_and_sends_credential_header() {
    let base = start_gemini_server().await;
    let backend = GeminiBackend::with_endpoint(reqwest::Client::new(), format!("{base}/generate"));

    // A 200 here means the server saw both the header and the JSON body.
    let text = backend
        .generate(API_KEY, "analyze this")
        .await
        .expect("generate should succeed");
    assert_eq!(text, "echo: analyze this");
}

#[tokio::test]
async fn test_wrong_credential_maps_to_status_error() {
    let base = start_gemini_server().await;
    let backend = GeminiBackend::with_endpoint(reqwest::Client::new(), format!("{base}/generate"));

    let err = backend
        .generate("wrong-key", "analyze this")
        .await
        .expect_err("unauthorized call must fail");
    assert!(matches!(err, BackendError::Status(401)));
}

#[tokio::test]
async fn test_quota_status_maps_to_status_error() {
    let base = start_gemini_server().await;
    let backend = GeminiBackend::with_endpoint(reqwest::Client::new(), format!("{base}/quota"));

    let err = backend
        .generate(API_KEY, "analyze this")
        .await
        .expect_err("429 must fail");
    assert!(matches!(err, BackendError::Status(429)));
}

#[tokio::test]
async fn test_candidate_free_envelope_is_empty_response() {
    let base = start_gemini_server().await;
    let backend = GeminiBackend::with_endpoint(reqwest::Client::new(), format!("{base}/empty"));

    let err = backend
        .generate(API_KEY, "analyze this")
        .await
        .expect_err("empty envelope must fail");
    assert!(matches!(err, BackendError::EmptyResponse));
}
