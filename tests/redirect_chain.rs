//! Redirect chain handling through the full analysis pipeline.
//!
//! A local axum server generates chains of known depth; the analyzer's probe
//! client walks them hop by hop. No real network access.

use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::Path;
use axum::response::{IntoResponse, Redirect};
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;

use linkverdict::error_handling::BackendError;
use linkverdict::verdict::VerdictBackend;
use linkverdict::{Config, DisabledRegistration, LinkAnalyzer};

/// Backend returning a fixed well-formed verdict; keeps the pipeline offline.
struct StaticBackend;

#[async_trait]
impl VerdictBackend for StaticBackend {
    async fn generate(&self, _api_key: &str, _prompt: &str) -> Result<String, BackendError> {
        Ok(r#"{"verdict": "Safe", "confidence": 85, "explanation": "test", "threats_detected": []}"#
            .to_string())
    }
}

/// Serves /redirect/{n}: each hop redirects to n-1 until /redirect/0 returns
/// a plain page.
async fn start_redirect_server() -> String {
    let app = Router::new().route(
        "/redirect/{hop}",
        get(|Path(hop): Path<usize>| async move {
            if hop > 0 {
                Redirect::temporary(&format!("/redirect/{}", hop - 1)).into_response()
            } else {
                "<html><head><title>Landing</title></head><body>done</body></html>"
                    .into_response()
            }
        }),
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

fn test_analyzer() -> Arc<LinkAnalyzer> {
    let config = Config {
        api_keys: vec!["test-key".to_string()],
        timeout_seconds: 5,
        ..Default::default()
    };
    Arc::new(
        LinkAnalyzer::with_parts(&config, Arc::new(StaticBackend), Arc::new(DisabledRegistration))
            .expect("analyzer init"),
    )
}

#[tokio::test]
async fn test_three_hops_is_not_suspicious() {
    let base = start_redirect_server().await;
    let analyzer = test_analyzer();

    let result = analyzer.analyze_url(&format!("{base}/redirect/3")).await;
    assert_eq!(result.redirect_info.redirect_count, 3);
    assert!(!result.redirect_info.suspicious_redirect);
    assert!(result.redirect_info.final_url.ends_with("/redirect/0"));
}

#[tokio::test]
async fn test_four_hops_is_suspicious() {
    let base = start_redirect_server().await;
    let analyzer = test_analyzer();

    let result = analyzer.analyze_url(&format!("{base}/redirect/4")).await;
    assert_eq!(result.redirect_info.redirect_count, 4);
    assert!(result.redirect_info.suspicious_redirect);
    assert!(result.basic_checks.suspicious_redirect);
}

#[tokio::test]
async fn test_no_redirect_reports_zero_hops() {
    let base = start_redirect_server().await;
    let analyzer = test_analyzer();

    let result = analyzer.analyze_url(&format!("{base}/redirect/0")).await;
    assert_eq!(result.redirect_info.redirect_count, 0);
    assert!(!result.redirect_info.suspicious_redirect);
}
