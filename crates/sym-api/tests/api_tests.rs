//! API Integration Tests

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    response::Response,
};
use httpmock::prelude::*;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use sym_api::{
    create_router, create_router_for_testing, create_router_with_pipeline, state::AppState,
};
use sym_core::{AppConfig, ExtractionEngine, SymError, Symptom};
use sym_extractor::{KeywordEngine, ModelBackedEngine, SymptomPipeline};
use tower::ServiceExt;

/// Helper to create a test request
fn create_json_request(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json");

    match body {
        Some(json_body) => builder
            .body(Body::from(serde_json::to_string(&json_body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Router with default extraction settings and custom server settings
fn create_router_with_config(config: AppConfig) -> axum::Router {
    create_router(Arc::new(AppState::new(config).unwrap()))
}

async fn body_json(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

/// Engine failing with a fixed error
struct FailingEngine {
    unavailable: bool,
}

#[async_trait]
impl ExtractionEngine for FailingEngine {
    fn name(&self) -> &'static str {
        "failing"
    }

    async fn extract(&self, _normalized_text: &str) -> sym_core::Result<Vec<Symptom>> {
        if self.unavailable {
            Err(SymError::ExtractionUnavailable("model offline".to_string()))
        } else {
            Err(SymError::Other(anyhow::anyhow!("tensor shape mismatch")))
        }
    }
}

// =============================================================================
// Health Check Tests
// =============================================================================

#[tokio::test]
async fn test_health_check() {
    let app = create_router_for_testing();

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["engine"], "stub");
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let app = create_router_for_testing();

    let response = app
        .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert!(json["uptime_seconds"].is_number());
    assert!(json["total_requests"].is_number());
    assert!(json["failed_requests"].is_number());
}

#[tokio::test]
async fn test_openapi_document() {
    let app = create_router_for_testing();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api-docs/openapi.json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["paths"]["/extract-symptoms"]["post"].is_object());
}

// =============================================================================
// Extraction API Tests
// =============================================================================

#[tokio::test]
async fn test_extract_symptoms_stub() {
    let app = create_router_for_testing();

    let request = create_json_request(
        "POST",
        "/extract-symptoms",
        Some(json!({ "text": "I have a fever and headache" })),
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(
        json,
        json!({
            "symptoms": ["Fever", "Headache"],
            "specializations": ["General Physician"]
        })
    );
}

#[tokio::test]
async fn test_extract_symptoms_keyword_engine() {
    let app = create_router_with_pipeline(SymptomPipeline::with_engine(Arc::new(
        KeywordEngine::new(),
    )));

    let request = create_json_request(
        "POST",
        "/extract-symptoms",
        Some(json!({ "text": "Bad migraines and feeling dizzy all week" })),
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["symptoms"], json!(["Migraine", "Dizziness"]));
    assert_eq!(json["specializations"], json!(["Neurology", "General Physician"]));
}

#[tokio::test]
async fn test_extract_symptoms_none_found() {
    let app = create_router_with_pipeline(SymptomPipeline::with_engine(Arc::new(
        KeywordEngine::new(),
    )));

    let request = create_json_request(
        "POST",
        "/extract-symptoms",
        Some(json!({ "text": "Just booking my yearly checkup" })),
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["symptoms"], json!([]));
    assert_eq!(json["specializations"], json!([]));
}

#[tokio::test]
async fn test_extract_symptoms_empty_text() {
    let app = create_router_for_testing();

    let request = create_json_request("POST", "/extract-symptoms", Some(json!({ "text": "" })));

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error"], "invalid_input");
    assert!(json["message"].is_string());
}

#[tokio::test]
async fn test_extract_symptoms_whitespace_text() {
    let app = create_router_for_testing();

    let request = create_json_request(
        "POST",
        "/extract-symptoms",
        Some(json!({ "text": "  \n\t " })),
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_extract_symptoms_too_long() {
    let app = create_router_for_testing();

    let request = create_json_request(
        "POST",
        "/extract-symptoms",
        Some(json!({ "text": "a".repeat(10_001) })),
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error"], "invalid_input");
    assert!(json["message"].as_str().unwrap().contains("10000"));
}

#[tokio::test]
async fn test_extract_symptoms_missing_field() {
    let app = create_router_for_testing();

    let request = create_json_request(
        "POST",
        "/extract-symptoms",
        Some(json!({ "symptoms": "fever" })),
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "invalid_input");
}

#[tokio::test]
async fn test_extract_symptoms_malformed_json() {
    let app = create_router_for_testing();

    let request = Request::builder()
        .method("POST")
        .uri("/extract-symptoms")
        .header("Content-Type", "application/json")
        .body(Body::from("{\"text\": "))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "invalid_input");
}

#[tokio::test]
async fn test_extract_symptoms_engine_timeout() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/extract-symptoms");
            then.status(200)
                .delay(Duration::from_millis(500))
                .json_body(json!({ "symptoms": ["Fever"] }));
        })
        .await;

    let engine =
        ModelBackedEngine::new(server.url("/extract-symptoms"), Duration::from_millis(50))
            .unwrap();
    let app = create_router_with_pipeline(SymptomPipeline::with_engine(Arc::new(engine)));

    let request = create_json_request(
        "POST",
        "/extract-symptoms",
        Some(json!({ "text": "I have a fever" })),
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body_json(response).await["error"], "extraction_unavailable");
}

#[tokio::test]
async fn test_extract_symptoms_engine_unavailable() {
    let app = create_router_with_pipeline(SymptomPipeline::with_engine(Arc::new(
        FailingEngine { unavailable: true },
    )));

    let request = create_json_request(
        "POST",
        "/extract-symptoms",
        Some(json!({ "text": "fever" })),
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let json = body_json(response).await;
    assert_eq!(json["error"], "extraction_unavailable");
    assert_eq!(json["message"], "model offline");
}

#[tokio::test]
async fn test_extract_symptoms_unexpected_error() {
    let app = create_router_with_pipeline(SymptomPipeline::with_engine(Arc::new(
        FailingEngine { unavailable: false },
    )));

    let request = create_json_request(
        "POST",
        "/extract-symptoms",
        Some(json!({ "text": "fever" })),
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = body_json(response).await;
    assert_eq!(json["error"], "internal_error");
    assert_eq!(json["message"], "Internal server error");
}

#[tokio::test]
async fn test_metrics_count_failures() {
    let app = create_router_for_testing();

    let bad = create_json_request("POST", "/extract-symptoms", Some(json!({ "text": "" })));
    let response = app.clone().oneshot(bad).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let json = body_json(response).await;

    // The metrics request itself is recorded after its body is built
    assert_eq!(json["total_requests"], 1);
    assert_eq!(json["failed_requests"], 1);
}

// =============================================================================
// Body Limit and CORS Tests
// =============================================================================

#[tokio::test]
async fn test_oversized_body_rejected() {
    let mut config = AppConfig::default();
    config.server.max_body_size = 64;
    let app = create_router_with_config(config);

    // Well under the character limit, over the byte limit
    let request = create_json_request(
        "POST",
        "/extract-symptoms",
        Some(json!({ "text": "fever ".repeat(40) })),
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "invalid_input");
}

#[tokio::test]
async fn test_body_within_limit_accepted() {
    let mut config = AppConfig::default();
    config.server.max_body_size = 64;
    let app = create_router_with_config(config);

    let request = create_json_request(
        "POST",
        "/extract-symptoms",
        Some(json!({ "text": "fever" })),
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_cors_allows_configured_origin_only() {
    let mut config = AppConfig::default();
    config.server.cors_origins = vec!["http://clinic.test".to_string()];
    let app = create_router_with_config(config);

    let allowed = Request::builder()
        .uri("/health")
        .header("Origin", "http://clinic.test")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(allowed).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["access-control-allow-origin"],
        "http://clinic.test"
    );

    let other = Request::builder()
        .uri("/health")
        .header("Origin", "http://elsewhere.test")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(other).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .get("access-control-allow-origin")
        .is_none());
}

#[tokio::test]
async fn test_cors_disabled_by_default() {
    let app = create_router_for_testing();

    let request = Request::builder()
        .uri("/health")
        .header("Origin", "http://clinic.test")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert!(response
        .headers()
        .get("access-control-allow-origin")
        .is_none());
}
