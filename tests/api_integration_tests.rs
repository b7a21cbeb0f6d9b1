//! Integration Tests for API Endpoints
//!
//! Tests full request/response cycle for each endpoint.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    response::Response,
    Router,
};
use category_cache::{api::create_router, cache::ManualClock, AppState, CacheEngine};
use serde_json::Value;
use tower::ServiceExt;

// == Helper Functions ==

fn create_test_app() -> Router {
    create_router(AppState::new(CacheEngine::new(Some(100), None)))
}

async fn body_to_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn put(app: &Router, uri: &str, body: &str) -> Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn send(app: &Router, method: &str, uri: &str) -> Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}

// == SET Endpoint Tests ==

#[tokio::test]
async fn test_set_endpoint_success() {
    let app = create_test_app();

    let response = put(&app, "/cache/cars/color", r#"{"value":"white"}"#).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(response).await;
    assert_eq!(json["category"], "cars");
    assert_eq!(json["key"], "color");
    assert!(json["message"].as_str().unwrap().contains("cars/color"));
}

#[tokio::test]
async fn test_set_endpoint_structured_value() {
    let app = create_test_app();

    let response = put(&app, "/cache/cars/model", r#"{"value":{"year":2010}}"#).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(&app, "GET", "/cache/cars/model").await;
    let json = body_to_json(response).await;
    assert_eq!(json["value"]["year"], 2010);
}

// == GET Endpoint Tests ==

#[tokio::test]
async fn test_get_endpoint_success() {
    let app = create_test_app();

    put(&app, "/cache/cars/name", r#"{"value":"samand"}"#).await;

    let response = send(&app, "GET", "/cache/cars/name").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(response).await;
    assert_eq!(json["key"], "name");
    assert_eq!(json["value"], "samand");
}

#[tokio::test]
async fn test_get_endpoint_category_not_found() {
    let app = create_test_app();

    let response = send(&app, "GET", "/cache/boats/name").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_to_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("Category not found"));
}

#[tokio::test]
async fn test_get_endpoint_key_not_found() {
    let app = create_test_app();

    put(&app, "/cache/cars/name", r#"{"value":"pride"}"#).await;

    let response = send(&app, "GET", "/cache/cars/model").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_to_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("Key not found"));
}

// == DELETE Endpoint Tests ==

#[tokio::test]
async fn test_delete_endpoint_success() {
    let app = create_test_app();

    put(&app, "/cache/cars/color", r#"{"value":"white"}"#).await;

    let response = send(&app, "DELETE", "/cache/cars/color").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response).await;
    assert_eq!(json["removed"], true);

    let response = send(&app, "GET", "/cache/cars/color").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_endpoint_absent_is_noop() {
    let app = create_test_app();

    let response = send(&app, "DELETE", "/cache/cars/missing").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response).await;
    assert_eq!(json["removed"], false);

    let response = send(&app, "GET", "/cache/cars/missing").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// == Stats / Health Endpoint Tests ==

#[tokio::test]
async fn test_stats_endpoint() {
    let app = create_router(AppState::new(CacheEngine::new(Some(2), None)));

    put(&app, "/cache/cars/a", r#"{"value":1}"#).await;
    put(&app, "/cache/cars/b", r#"{"value":2}"#).await;
    put(&app, "/cache/cars/c", r#"{"value":3}"#).await;
    send(&app, "GET", "/cache/cars/c").await;
    send(&app, "GET", "/cache/cars/a").await;

    let response = send(&app, "GET", "/stats").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(response).await;
    assert_eq!(json["hits"], 1);
    assert_eq!(json["misses"], 1);
    assert_eq!(json["evictions"], 1);
    assert_eq!(json["total_entries"], 2);
    assert_eq!(json["capacity"], 2);
    assert!(json["ttl_secs"].is_null());
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_app();

    let response = send(&app, "GET", "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(response).await;
    assert_eq!(json["status"], "healthy");
    assert!(json["timestamp"].is_string());
}

// == Error Handling Tests ==

#[tokio::test]
async fn test_invalid_json_request() {
    let app = create_test_app();

    let response = put(&app, "/cache/cars/color", "not json").await;
    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn test_missing_value_field() {
    let app = create_test_app();

    let response = put(&app, "/cache/cars/color", r#"{"other":"x"}"#).await;
    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn test_oversized_key_request() {
    let app = create_test_app();
    let uri = format!("/cache/cars/{}", "k".repeat(300));

    let response = put(&app, &uri, r#"{"value":"x"}"#).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_oversized_key_rejected_on_get_and_delete() {
    let app = create_test_app();
    let uri = format!("/cache/cars/{}", "k".repeat(300));

    let response = send(&app, "GET", &uri).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = send(&app, "DELETE", &uri).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_to_json(response).await;
    assert!(json["error"].is_string());

    // Rejected requests never reach the engine
    let json = body_to_json(send(&app, "GET", "/stats").await).await;
    assert_eq!(json["misses"], 0);
}

// == TTL Tests ==

#[tokio::test]
async fn test_ttl_expiration_via_api() {
    let clock = Arc::new(ManualClock::new());
    let engine = CacheEngine::with_clock(None, Some(Duration::from_secs(10)), clock.clone());
    let app = create_router(AppState::new(engine));

    put(&app, "/cache/cars/color", r#"{"value":"blue"}"#).await;

    let response = send(&app, "GET", "/cache/cars/color").await;
    assert_eq!(response.status(), StatusCode::OK);

    clock.advance(Duration::from_secs(15));

    let response = send(&app, "GET", "/cache/cars/color").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_to_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("expired"));

    let response = send(&app, "GET", "/stats").await;
    let json = body_to_json(response).await;
    assert_eq!(json["expirations"], 1);
    assert_eq!(json["total_entries"], 0);
}
