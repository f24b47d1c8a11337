//! Health endpoint and the middleware every route goes through.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{body_json, build_test_app, get, send};
use sqlx::SqlitePool;

const ORIGIN: &str = "http://localhost:5173";

#[sqlx::test(migrations = "../../db/migrations")]
async fn health_reports_database_status(pool: SqlitePool) {
    let response = get(build_test_app(pool), "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["db_healthy"], true);
    assert!(json["version"].is_string());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn health_is_not_under_api_prefix(pool: SqlitePool) {
    let response = get(build_test_app(pool), "/api/v1/health").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn request_id_is_generated(pool: SqlitePool) {
    let response = get(build_test_app(pool), "/health").await;

    let id = response
        .headers()
        .get("x-request-id")
        .expect("x-request-id on every response")
        .to_str()
        .unwrap();
    assert_eq!(id.len(), 36);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn incoming_request_id_is_kept(pool: SqlitePool) {
    let request = Request::builder()
        .uri("/health")
        .header("x-request-id", "trace-me-123")
        .body(Body::empty())
        .unwrap();

    let response = send(build_test_app(pool), request).await;

    assert_eq!(response.headers()["x-request-id"], "trace-me-123");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn cors_preflight_allows_configured_origin(pool: SqlitePool) {
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/v1/checklists")
        .header("Origin", ORIGIN)
        .header("Access-Control-Request-Method", "PUT")
        .header("Access-Control-Request-Headers", "content-type")
        .body(Body::empty())
        .unwrap();

    let response = send(build_test_app(pool), request).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["access-control-allow-origin"], ORIGIN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn cors_exposes_content_disposition(pool: SqlitePool) {
    let request = Request::builder()
        .uri("/api/v1/checklists")
        .header("Origin", ORIGIN)
        .body(Body::empty())
        .unwrap();

    let response = send(build_test_app(pool), request).await;

    let exposed = response.headers()["access-control-expose-headers"]
        .to_str()
        .unwrap()
        .to_ascii_lowercase();
    assert!(exposed.contains("content-disposition"));
}
