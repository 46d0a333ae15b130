//! End-to-end API tests over an in-process server.
//!
//! Each test gets its own migrated database via `#[sqlx::test]` and talks to
//! the full router through `axum_test::TestServer`, so routing, extractors,
//! permission gates, and response shapes are all exercised together.

pub mod auth;
pub mod provisioning;
pub mod reservations;
pub mod subscriptions;
pub mod tenancy;

use crate::test_utils::create_test_app;
use axum::http::{header, HeaderValue};
use sqlx::PgPool;

#[sqlx::test]
#[test_log::test]
async fn test_health_is_unauthenticated(pool: PgPool) {
    let server = create_test_app(pool).await;

    let response = server.get("/api/health").await;
    response.assert_status_ok();
    response.assert_json(&serde_json::json!({ "status": "OK" }));
}

#[sqlx::test]
#[test_log::test]
async fn test_default_wildcard_cors_serves_cross_origin_requests(pool: PgPool) {
    let server = create_test_app(pool).await;

    let response = server
        .get("/api/health")
        .add_header(header::ORIGIN, HeaderValue::from_static("http://console.example.com"))
        .await;
    response.assert_status_ok();
    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN),
        Some(&HeaderValue::from_static("*"))
    );
}
