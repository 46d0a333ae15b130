//! Tenant isolation across the HTTP surface.

use crate::api::models::accounts::Role;
use crate::test_utils::{create_test_account, create_test_app, create_test_gym, create_test_member, token_for};
use axum::http::StatusCode;
use serde_json::Value;
use sqlx::PgPool;

#[sqlx::test]
#[test_log::test]
async fn test_gym_admin_sees_only_their_gym(pool: PgPool) {
    let gym_a = create_test_gym(&pool, "gym-a").await;
    let gym_b = create_test_gym(&pool, "gym-b").await;
    let member_a = create_test_member(&pool, gym_a, "Alice").await;
    let _member_b = create_test_member(&pool, gym_b, "Bob").await;
    let admin_a = create_test_account(&pool, Role::GymAdmin, Some(gym_a)).await;
    let token = token_for(&admin_a);
    let server = create_test_app(pool).await;

    let own = server.get(&format!("/api/gym/{gym_a}/members")).authorization_bearer(&token).await;
    own.assert_status_ok();
    let body: Value = own.json();
    assert_eq!(body["total_count"], 1);
    assert_eq!(body["data"][0]["id"], member_a.to_string());

    // Naming the other gym in the path is a 403, not an empty list
    let other = server.get(&format!("/api/gym/{gym_b}/members")).authorization_bearer(&token).await;
    other.assert_status(StatusCode::FORBIDDEN);
}

#[sqlx::test]
#[test_log::test]
async fn test_cross_tenant_lookup_by_id_forbidden(pool: PgPool) {
    let gym_a = create_test_gym(&pool, "gym-a").await;
    let gym_b = create_test_gym(&pool, "gym-b").await;
    let member_b = create_test_member(&pool, gym_b, "Bob").await;
    let admin_a = create_test_account(&pool, Role::GymAdmin, Some(gym_a)).await;
    let token = token_for(&admin_a);
    let server = create_test_app(pool).await;

    // Straight cross-tenant path: rejected before any lookup
    let direct = server
        .get(&format!("/api/gym/{gym_b}/members/{member_b}"))
        .authorization_bearer(&token)
        .await;
    direct.assert_status(StatusCode::FORBIDDEN);

    // Smuggling the foreign id under the admin's own gym path finds nothing
    let smuggled = server
        .get(&format!("/api/gym/{gym_a}/members/{member_b}"))
        .authorization_bearer(&token)
        .await;
    smuggled.assert_status(StatusCode::NOT_FOUND);
}

#[sqlx::test]
#[test_log::test]
async fn test_operator_crosses_tenants(pool: PgPool) {
    let gym_a = create_test_gym(&pool, "gym-a").await;
    let gym_b = create_test_gym(&pool, "gym-b").await;
    create_test_member(&pool, gym_a, "Alice").await;
    create_test_member(&pool, gym_b, "Bob").await;
    let operator = create_test_account(&pool, Role::PlatformOperator, None).await;
    let token = token_for(&operator);
    let server = create_test_app(pool).await;

    for gym in [gym_a, gym_b] {
        let response = server.get(&format!("/api/gym/{gym}/members")).authorization_bearer(&token).await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["total_count"], 1);
    }
}

#[sqlx::test]
#[test_log::test]
async fn test_gym_admin_rejected_on_platform_routes(pool: PgPool) {
    let gym_a = create_test_gym(&pool, "gym-a").await;
    let admin = create_test_account(&pool, Role::GymAdmin, Some(gym_a)).await;
    let token = token_for(&admin);
    let server = create_test_app(pool).await;

    for path in ["/api/gyms", "/api/billing", "/api/support/tickets", "/api/logs"] {
        let response = server.get(path).authorization_bearer(&token).await;
        response.assert_status(StatusCode::FORBIDDEN);
    }
}

#[sqlx::test]
#[test_log::test]
async fn test_member_role_rejected_on_console_routes(pool: PgPool) {
    let gym_a = create_test_gym(&pool, "gym-a").await;
    let member = create_test_account(&pool, Role::Member, Some(gym_a)).await;
    let token = token_for(&member);
    let server = create_test_app(pool).await;

    let response = server.get(&format!("/api/gym/{gym_a}/members")).authorization_bearer(&token).await;
    response.assert_status(StatusCode::FORBIDDEN);
}

#[sqlx::test]
#[test_log::test]
async fn test_foreign_member_rejected_on_member_writes(pool: PgPool) {
    let gym_a = create_test_gym(&pool, "gym-a").await;
    let gym_b = create_test_gym(&pool, "gym-b").await;
    let member_b = create_test_member(&pool, gym_b, "Bob").await;
    let admin_a = create_test_account(&pool, Role::GymAdmin, Some(gym_a)).await;
    let token = token_for(&admin_a);
    let server = create_test_app(pool).await;

    // The FK on member_id alone would accept these; the handlers must not
    let subscription = server
        .post(&format!("/api/gym/{gym_a}/subscriptions"))
        .authorization_bearer(&token)
        .json(&serde_json::json!({ "member_id": member_b, "plan": "monthly", "amount": "49.99" }))
        .await;
    subscription.assert_status(StatusCode::NOT_FOUND);

    let deposit = server
        .post(&format!("/api/gym/{gym_a}/deposits"))
        .authorization_bearer(&token)
        .json(&serde_json::json!({ "member_id": member_b, "amount": "25.00" }))
        .await;
    deposit.assert_status(StatusCode::NOT_FOUND);

    let check_in = server
        .post(&format!("/api/gym/{gym_a}/attendance"))
        .authorization_bearer(&token)
        .json(&serde_json::json!({ "member_id": member_b }))
        .await;
    check_in.assert_status(StatusCode::NOT_FOUND);

    let locker = server
        .post(&format!("/api/gym/{gym_a}/lockers"))
        .authorization_bearer(&token)
        .json(&serde_json::json!({ "number": "A-1" }))
        .await;
    locker.assert_status(StatusCode::CREATED);
    let locker_id = locker.json::<Value>()["id"].as_str().unwrap().to_string();

    let assignment = server
        .put(&format!("/api/gym/{gym_a}/lockers/{locker_id}"))
        .authorization_bearer(&token)
        .json(&serde_json::json!({ "member_id": member_b }))
        .await;
    assignment.assert_status(StatusCode::NOT_FOUND);
}

#[sqlx::test]
#[test_log::test]
async fn test_double_delete_returns_404(pool: PgPool) {
    let gym_a = create_test_gym(&pool, "gym-a").await;
    let member_a = create_test_member(&pool, gym_a, "Alice").await;
    let admin = create_test_account(&pool, Role::GymAdmin, Some(gym_a)).await;
    let token = token_for(&admin);
    let server = create_test_app(pool).await;

    let first = server
        .delete(&format!("/api/gym/{gym_a}/members/{member_a}"))
        .authorization_bearer(&token)
        .await;
    first.assert_status(StatusCode::NO_CONTENT);

    let second = server
        .delete(&format!("/api/gym/{gym_a}/members/{member_a}"))
        .authorization_bearer(&token)
        .await;
    second.assert_status(StatusCode::NOT_FOUND);
}
