//! Subscription lifecycle through the API, including read-time expiry.

use crate::api::models::accounts::Role;
use crate::api::models::subscriptions::{SubscriptionResponse, SubscriptionStatus};
use crate::test_utils::{create_test_account, create_test_app, create_test_gym, create_test_member, token_for};
use axum::http::StatusCode;
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test]
#[test_log::test]
async fn test_lifecycle_and_lazy_expiry(pool: PgPool) {
    let gym = create_test_gym(&pool, "iron-temple").await;
    let alice = create_test_member(&pool, gym, "Alice").await;
    let admin = create_test_account(&pool, Role::GymAdmin, Some(gym)).await;
    let token = token_for(&admin);
    let server = create_test_app(pool).await;

    let created = server
        .post(&format!("/api/gym/{gym}/subscriptions"))
        .authorization_bearer(&token)
        .json(&json!({ "member_id": alice, "plan": "monthly", "amount": "49.99" }))
        .await;
    created.assert_status(StatusCode::CREATED);
    let subscription: SubscriptionResponse = created.json();
    assert_eq!(subscription.status, SubscriptionStatus::Pending);

    // Activate with an expiry already in the past
    let activated = server
        .put(&format!("/api/gym/{gym}/subscriptions/{}", subscription.id))
        .authorization_bearer(&token)
        .json(&json!({ "status": "active", "expires_on": "2020-01-01T00:00:00Z" }))
        .await;
    activated.assert_status_ok();

    // The stored row says active; the read path reports expired. No background
    // job is involved.
    let fetched = server
        .get(&format!("/api/gym/{gym}/subscriptions/{}", subscription.id))
        .authorization_bearer(&token)
        .await;
    let fetched: SubscriptionResponse = fetched.json();
    assert_eq!(fetched.status, SubscriptionStatus::Expired);
}

#[sqlx::test]
#[test_log::test]
async fn test_illegal_transition_rejected(pool: PgPool) {
    let gym = create_test_gym(&pool, "iron-temple").await;
    let alice = create_test_member(&pool, gym, "Alice").await;
    let admin = create_test_account(&pool, Role::GymAdmin, Some(gym)).await;
    let token = token_for(&admin);
    let server = create_test_app(pool).await;

    let subscription: SubscriptionResponse = server
        .post(&format!("/api/gym/{gym}/subscriptions"))
        .authorization_bearer(&token)
        .json(&json!({ "member_id": alice, "plan": "monthly", "amount": "49.99" }))
        .await
        .json();

    // pending -> cancelled skips activation and is rejected
    let response = server
        .put(&format!("/api/gym/{gym}/subscriptions/{}", subscription.id))
        .authorization_bearer(&token)
        .json(&json!({ "status": "cancelled" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    // Repeating the current status is a no-op, not an error
    let same = server
        .put(&format!("/api/gym/{gym}/subscriptions/{}", subscription.id))
        .authorization_bearer(&token)
        .json(&json!({ "status": "pending" }))
        .await;
    same.assert_status_ok();
}
