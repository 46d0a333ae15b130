//! Class reservation capacity over the HTTP surface.

use crate::api::models::accounts::Role;
use crate::api::models::classes::ClassResponse;
use crate::api::models::reservations::ReservationResponse;
use crate::test_utils::{create_test_account, create_test_app, create_test_gym, create_test_member, token_for};
use axum::http::StatusCode;
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test]
#[test_log::test]
async fn test_capacity_enforced_and_freed_by_cancellation(pool: PgPool) {
    let gym = create_test_gym(&pool, "iron-temple").await;
    let alice = create_test_member(&pool, gym, "Alice").await;
    let bob = create_test_member(&pool, gym, "Bob").await;
    let admin = create_test_account(&pool, Role::GymAdmin, Some(gym)).await;
    let token = token_for(&admin);
    let server = create_test_app(pool).await;

    let class: ClassResponse = server
        .post(&format!("/api/gym/{gym}/classes"))
        .authorization_bearer(&token)
        .json(&json!({
            "name": "Spin",
            "capacity": 1,
            "scheduled_at": "2030-01-15T18:00:00Z"
        }))
        .await
        .json();

    let first = server
        .post(&format!("/api/gym/{gym}/reservations"))
        .authorization_bearer(&token)
        .json(&json!({ "class_id": class.id, "member_id": alice }))
        .await;
    first.assert_status(StatusCode::CREATED);
    let reservation: ReservationResponse = first.json();

    // The only seat is taken
    let second = server
        .post(&format!("/api/gym/{gym}/reservations"))
        .authorization_bearer(&token)
        .json(&json!({ "class_id": class.id, "member_id": bob }))
        .await;
    second.assert_status(StatusCode::CONFLICT);

    // Cancelling frees the seat
    server
        .put(&format!("/api/gym/{gym}/reservations/{}", reservation.id))
        .authorization_bearer(&token)
        .json(&json!({ "status": "cancelled" }))
        .await
        .assert_status_ok();

    let third = server
        .post(&format!("/api/gym/{gym}/reservations"))
        .authorization_bearer(&token)
        .json(&json!({ "class_id": class.id, "member_id": bob }))
        .await;
    third.assert_status(StatusCode::CREATED);
}

#[sqlx::test]
#[test_log::test]
async fn test_reservation_for_unknown_class_or_member_404s(pool: PgPool) {
    let gym = create_test_gym(&pool, "iron-temple").await;
    let alice = create_test_member(&pool, gym, "Alice").await;
    let admin = create_test_account(&pool, Role::GymAdmin, Some(gym)).await;
    let token = token_for(&admin);
    let server = create_test_app(pool).await;

    let unknown_class = server
        .post(&format!("/api/gym/{gym}/reservations"))
        .authorization_bearer(&token)
        .json(&json!({ "class_id": uuid::Uuid::new_v4(), "member_id": alice }))
        .await;
    unknown_class.assert_status(StatusCode::NOT_FOUND);

    let class: ClassResponse = server
        .post(&format!("/api/gym/{gym}/classes"))
        .authorization_bearer(&token)
        .json(&json!({ "name": "Spin", "scheduled_at": "2030-01-15T18:00:00Z" }))
        .await
        .json();

    let unknown_member = server
        .post(&format!("/api/gym/{gym}/reservations"))
        .authorization_bearer(&token)
        .json(&json!({ "class_id": class.id, "member_id": uuid::Uuid::new_v4() }))
        .await;
    unknown_member.assert_status(StatusCode::NOT_FOUND);
}

#[sqlx::test]
#[test_log::test]
async fn test_confirmed_to_pending_is_illegal(pool: PgPool) {
    let gym = create_test_gym(&pool, "iron-temple").await;
    let alice = create_test_member(&pool, gym, "Alice").await;
    let admin = create_test_account(&pool, Role::GymAdmin, Some(gym)).await;
    let token = token_for(&admin);
    let server = create_test_app(pool).await;

    let class: ClassResponse = server
        .post(&format!("/api/gym/{gym}/classes"))
        .authorization_bearer(&token)
        .json(&json!({ "name": "Spin", "scheduled_at": "2030-01-15T18:00:00Z" }))
        .await
        .json();

    let reservation: ReservationResponse = server
        .post(&format!("/api/gym/{gym}/reservations"))
        .authorization_bearer(&token)
        .json(&json!({ "class_id": class.id, "member_id": alice }))
        .await
        .json();

    server
        .put(&format!("/api/gym/{gym}/reservations/{}", reservation.id))
        .authorization_bearer(&token)
        .json(&json!({ "status": "confirmed" }))
        .await
        .assert_status_ok();

    let backwards = server
        .put(&format!("/api/gym/{gym}/reservations/{}", reservation.id))
        .authorization_bearer(&token)
        .json(&json!({ "status": "pending" }))
        .await;
    backwards.assert_status(StatusCode::BAD_REQUEST);
}
