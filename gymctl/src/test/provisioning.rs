//! Gym provisioning lifecycle: create, admin login, deactivate.

use crate::api::models::accounts::Role;
use crate::api::models::auth::LoginResponse;
use crate::api::models::gyms::GymResponse;
use crate::test_utils::{create_test_account, create_test_app, token_for};
use axum::http::StatusCode;
use serde_json::{json, Value};
use sqlx::PgPool;

fn gym_payload(code: &str, admin_email: &str) -> Value {
    json!({
        "code": code,
        "name": "Iron Temple",
        "email": "front-desk@irontemple.com",
        "admin_email": admin_email,
        "admin_password": "a-long-enough-password",
        "admin_name": "Front Desk"
    })
}

#[sqlx::test]
#[test_log::test]
async fn test_provisioning_flow(pool: PgPool) {
    let operator = create_test_account(&pool, Role::PlatformOperator, None).await;
    let token = token_for(&operator);
    let server = create_test_app(pool).await;

    let created = server
        .post("/api/gyms")
        .authorization_bearer(&token)
        .json(&gym_payload("iron-temple", "admin@irontemple.com"))
        .await;
    created.assert_status(StatusCode::CREATED);
    let gym: GymResponse = created.json();
    assert_eq!(gym.code, "iron-temple");
    assert!(gym.is_active);

    // The admin account minted alongside the gym can log in immediately
    let login = server
        .post("/api/gym-auth/login")
        .json(&json!({ "email": "admin@irontemple.com", "password": "a-long-enough-password" }))
        .await;
    login.assert_status_ok();
    let session: LoginResponse = login.json();
    assert_eq!(session.user.gym_id, Some(gym.id));

    // And is scoped to the new gym
    let members = server
        .get(&format!("/api/gym/{}/members", gym.id))
        .authorization_bearer(&session.token)
        .await;
    members.assert_status_ok();

    // Provisioning left an audit trail
    let logs = server.get("/api/logs/export").authorization_bearer(&token).await;
    let entries: Value = logs.json();
    assert!(entries
        .as_array()
        .unwrap()
        .iter()
        .any(|e| e["action"] == "gym.created" && e["detail"] == "code=iron-temple"));
}

#[sqlx::test]
#[test_log::test]
async fn test_duplicate_admin_email_rolls_back_gym(pool: PgPool) {
    let operator = create_test_account(&pool, Role::PlatformOperator, None).await;
    let token = token_for(&operator);
    let server = create_test_app(pool).await;

    let conflict = server
        .post("/api/gyms")
        .authorization_bearer(&token)
        .json(&gym_payload("iron-temple", &operator.email))
        .await;
    conflict.assert_status(StatusCode::CONFLICT);

    // The gym row must not survive the failed account insert
    let gyms = server.get("/api/gyms").authorization_bearer(&token).await;
    let body: Value = gyms.json();
    assert_eq!(body["total_count"], 0);
}

#[sqlx::test]
#[test_log::test]
async fn test_duplicate_gym_code_conflicts(pool: PgPool) {
    let operator = create_test_account(&pool, Role::PlatformOperator, None).await;
    let token = token_for(&operator);
    let server = create_test_app(pool).await;

    server
        .post("/api/gyms")
        .authorization_bearer(&token)
        .json(&gym_payload("iron-temple", "first@irontemple.com"))
        .await
        .assert_status(StatusCode::CREATED);

    let duplicate = server
        .post("/api/gyms")
        .authorization_bearer(&token)
        .json(&gym_payload("iron-temple", "second@irontemple.com"))
        .await;
    duplicate.assert_status(StatusCode::CONFLICT);
}

#[sqlx::test]
#[test_log::test]
async fn test_short_admin_password_rejected(pool: PgPool) {
    let operator = create_test_account(&pool, Role::PlatformOperator, None).await;
    let token = token_for(&operator);
    let server = create_test_app(pool).await;

    let mut payload = gym_payload("iron-temple", "admin@irontemple.com");
    payload["admin_password"] = json!("short");

    let response = server.post("/api/gyms").authorization_bearer(&token).json(&payload).await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[sqlx::test]
#[test_log::test]
async fn test_deactivation_locks_out_admins(pool: PgPool) {
    let operator = create_test_account(&pool, Role::PlatformOperator, None).await;
    let token = token_for(&operator);
    let server = create_test_app(pool).await;

    let created = server
        .post("/api/gyms")
        .authorization_bearer(&token)
        .json(&gym_payload("iron-temple", "admin@irontemple.com"))
        .await;
    let gym: GymResponse = created.json();

    let deleted = server
        .delete(&format!("/api/gyms/{}", gym.id))
        .authorization_bearer(&token)
        .await;
    deleted.assert_status(StatusCode::NO_CONTENT);

    // Admin credentials stop working the moment the gym is deactivated
    let login = server
        .post("/api/gym-auth/login")
        .json(&json!({ "email": "admin@irontemple.com", "password": "a-long-enough-password" }))
        .await;
    login.assert_status(StatusCode::UNAUTHORIZED);

    // Deactivation is not repeatable
    let again = server
        .delete(&format!("/api/gyms/{}", gym.id))
        .authorization_bearer(&token)
        .await;
    again.assert_status(StatusCode::NOT_FOUND);

    let logs = server.get("/api/logs/export").authorization_bearer(&token).await;
    let entries: Value = logs.json();
    assert!(entries.as_array().unwrap().iter().any(|e| e["action"] == "gym.deactivated"));
}
