//! Login portals and token handling.

use crate::api::models::accounts::Role;
use crate::api::models::auth::LoginResponse;
use crate::test_utils::{create_test_account, create_test_app, create_test_gym, token_for, TEST_PASSWORD};
use axum::http::StatusCode;
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test]
#[test_log::test]
async fn test_operator_login_roundtrip(pool: PgPool) {
    let operator = create_test_account(&pool, Role::PlatformOperator, None).await;
    let server = create_test_app(pool).await;

    let response = server
        .post("/api/auth/login")
        .json(&json!({ "email": operator.email, "password": TEST_PASSWORD }))
        .await;
    response.assert_status_ok();

    let login: LoginResponse = response.json();
    assert!(!login.token.is_empty());
    assert_eq!(login.user.email, operator.email);
    assert_eq!(login.user.role, Role::PlatformOperator);
    assert!(login.user.gym_id.is_none());

    // The issued token works against a protected route
    let gyms = server.get("/api/gyms").authorization_bearer(&login.token).await;
    gyms.assert_status_ok();
}

#[sqlx::test]
#[test_log::test]
async fn test_gym_admin_login_carries_tenant(pool: PgPool) {
    let gym_id = create_test_gym(&pool, "iron-temple").await;
    let admin = create_test_account(&pool, Role::GymAdmin, Some(gym_id)).await;
    let server = create_test_app(pool).await;

    let response = server
        .post("/api/gym-auth/login")
        .json(&json!({ "email": admin.email, "password": TEST_PASSWORD }))
        .await;
    response.assert_status_ok();

    let login: LoginResponse = response.json();
    assert_eq!(login.user.gym_id, Some(gym_id));
    assert_eq!(login.user.gym_name.as_deref(), Some("iron-temple"));
}

/// Unknown email, wrong password, and wrong-portal role must be byte-for-byte
/// indistinguishable so the login form cannot be used to probe accounts.
#[sqlx::test]
#[test_log::test]
async fn test_login_failures_are_indistinguishable(pool: PgPool) {
    let gym_id = create_test_gym(&pool, "iron-temple").await;
    let operator = create_test_account(&pool, Role::PlatformOperator, None).await;
    let admin = create_test_account(&pool, Role::GymAdmin, Some(gym_id)).await;
    let server = create_test_app(pool).await;

    let unknown_email = server
        .post("/api/auth/login")
        .json(&json!({ "email": "nobody@example.com", "password": TEST_PASSWORD }))
        .await;
    let wrong_password = server
        .post("/api/auth/login")
        .json(&json!({ "email": operator.email, "password": "not-the-password" }))
        .await;
    let wrong_portal = server
        .post("/api/auth/login")
        .json(&json!({ "email": admin.email, "password": TEST_PASSWORD }))
        .await;

    for response in [&unknown_email, &wrong_password, &wrong_portal] {
        response.assert_status(StatusCode::UNAUTHORIZED);
    }
    assert_eq!(unknown_email.text(), wrong_password.text());
    assert_eq!(unknown_email.text(), wrong_portal.text());
}

#[sqlx::test]
#[test_log::test]
async fn test_operator_rejected_on_gym_portal(pool: PgPool) {
    let operator = create_test_account(&pool, Role::PlatformOperator, None).await;
    let server = create_test_app(pool).await;

    let response = server
        .post("/api/gym-auth/login")
        .json(&json!({ "email": operator.email, "password": TEST_PASSWORD }))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[sqlx::test]
#[test_log::test]
async fn test_member_rejected_on_gym_portal(pool: PgPool) {
    let gym_id = create_test_gym(&pool, "iron-temple").await;
    let member = create_test_account(&pool, Role::Member, Some(gym_id)).await;
    let server = create_test_app(pool).await;

    let response = server
        .post("/api/gym-auth/login")
        .json(&json!({ "email": member.email, "password": TEST_PASSWORD }))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[sqlx::test]
#[test_log::test]
async fn test_missing_or_garbage_token_rejected(pool: PgPool) {
    let gym_id = create_test_gym(&pool, "iron-temple").await;
    let server = create_test_app(pool).await;

    let no_token = server.get("/api/gyms").await;
    no_token.assert_status(StatusCode::UNAUTHORIZED);

    let garbage = server.get("/api/gyms").authorization_bearer("not.a.jwt").await;
    garbage.assert_status(StatusCode::UNAUTHORIZED);

    let tenant_route = server.get(&format!("/api/gym/{gym_id}/members")).await;
    tenant_route.assert_status(StatusCode::UNAUTHORIZED);
}

#[sqlx::test]
#[test_log::test]
async fn test_token_signed_with_other_secret_rejected(pool: PgPool) {
    let operator = create_test_account(&pool, Role::PlatformOperator, None).await;
    let token = {
        // Same claims, different signing key
        let mut config = crate::test_utils::create_test_config();
        config.secret_key = Some("a-different-secret".to_string());
        let current = crate::api::models::accounts::CurrentAccount {
            id: operator.id,
            email: operator.email.clone(),
            role: operator.role,
            gym_id: None,
            gym_name: None,
        };
        crate::auth::session::create_session_token(&current, &config).unwrap()
    };
    let server = create_test_app(pool).await;

    let response = server.get("/api/gyms").authorization_bearer(&token).await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[sqlx::test]
#[test_log::test]
async fn test_expired_token_rejected(pool: PgPool) {
    use crate::auth::session::SessionClaims;
    use jsonwebtoken::{encode, EncodingKey, Header};

    let operator = create_test_account(&pool, Role::PlatformOperator, None).await;
    let config = crate::test_utils::create_test_config();

    let now = chrono::Utc::now();
    let claims = SessionClaims {
        sub: operator.id,
        email: operator.email.clone(),
        role: operator.role,
        gym_id: None,
        gym_name: None,
        exp: (now - chrono::Duration::hours(1)).timestamp(),
        iat: (now - chrono::Duration::hours(2)).timestamp(),
    };
    let key = EncodingKey::from_secret(config.secret_key.as_ref().unwrap().as_bytes());
    let token = encode(&Header::default(), &claims, &key).unwrap();

    let server = create_test_app(pool).await;
    let response = server.get("/api/gyms").authorization_bearer(&token).await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[sqlx::test]
#[test_log::test]
async fn test_logins_are_audited(pool: PgPool) {
    let operator = create_test_account(&pool, Role::PlatformOperator, None).await;
    let server = create_test_app(pool).await;

    server
        .post("/api/auth/login")
        .json(&json!({ "email": operator.email, "password": TEST_PASSWORD }))
        .await
        .assert_status_ok();

    let token = token_for(&operator);
    let logs = server.get("/api/logs/export").authorization_bearer(&token).await;
    logs.assert_status_ok();

    let entries: serde_json::Value = logs.json();
    let actions: Vec<&str> = entries
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["action"].as_str().unwrap())
        .collect();
    assert!(actions.contains(&"auth.login"));
}
