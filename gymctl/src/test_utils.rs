//! Shared helpers for the end-to-end API tests.

use crate::api::models::accounts::{CurrentAccount, Role};
use crate::auth::{password, session};
use crate::config::Config;
use crate::db::handlers::Accounts;
use crate::db::models::accounts::{AccountCreateDBRequest, AccountDBResponse};
use crate::types::{GymId, MemberId};
use axum_test::TestServer;
use sqlx::PgPool;
use uuid::Uuid;

/// Every seeded account uses this password so tests can log in through the API.
pub const TEST_PASSWORD: &str = "correct-horse-battery";

pub fn create_test_config() -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        operator_email: "operator@test.com".to_string(),
        operator_password: None,
        secret_key: Some("test-secret-key-for-testing-only".to_string()),
        ..Default::default()
    }
}

/// Spin up an in-process server over a migrated per-test database.
pub async fn create_test_app(pool: PgPool) -> TestServer {
    let app = crate::Application::new_with_pool(create_test_config(), Some(pool))
        .await
        .expect("Failed to create application");
    app.into_test_server()
}

pub async fn create_test_gym(pool: &PgPool, code: &str) -> GymId {
    sqlx::query_scalar("INSERT INTO gyms (code, name) VALUES ($1, $1) RETURNING id")
        .bind(code)
        .fetch_one(pool)
        .await
        .expect("Failed to seed gym")
}

pub async fn create_test_member(pool: &PgPool, gym_id: GymId, name: &str) -> MemberId {
    sqlx::query_scalar("INSERT INTO members (gym_id, name) VALUES ($1, $2) RETURNING id")
        .bind(gym_id)
        .bind(name)
        .fetch_one(pool)
        .await
        .expect("Failed to seed member")
}

pub async fn create_test_account(pool: &PgPool, role: Role, gym_id: Option<GymId>) -> AccountDBResponse {
    let mut conn = pool.acquire().await.expect("Failed to acquire connection");
    let mut repo = Accounts::new(&mut conn);

    let email = format!("acct_{}@example.com", Uuid::new_v4().simple());
    repo.create(&AccountCreateDBRequest {
        email,
        password_hash: password::hash_string(TEST_PASSWORD).expect("Failed to hash password"),
        display_name: Some("Test Account".to_string()),
        role,
        gym_id,
    })
    .await
    .expect("Failed to create test account")
}

/// Mint a session token for a seeded account, bypassing the login endpoint.
pub fn token_for(account: &AccountDBResponse) -> String {
    let current = CurrentAccount {
        id: account.id,
        email: account.email.clone(),
        role: account.role,
        gym_id: account.gym_id,
        gym_name: None,
    };
    session::create_session_token(&current, &create_test_config()).expect("Failed to mint session token")
}
