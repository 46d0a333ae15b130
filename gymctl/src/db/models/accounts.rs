//! Database models for accounts.

use crate::api::models::accounts::Role;
use crate::types::{AccountId, GymId};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database request for creating a new account
#[derive(Debug, Clone)]
pub struct AccountCreateDBRequest {
    pub email: String,
    pub password_hash: String,
    pub display_name: Option<String>,
    pub role: Role,
    pub gym_id: Option<GymId>,
}

/// Database request for updating an account.
///
/// `role` is deliberately absent: roles are immutable after creation.
#[derive(Debug, Clone, Default)]
pub struct AccountUpdateDBRequest {
    pub display_name: Option<String>,
    pub password_hash: Option<String>,
    pub is_active: Option<bool>,
}

/// Database response for an account
#[derive(Debug, Clone, FromRow)]
pub struct AccountDBResponse {
    pub id: AccountId,
    pub email: String,
    pub password_hash: String,
    pub display_name: Option<String>,
    pub role: Role,
    pub gym_id: Option<GymId>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
