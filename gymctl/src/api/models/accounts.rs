//! API request/response models for accounts.

use crate::db::models::accounts::AccountDBResponse;
use crate::types::{AccountId, GymId};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Role held by an account. Stored as a Postgres enum; immutable after creation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, ToSchema)]
#[sqlx(type_name = "account_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Role {
    PlatformOperator,
    GymAdmin,
    Member,
}

/// The authenticated caller, reconstructed from verified JWT claims.
///
/// Verification is pure: no database round-trip happens per request, so any
/// instance sharing the secret key can authenticate a token.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CurrentAccount {
    #[schema(value_type = String, format = "uuid")]
    pub id: AccountId,
    pub email: String,
    pub role: Role,
    /// Tenant the account is bound to (set for gym_admin, absent for operators)
    #[schema(value_type = Option<String>, format = "uuid")]
    pub gym_id: Option<GymId>,
    pub gym_name: Option<String>,
}

impl From<AccountDBResponse> for CurrentAccount {
    fn from(db: AccountDBResponse) -> Self {
        Self {
            id: db.id,
            email: db.email,
            role: db.role,
            gym_id: db.gym_id,
            gym_name: None, // filled in by the login handler when known
        }
    }
}
