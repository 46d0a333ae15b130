//! API request/response models for gyms.

use crate::db::models::gyms::GymDBResponse;
use crate::types::GymId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request to provision a new gym together with its first admin account.
///
/// The gym row and the gym_admin account are created in one transaction; if
/// the admin email is already taken the gym is not created either.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GymCreate {
    /// Human-readable unique code, e.g. "iron-temple"
    pub code: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    /// Email for the gym's first admin account
    pub admin_email: String,
    /// Password for the gym's first admin account
    pub admin_password: String,
    /// Display name for the gym's first admin account
    pub admin_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GymUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GymResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: GymId,
    pub code: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<GymDBResponse> for GymResponse {
    fn from(db: GymDBResponse) -> Self {
        Self {
            id: db.id,
            code: db.code,
            name: db.name,
            email: db.email,
            phone: db.phone,
            address: db.address,
            is_active: db.is_active,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}
