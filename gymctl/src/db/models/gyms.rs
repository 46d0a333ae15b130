//! Database models for gyms.

use crate::api::models::gyms::{GymCreate, GymUpdate};
use crate::types::GymId;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database request for creating a new gym
#[derive(Debug, Clone)]
pub struct GymCreateDBRequest {
    pub code: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl From<&GymCreate> for GymCreateDBRequest {
    fn from(api: &GymCreate) -> Self {
        Self {
            code: api.code.clone(),
            name: api.name.clone(),
            email: api.email.clone(),
            phone: api.phone.clone(),
            address: api.address.clone(),
        }
    }
}

/// Database request for updating a gym
#[derive(Debug, Clone, Default)]
pub struct GymUpdateDBRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub is_active: Option<bool>,
}

impl From<GymUpdate> for GymUpdateDBRequest {
    fn from(api: GymUpdate) -> Self {
        Self {
            name: api.name,
            email: api.email,
            phone: api.phone,
            address: api.address,
            is_active: api.is_active,
        }
    }
}

/// Database response for a gym
#[derive(Debug, Clone, FromRow)]
pub struct GymDBResponse {
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
