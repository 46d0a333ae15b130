//! Database models for gym members.

use crate::api::models::members::{MemberCreate, MemberStatus, MemberUpdate};
use crate::types::{GymId, MemberId};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone)]
pub struct MemberCreateDBRequest {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl From<&MemberCreate> for MemberCreateDBRequest {
    fn from(api: &MemberCreate) -> Self {
        Self {
            name: api.name.clone(),
            email: api.email.clone(),
            phone: api.phone.clone(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemberUpdateDBRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub status: Option<MemberStatus>,
}

impl From<MemberUpdate> for MemberUpdateDBRequest {
    fn from(api: MemberUpdate) -> Self {
        Self {
            name: api.name,
            email: api.email,
            phone: api.phone,
            status: api.status,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct MemberDBResponse {
    pub id: MemberId,
    pub gym_id: GymId,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub status: MemberStatus,
    pub joined_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
