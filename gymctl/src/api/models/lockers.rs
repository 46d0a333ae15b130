//! API request/response models for lockers.

use crate::db::models::lockers::LockerDBResponse;
use crate::types::{GymId, LockerId, MemberId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, ToSchema)]
#[sqlx(type_name = "locker_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum LockerStatus {
    Available,
    Occupied,
    Maintenance,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LockerCreate {
    /// Locker number, unique within the gym
    pub number: String,
    #[schema(value_type = Option<String>)]
    pub monthly_fee: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LockerUpdate {
    /// Assign the locker to a member (also set status to occupied)
    #[schema(value_type = Option<String>, format = "uuid")]
    pub member_id: Option<MemberId>,
    pub status: Option<LockerStatus>,
    #[schema(value_type = Option<String>)]
    pub monthly_fee: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LockerResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: LockerId,
    #[schema(value_type = String, format = "uuid")]
    pub gym_id: GymId,
    pub number: String,
    #[schema(value_type = Option<String>, format = "uuid")]
    pub member_id: Option<MemberId>,
    pub status: LockerStatus,
    #[schema(value_type = String)]
    pub monthly_fee: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<LockerDBResponse> for LockerResponse {
    fn from(db: LockerDBResponse) -> Self {
        Self {
            id: db.id,
            gym_id: db.gym_id,
            number: db.number,
            member_id: db.member_id,
            status: db.status,
            monthly_fee: db.monthly_fee,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}
