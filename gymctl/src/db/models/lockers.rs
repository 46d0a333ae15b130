//! Database models for lockers.

use crate::api::models::lockers::{LockerCreate, LockerStatus, LockerUpdate};
use crate::types::{GymId, LockerId, MemberId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;

#[derive(Debug, Clone)]
pub struct LockerCreateDBRequest {
    pub number: String,
    pub monthly_fee: Option<Decimal>,
}

impl From<&LockerCreate> for LockerCreateDBRequest {
    fn from(api: &LockerCreate) -> Self {
        Self {
            number: api.number.clone(),
            monthly_fee: api.monthly_fee,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct LockerUpdateDBRequest {
    pub member_id: Option<MemberId>,
    pub status: Option<LockerStatus>,
    pub monthly_fee: Option<Decimal>,
}

impl From<LockerUpdate> for LockerUpdateDBRequest {
    fn from(api: LockerUpdate) -> Self {
        Self {
            member_id: api.member_id,
            status: api.status,
            monthly_fee: api.monthly_fee,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct LockerDBResponse {
    pub id: LockerId,
    pub gym_id: GymId,
    pub number: String,
    pub member_id: Option<MemberId>,
    pub status: LockerStatus,
    pub monthly_fee: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
