//! Database models for attendance records.

use crate::api::models::attendance::{AttendanceCheckout, AttendanceCreate};
use crate::types::{AttendanceRecordId, GymId, MemberId};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone)]
pub struct AttendanceCreateDBRequest {
    pub member_id: MemberId,
    pub checked_in_at: Option<DateTime<Utc>>,
}

impl From<&AttendanceCreate> for AttendanceCreateDBRequest {
    fn from(api: &AttendanceCreate) -> Self {
        Self {
            member_id: api.member_id,
            checked_in_at: api.checked_in_at,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AttendanceCheckoutDBRequest {
    pub checked_out_at: Option<DateTime<Utc>>,
}

impl From<AttendanceCheckout> for AttendanceCheckoutDBRequest {
    fn from(api: AttendanceCheckout) -> Self {
        Self {
            checked_out_at: api.checked_out_at,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct AttendanceDBResponse {
    pub id: AttendanceRecordId,
    pub gym_id: GymId,
    pub member_id: MemberId,
    pub checked_in_at: DateTime<Utc>,
    pub checked_out_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
