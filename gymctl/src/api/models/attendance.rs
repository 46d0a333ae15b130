//! API request/response models for attendance records.

use crate::db::models::attendance::AttendanceDBResponse;
use crate::types::{AttendanceRecordId, GymId, MemberId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Check-in request. The timestamp defaults to now when omitted.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AttendanceCreate {
    #[schema(value_type = String, format = "uuid")]
    pub member_id: MemberId,
    pub checked_in_at: Option<DateTime<Utc>>,
}

/// Check-out request. The timestamp defaults to now when omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct AttendanceCheckout {
    pub checked_out_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AttendanceResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: AttendanceRecordId,
    #[schema(value_type = String, format = "uuid")]
    pub gym_id: GymId,
    #[schema(value_type = String, format = "uuid")]
    pub member_id: MemberId,
    pub checked_in_at: DateTime<Utc>,
    pub checked_out_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<AttendanceDBResponse> for AttendanceResponse {
    fn from(db: AttendanceDBResponse) -> Self {
        Self {
            id: db.id,
            gym_id: db.gym_id,
            member_id: db.member_id,
            checked_in_at: db.checked_in_at,
            checked_out_at: db.checked_out_at,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}
