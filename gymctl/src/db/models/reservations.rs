//! Database models for class reservations.

use crate::api::models::reservations::{ReservationCreate, ReservationStatus, ReservationUpdate};
use crate::types::{ClassId, GymId, MemberId, ReservationId};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone)]
pub struct ReservationCreateDBRequest {
    pub class_id: ClassId,
    pub member_id: MemberId,
}

impl From<&ReservationCreate> for ReservationCreateDBRequest {
    fn from(api: &ReservationCreate) -> Self {
        Self {
            class_id: api.class_id,
            member_id: api.member_id,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ReservationUpdateDBRequest {
    pub status: Option<ReservationStatus>,
}

impl From<ReservationUpdate> for ReservationUpdateDBRequest {
    fn from(api: ReservationUpdate) -> Self {
        Self { status: api.status }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct ReservationDBResponse {
    pub id: ReservationId,
    pub gym_id: GymId,
    pub class_id: ClassId,
    pub member_id: MemberId,
    pub status: ReservationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
