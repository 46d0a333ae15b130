//! API request/response models for class reservations.

use crate::db::models::reservations::ReservationDBResponse;
use crate::types::{ClassId, GymId, MemberId, ReservationId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Lifecycle of a reservation.
///
/// Valid transitions: `pending -> confirmed`, `pending -> cancelled`,
/// `confirmed -> cancelled`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, ToSchema)]
#[sqlx(type_name = "reservation_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl ReservationStatus {
    /// Whether moving to `next` is a legal lifecycle step.
    pub fn can_transition_to(self, next: ReservationStatus) -> bool {
        use ReservationStatus::*;
        matches!(
            (self, next),
            (Pending, Confirmed) | (Pending, Cancelled) | (Confirmed, Cancelled)
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReservationCreate {
    #[schema(value_type = String, format = "uuid")]
    pub class_id: ClassId,
    #[schema(value_type = String, format = "uuid")]
    pub member_id: MemberId,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReservationUpdate {
    pub status: Option<ReservationStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReservationResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: ReservationId,
    #[schema(value_type = String, format = "uuid")]
    pub gym_id: GymId,
    #[schema(value_type = String, format = "uuid")]
    pub class_id: ClassId,
    #[schema(value_type = String, format = "uuid")]
    pub member_id: MemberId,
    pub status: ReservationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ReservationDBResponse> for ReservationResponse {
    fn from(db: ReservationDBResponse) -> Self {
        Self {
            id: db.id,
            gym_id: db.gym_id,
            class_id: db.class_id,
            member_id: db.member_id,
            status: db.status,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reservation_transitions() {
        use ReservationStatus::*;
        assert!(Pending.can_transition_to(Confirmed));
        assert!(Pending.can_transition_to(Cancelled));
        assert!(Confirmed.can_transition_to(Cancelled));
        assert!(!Cancelled.can_transition_to(Confirmed));
        assert!(!Confirmed.can_transition_to(Pending));
    }
}
