//! API request/response models for gym members.

use crate::db::models::members::MemberDBResponse;
use crate::types::{GymId, MemberId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Lifecycle of a member registration.
///
/// Valid transitions: `pending -> active`, `pending -> inactive`,
/// `active <-> inactive`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, ToSchema)]
#[sqlx(type_name = "member_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MemberStatus {
    Pending,
    Active,
    Inactive,
}

impl MemberStatus {
    /// Whether moving to `next` is a legal lifecycle step.
    pub fn can_transition_to(self, next: MemberStatus) -> bool {
        use MemberStatus::*;
        matches!(
            (self, next),
            (Pending, Active) | (Pending, Inactive) | (Active, Inactive) | (Inactive, Active)
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MemberCreate {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MemberUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub status: Option<MemberStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MemberResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: MemberId,
    #[schema(value_type = String, format = "uuid")]
    pub gym_id: GymId,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub status: MemberStatus,
    pub joined_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<MemberDBResponse> for MemberResponse {
    fn from(db: MemberDBResponse) -> Self {
        Self {
            id: db.id,
            gym_id: db.gym_id,
            name: db.name,
            email: db.email,
            phone: db.phone,
            status: db.status,
            joined_at: db.joined_at,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_status_transitions() {
        assert!(MemberStatus::Pending.can_transition_to(MemberStatus::Active));
        assert!(MemberStatus::Pending.can_transition_to(MemberStatus::Inactive));
        assert!(MemberStatus::Active.can_transition_to(MemberStatus::Inactive));
        assert!(MemberStatus::Inactive.can_transition_to(MemberStatus::Active));

        assert!(!MemberStatus::Active.can_transition_to(MemberStatus::Pending));
        assert!(!MemberStatus::Inactive.can_transition_to(MemberStatus::Pending));
    }
}
