//! API request/response models for support tickets.

use crate::db::models::support::SupportTicketDBResponse;
use crate::types::{GymId, SupportTicketId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Lifecycle of a support ticket.
///
/// Valid transitions: `open -> in_progress`, `open -> rejected`,
/// `in_progress -> resolved`, `in_progress -> rejected`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, ToSchema)]
#[sqlx(type_name = "ticket_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    Open,
    InProgress,
    Resolved,
    Rejected,
}

impl TicketStatus {
    pub fn can_transition_to(self, next: TicketStatus) -> bool {
        use TicketStatus::*;
        matches!(
            (self, next),
            (Open, InProgress) | (Open, Rejected) | (InProgress, Resolved) | (InProgress, Rejected)
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SupportTicketCreate {
    #[schema(value_type = Option<String>, format = "uuid")]
    pub gym_id: Option<GymId>,
    pub subject: String,
    pub body: Option<String>,
    /// Email or name of whoever raised the ticket.
    pub opened_by: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SupportTicketUpdate {
    pub subject: Option<String>,
    pub body: Option<String>,
    pub status: Option<TicketStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SupportTicketResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: SupportTicketId,
    #[schema(value_type = Option<String>, format = "uuid")]
    pub gym_id: Option<GymId>,
    pub subject: String,
    pub body: Option<String>,
    pub status: TicketStatus,
    pub opened_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<SupportTicketDBResponse> for SupportTicketResponse {
    fn from(db: SupportTicketDBResponse) -> Self {
        Self {
            id: db.id,
            gym_id: db.gym_id,
            subject: db.subject,
            body: db.body,
            status: db.status,
            opened_by: db.opened_by,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticket_transitions() {
        use TicketStatus::*;
        assert!(Open.can_transition_to(InProgress));
        assert!(Open.can_transition_to(Rejected));
        assert!(InProgress.can_transition_to(Resolved));
        assert!(InProgress.can_transition_to(Rejected));
        assert!(!Open.can_transition_to(Resolved));
        assert!(!Resolved.can_transition_to(Open));
        assert!(!Rejected.can_transition_to(InProgress));
    }
}
