//! Database models for support tickets.

use crate::api::models::support::{SupportTicketCreate, SupportTicketUpdate, TicketStatus};
use crate::types::{GymId, SupportTicketId};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone)]
pub struct SupportTicketCreateDBRequest {
    pub gym_id: Option<GymId>,
    pub subject: String,
    pub body: Option<String>,
    pub opened_by: String,
}

impl From<&SupportTicketCreate> for SupportTicketCreateDBRequest {
    fn from(api: &SupportTicketCreate) -> Self {
        Self {
            gym_id: api.gym_id,
            subject: api.subject.clone(),
            body: api.body.clone(),
            opened_by: api.opened_by.clone(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SupportTicketUpdateDBRequest {
    pub subject: Option<String>,
    pub body: Option<String>,
    pub status: Option<TicketStatus>,
}

impl From<SupportTicketUpdate> for SupportTicketUpdateDBRequest {
    fn from(api: SupportTicketUpdate) -> Self {
        Self {
            subject: api.subject,
            body: api.body,
            status: api.status,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct SupportTicketDBResponse {
    pub id: SupportTicketId,
    pub gym_id: Option<GymId>,
    pub subject: String,
    pub body: Option<String>,
    pub status: TicketStatus,
    pub opened_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
