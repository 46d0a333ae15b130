//! Database models for the platform audit log.

use crate::types::{AuditLogId, GymId};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone)]
pub struct AuditLogDBRequest {
    pub actor_email: String,
    pub action: String,
    pub entity: String,
    pub detail: Option<String>,
    pub gym_id: Option<GymId>,
}

#[derive(Debug, Clone, FromRow)]
pub struct AuditLogDBResponse {
    pub id: AuditLogId,
    pub actor_email: String,
    pub action: String,
    pub entity: String,
    pub detail: Option<String>,
    pub gym_id: Option<GymId>,
    pub created_at: DateTime<Utc>,
}
