//! API response models for the platform audit log.

use crate::db::models::logs::AuditLogDBResponse;
use crate::types::{AuditLogId, GymId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuditLogResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: AuditLogId,
    pub actor_email: String,
    pub action: String,
    pub entity: String,
    pub detail: Option<String>,
    #[schema(value_type = Option<String>, format = "uuid")]
    pub gym_id: Option<GymId>,
    pub created_at: DateTime<Utc>,
}

impl From<AuditLogDBResponse> for AuditLogResponse {
    fn from(db: AuditLogDBResponse) -> Self {
        Self {
            id: db.id,
            actor_email: db.actor_email,
            action: db.action,
            entity: db.entity,
            detail: db.detail,
            gym_id: db.gym_id,
            created_at: db.created_at,
        }
    }
}
