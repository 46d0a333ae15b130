//! API request/response models for scheduled classes.

use crate::db::models::classes::ClassDBResponse;
use crate::types::{ClassId, GymId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ClassCreate {
    pub name: String,
    pub instructor: Option<String>,
    /// Maximum confirmed-or-pending reservations (default: 20)
    pub capacity: Option<i32>,
    pub scheduled_at: DateTime<Utc>,
    /// Class length in minutes (default: 60)
    pub duration_minutes: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ClassUpdate {
    pub name: Option<String>,
    pub instructor: Option<String>,
    pub capacity: Option<i32>,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub duration_minutes: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ClassResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: ClassId,
    #[schema(value_type = String, format = "uuid")]
    pub gym_id: GymId,
    pub name: String,
    pub instructor: Option<String>,
    pub capacity: i32,
    pub scheduled_at: DateTime<Utc>,
    pub duration_minutes: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ClassDBResponse> for ClassResponse {
    fn from(db: ClassDBResponse) -> Self {
        Self {
            id: db.id,
            gym_id: db.gym_id,
            name: db.name,
            instructor: db.instructor,
            capacity: db.capacity,
            scheduled_at: db.scheduled_at,
            duration_minutes: db.duration_minutes,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}
