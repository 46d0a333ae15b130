//! Database models for scheduled classes.

use crate::api::models::classes::{ClassCreate, ClassUpdate};
use crate::types::{ClassId, GymId};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone)]
pub struct ClassCreateDBRequest {
    pub name: String,
    pub instructor: Option<String>,
    pub capacity: Option<i32>,
    pub scheduled_at: DateTime<Utc>,
    pub duration_minutes: Option<i32>,
}

impl From<&ClassCreate> for ClassCreateDBRequest {
    fn from(api: &ClassCreate) -> Self {
        Self {
            name: api.name.clone(),
            instructor: api.instructor.clone(),
            capacity: api.capacity,
            scheduled_at: api.scheduled_at,
            duration_minutes: api.duration_minutes,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ClassUpdateDBRequest {
    pub name: Option<String>,
    pub instructor: Option<String>,
    pub capacity: Option<i32>,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub duration_minutes: Option<i32>,
}

impl From<ClassUpdate> for ClassUpdateDBRequest {
    fn from(api: ClassUpdate) -> Self {
        Self {
            name: api.name,
            instructor: api.instructor,
            capacity: api.capacity,
            scheduled_at: api.scheduled_at,
            duration_minutes: api.duration_minutes,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct ClassDBResponse {
    pub id: ClassId,
    pub gym_id: GymId,
    pub name: String,
    pub instructor: Option<String>,
    pub capacity: i32,
    pub scheduled_at: DateTime<Utc>,
    pub duration_minutes: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
