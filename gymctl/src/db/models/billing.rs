//! Database models for platform billing records.

use crate::api::models::billing::{BillingCreate, BillingStatus, BillingUpdate};
use crate::types::{BillingRecordId, GymId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;

#[derive(Debug, Clone)]
pub struct BillingCreateDBRequest {
    pub gym_id: GymId,
    pub description: String,
    pub amount: Decimal,
    pub due_on: Option<DateTime<Utc>>,
}

impl From<&BillingCreate> for BillingCreateDBRequest {
    fn from(api: &BillingCreate) -> Self {
        Self {
            gym_id: api.gym_id,
            description: api.description.clone(),
            amount: api.amount,
            due_on: api.due_on,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct BillingUpdateDBRequest {
    pub description: Option<String>,
    pub amount: Option<Decimal>,
    pub status: Option<BillingStatus>,
    pub due_on: Option<DateTime<Utc>>,
}

impl From<BillingUpdate> for BillingUpdateDBRequest {
    fn from(api: BillingUpdate) -> Self {
        Self {
            description: api.description,
            amount: api.amount,
            status: api.status,
            due_on: api.due_on,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct BillingDBResponse {
    pub id: BillingRecordId,
    pub gym_id: GymId,
    pub description: String,
    pub amount: Decimal,
    pub status: BillingStatus,
    pub due_on: Option<DateTime<Utc>>,
    pub paid_on: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
