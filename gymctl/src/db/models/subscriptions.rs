//! Database models for member subscriptions.

use crate::api::models::subscriptions::{SubscriptionCreate, SubscriptionStatus, SubscriptionUpdate};
use crate::types::{GymId, MemberId, SubscriptionId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;

#[derive(Debug, Clone)]
pub struct SubscriptionCreateDBRequest {
    pub member_id: MemberId,
    pub plan: String,
    pub amount: Decimal,
    pub starts_on: Option<DateTime<Utc>>,
    pub expires_on: Option<DateTime<Utc>>,
}

impl From<&SubscriptionCreate> for SubscriptionCreateDBRequest {
    fn from(api: &SubscriptionCreate) -> Self {
        Self {
            member_id: api.member_id,
            plan: api.plan.clone(),
            amount: api.amount,
            starts_on: api.starts_on,
            expires_on: api.expires_on,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SubscriptionUpdateDBRequest {
    pub plan: Option<String>,
    pub amount: Option<Decimal>,
    pub status: Option<SubscriptionStatus>,
    pub expires_on: Option<DateTime<Utc>>,
}

impl From<SubscriptionUpdate> for SubscriptionUpdateDBRequest {
    fn from(api: SubscriptionUpdate) -> Self {
        Self {
            plan: api.plan,
            amount: api.amount,
            status: api.status,
            expires_on: api.expires_on,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct SubscriptionDBResponse {
    pub id: SubscriptionId,
    pub gym_id: GymId,
    pub member_id: MemberId,
    pub plan: String,
    pub amount: Decimal,
    pub status: SubscriptionStatus,
    pub starts_on: DateTime<Utc>,
    pub expires_on: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
