//! Database models for member deposits.

use crate::api::models::deposits::{DepositCreate, DepositUpdate};
use crate::types::{DepositId, GymId, MemberId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;

#[derive(Debug, Clone)]
pub struct DepositCreateDBRequest {
    pub member_id: MemberId,
    pub amount: Decimal,
    pub method: Option<String>,
    pub reference: Option<String>,
    pub received_on: Option<DateTime<Utc>>,
}

impl From<&DepositCreate> for DepositCreateDBRequest {
    fn from(api: &DepositCreate) -> Self {
        Self {
            member_id: api.member_id,
            amount: api.amount,
            method: api.method.clone(),
            reference: api.reference.clone(),
            received_on: api.received_on,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DepositUpdateDBRequest {
    pub amount: Option<Decimal>,
    pub method: Option<String>,
    pub reference: Option<String>,
    pub received_on: Option<DateTime<Utc>>,
}

impl From<DepositUpdate> for DepositUpdateDBRequest {
    fn from(api: DepositUpdate) -> Self {
        Self {
            amount: api.amount,
            method: api.method,
            reference: api.reference,
            received_on: api.received_on,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct DepositDBResponse {
    pub id: DepositId,
    pub gym_id: GymId,
    pub member_id: MemberId,
    pub amount: Decimal,
    pub method: Option<String>,
    pub reference: Option<String>,
    pub received_on: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
