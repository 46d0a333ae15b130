//! API request/response models for member deposits.

use crate::db::models::deposits::DepositDBResponse;
use crate::types::{DepositId, GymId, MemberId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DepositCreate {
    #[schema(value_type = String, format = "uuid")]
    pub member_id: MemberId,
    #[schema(value_type = String)]
    pub amount: Decimal,
    /// Payment method, e.g. "cash" or "card".
    pub method: Option<String>,
    /// External payment reference.
    pub reference: Option<String>,
    pub received_on: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DepositUpdate {
    #[schema(value_type = Option<String>)]
    pub amount: Option<Decimal>,
    pub method: Option<String>,
    pub reference: Option<String>,
    pub received_on: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DepositResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: DepositId,
    #[schema(value_type = String, format = "uuid")]
    pub gym_id: GymId,
    #[schema(value_type = String, format = "uuid")]
    pub member_id: MemberId,
    #[schema(value_type = String)]
    pub amount: Decimal,
    pub method: Option<String>,
    pub reference: Option<String>,
    pub received_on: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<DepositDBResponse> for DepositResponse {
    fn from(db: DepositDBResponse) -> Self {
        Self {
            id: db.id,
            gym_id: db.gym_id,
            member_id: db.member_id,
            amount: db.amount,
            method: db.method,
            reference: db.reference,
            received_on: db.received_on,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}
