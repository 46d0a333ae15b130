//! API request/response models for expenses.

use crate::db::models::expenses::ExpenseDBResponse;
use crate::types::{ExpenseId, GymId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ExpenseCreate {
    pub category: String,
    pub description: Option<String>,
    #[schema(value_type = String)]
    pub amount: Decimal,
    pub incurred_on: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ExpenseUpdate {
    pub category: Option<String>,
    pub description: Option<String>,
    #[schema(value_type = Option<String>)]
    pub amount: Option<Decimal>,
    pub incurred_on: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ExpenseResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: ExpenseId,
    #[schema(value_type = String, format = "uuid")]
    pub gym_id: GymId,
    pub category: String,
    pub description: Option<String>,
    #[schema(value_type = String)]
    pub amount: Decimal,
    pub incurred_on: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ExpenseDBResponse> for ExpenseResponse {
    fn from(db: ExpenseDBResponse) -> Self {
        Self {
            id: db.id,
            gym_id: db.gym_id,
            category: db.category,
            description: db.description,
            amount: db.amount,
            incurred_on: db.incurred_on,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}
