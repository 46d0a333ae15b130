//! Database models for expenses.

use crate::api::models::expenses::{ExpenseCreate, ExpenseUpdate};
use crate::types::{ExpenseId, GymId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;

#[derive(Debug, Clone)]
pub struct ExpenseCreateDBRequest {
    pub category: String,
    pub description: Option<String>,
    pub amount: Decimal,
    pub incurred_on: Option<DateTime<Utc>>,
}

impl From<&ExpenseCreate> for ExpenseCreateDBRequest {
    fn from(api: &ExpenseCreate) -> Self {
        Self {
            category: api.category.clone(),
            description: api.description.clone(),
            amount: api.amount,
            incurred_on: api.incurred_on,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ExpenseUpdateDBRequest {
    pub category: Option<String>,
    pub description: Option<String>,
    pub amount: Option<Decimal>,
    pub incurred_on: Option<DateTime<Utc>>,
}

impl From<ExpenseUpdate> for ExpenseUpdateDBRequest {
    fn from(api: ExpenseUpdate) -> Self {
        Self {
            category: api.category,
            description: api.description,
            amount: api.amount,
            incurred_on: api.incurred_on,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct ExpenseDBResponse {
    pub id: ExpenseId,
    pub gym_id: GymId,
    pub category: String,
    pub description: Option<String>,
    pub amount: Decimal,
    pub incurred_on: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
