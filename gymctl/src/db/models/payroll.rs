//! Database models for payroll records.

use crate::api::models::payroll::{PayrollRecordCreate, PayrollRecordUpdate, PayrollStatus};
use crate::types::{GymId, PayrollRecordId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;

#[derive(Debug, Clone)]
pub struct PayrollRecordCreateDBRequest {
    pub staff_name: String,
    pub role_title: Option<String>,
    pub amount: Decimal,
    pub period: String,
}

impl From<&PayrollRecordCreate> for PayrollRecordCreateDBRequest {
    fn from(api: &PayrollRecordCreate) -> Self {
        Self {
            staff_name: api.staff_name.clone(),
            role_title: api.role_title.clone(),
            amount: api.amount,
            period: api.period.clone(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PayrollRecordUpdateDBRequest {
    pub staff_name: Option<String>,
    pub role_title: Option<String>,
    pub amount: Option<Decimal>,
    pub period: Option<String>,
    pub status: Option<PayrollStatus>,
}

impl From<PayrollRecordUpdate> for PayrollRecordUpdateDBRequest {
    fn from(api: PayrollRecordUpdate) -> Self {
        Self {
            staff_name: api.staff_name,
            role_title: api.role_title,
            amount: api.amount,
            period: api.period,
            status: api.status,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct PayrollRecordDBResponse {
    pub id: PayrollRecordId,
    pub gym_id: GymId,
    pub staff_name: String,
    pub role_title: Option<String>,
    pub amount: Decimal,
    pub period: String,
    pub status: PayrollStatus,
    pub paid_on: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
