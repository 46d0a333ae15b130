//! API request/response models for payroll records.

use crate::db::models::payroll::PayrollRecordDBResponse;
use crate::types::{GymId, PayrollRecordId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Lifecycle of a payroll record.
///
/// Valid transitions: `pending -> paid`, `pending -> rejected`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, ToSchema)]
#[sqlx(type_name = "payroll_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PayrollStatus {
    Pending,
    Paid,
    Rejected,
}

impl PayrollStatus {
    /// Whether moving to `next` is a legal lifecycle step.
    pub fn can_transition_to(self, next: PayrollStatus) -> bool {
        use PayrollStatus::*;
        matches!((self, next), (Pending, Paid) | (Pending, Rejected))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PayrollRecordCreate {
    pub staff_name: String,
    pub role_title: Option<String>,
    #[schema(value_type = String)]
    pub amount: Decimal,
    /// Pay period label, e.g. "2026-08"
    pub period: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PayrollRecordUpdate {
    pub staff_name: Option<String>,
    pub role_title: Option<String>,
    #[schema(value_type = Option<String>)]
    pub amount: Option<Decimal>,
    pub period: Option<String>,
    pub status: Option<PayrollStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PayrollRecordResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: PayrollRecordId,
    #[schema(value_type = String, format = "uuid")]
    pub gym_id: GymId,
    pub staff_name: String,
    pub role_title: Option<String>,
    #[schema(value_type = String)]
    pub amount: Decimal,
    pub period: String,
    pub status: PayrollStatus,
    pub paid_on: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PayrollRecordDBResponse> for PayrollRecordResponse {
    fn from(db: PayrollRecordDBResponse) -> Self {
        Self {
            id: db.id,
            gym_id: db.gym_id,
            staff_name: db.staff_name,
            role_title: db.role_title,
            amount: db.amount,
            period: db.period,
            status: db.status,
            paid_on: db.paid_on,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payroll_transitions() {
        use PayrollStatus::*;
        assert!(Pending.can_transition_to(Paid));
        assert!(Pending.can_transition_to(Rejected));
        assert!(!Paid.can_transition_to(Pending));
        assert!(!Rejected.can_transition_to(Paid));
    }
}
