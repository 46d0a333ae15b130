//! API request/response models for platform billing records.

use crate::db::models::billing::BillingDBResponse;
use crate::types::{BillingRecordId, GymId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Lifecycle of a billing record.
///
/// Valid transitions: `pending -> paid`, `pending -> overdue`,
/// `overdue -> paid`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, ToSchema)]
#[sqlx(type_name = "billing_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum BillingStatus {
    Pending,
    Paid,
    Overdue,
}

impl BillingStatus {
    pub fn can_transition_to(self, next: BillingStatus) -> bool {
        use BillingStatus::*;
        matches!((self, next), (Pending, Paid) | (Pending, Overdue) | (Overdue, Paid))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BillingCreate {
    #[schema(value_type = String, format = "uuid")]
    pub gym_id: GymId,
    pub description: String,
    #[schema(value_type = String)]
    pub amount: Decimal,
    pub due_on: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BillingUpdate {
    pub description: Option<String>,
    #[schema(value_type = Option<String>)]
    pub amount: Option<Decimal>,
    pub status: Option<BillingStatus>,
    pub due_on: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BillingResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: BillingRecordId,
    #[schema(value_type = String, format = "uuid")]
    pub gym_id: GymId,
    pub description: String,
    #[schema(value_type = String)]
    pub amount: Decimal,
    pub status: BillingStatus,
    pub due_on: Option<DateTime<Utc>>,
    pub paid_on: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<BillingDBResponse> for BillingResponse {
    fn from(db: BillingDBResponse) -> Self {
        Self {
            id: db.id,
            gym_id: db.gym_id,
            description: db.description,
            amount: db.amount,
            status: db.status,
            due_on: db.due_on,
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
    fn test_billing_transitions() {
        use BillingStatus::*;
        assert!(Pending.can_transition_to(Paid));
        assert!(Pending.can_transition_to(Overdue));
        assert!(Overdue.can_transition_to(Paid));
        assert!(!Paid.can_transition_to(Pending));
        assert!(!Paid.can_transition_to(Overdue));
    }
}
