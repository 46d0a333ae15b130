//! API request/response models for member subscriptions.

use crate::db::models::subscriptions::SubscriptionDBResponse;
use crate::types::{GymId, MemberId, SubscriptionId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Lifecycle of a subscription.
///
/// Valid transitions: `pending -> active`, `pending -> rejected`,
/// `active -> cancelled`. `expired` is never stored; it is derived at read
/// time when an active subscription's `expires_on` has passed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, ToSchema)]
#[sqlx(type_name = "subscription_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    Pending,
    Active,
    Rejected,
    Cancelled,
    Expired,
}

impl SubscriptionStatus {
    /// Whether moving to `next` is a legal lifecycle step.
    pub fn can_transition_to(self, next: SubscriptionStatus) -> bool {
        use SubscriptionStatus::*;
        matches!((self, next), (Pending, Active) | (Pending, Rejected) | (Active, Cancelled))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubscriptionCreate {
    #[schema(value_type = String, format = "uuid")]
    pub member_id: MemberId,
    pub plan: String,
    #[schema(value_type = String)]
    pub amount: Decimal,
    pub starts_on: Option<DateTime<Utc>>,
    pub expires_on: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubscriptionUpdate {
    pub plan: Option<String>,
    #[schema(value_type = Option<String>)]
    pub amount: Option<Decimal>,
    pub status: Option<SubscriptionStatus>,
    pub expires_on: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubscriptionResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: SubscriptionId,
    #[schema(value_type = String, format = "uuid")]
    pub gym_id: GymId,
    #[schema(value_type = String, format = "uuid")]
    pub member_id: MemberId,
    pub plan: String,
    #[schema(value_type = String)]
    pub amount: Decimal,
    /// Effective status: a stored `active` past its `expires_on` reads `expired`
    pub status: SubscriptionStatus,
    pub starts_on: DateTime<Utc>,
    pub expires_on: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<SubscriptionDBResponse> for SubscriptionResponse {
    fn from(db: SubscriptionDBResponse) -> Self {
        // Lazy expiry: no background process flips rows to expired; the read
        // path derives it from the stored state and the clock.
        let status = match (db.status, db.expires_on) {
            (SubscriptionStatus::Active, Some(expires_on)) if expires_on < Utc::now() => SubscriptionStatus::Expired,
            (status, _) => status,
        };

        Self {
            id: db.id,
            gym_id: db.gym_id,
            member_id: db.member_id,
            plan: db.plan,
            amount: db.amount,
            status,
            starts_on: db.starts_on,
            expires_on: db.expires_on,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn db_subscription(status: SubscriptionStatus, expires_on: Option<DateTime<Utc>>) -> SubscriptionDBResponse {
        let now = Utc::now();
        SubscriptionDBResponse {
            id: Uuid::new_v4(),
            gym_id: Uuid::new_v4(),
            member_id: Uuid::new_v4(),
            plan: "monthly".to_string(),
            amount: Decimal::new(4999, 2),
            status,
            starts_on: now - chrono::Duration::days(40),
            expires_on,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_active_past_expiry_reads_expired() {
        let past = Utc::now() - chrono::Duration::days(1);
        let response = SubscriptionResponse::from(db_subscription(SubscriptionStatus::Active, Some(past)));
        assert_eq!(response.status, SubscriptionStatus::Expired);
    }

    #[test]
    fn test_active_before_expiry_stays_active() {
        let future = Utc::now() + chrono::Duration::days(1);
        let response = SubscriptionResponse::from(db_subscription(SubscriptionStatus::Active, Some(future)));
        assert_eq!(response.status, SubscriptionStatus::Active);
    }

    #[test]
    fn test_non_active_statuses_never_expire() {
        let past = Utc::now() - chrono::Duration::days(1);
        for status in [
            SubscriptionStatus::Pending,
            SubscriptionStatus::Rejected,
            SubscriptionStatus::Cancelled,
        ] {
            let response = SubscriptionResponse::from(db_subscription(status, Some(past)));
            assert_eq!(response.status, status);
        }
    }

    #[test]
    fn test_subscription_transitions() {
        use SubscriptionStatus::*;
        assert!(Pending.can_transition_to(Active));
        assert!(Pending.can_transition_to(Rejected));
        assert!(Active.can_transition_to(Cancelled));

        assert!(!Rejected.can_transition_to(Active));
        assert!(!Cancelled.can_transition_to(Active));
        assert!(!Active.can_transition_to(Pending));
    }
}
