//! Axum route handlers.
//!
//! Platform routes (`/api/gyms`, `/api/billing`, `/api/support/tickets`,
//! `/api/logs`) require the platform_operator role. Tenant routes live under
//! `/api/gym/{gym_id}/...`; every handler resolves the effective gym through
//! [`crate::auth::permissions::resolve_tenant`] before touching the database.

use crate::db::handlers::{Members, TenantRepository};
use crate::errors::{Error, Result};
use crate::types::{GymId, MemberId};
use sqlx::PgConnection;

pub mod attendance;
pub mod auth;
pub mod billing;
pub mod classes;
pub mod deposits;
pub mod expenses;
pub mod gyms;
pub mod lockers;
pub mod logs;
pub mod members;
pub mod payroll;
pub mod probes;
pub mod products;
pub mod reservations;
pub mod subscriptions;
pub mod support;

/// Reject writes that reference a member owned by another gym.
///
/// The schema only enforces `member_id REFERENCES members (id)`, so every
/// handler that accepts a member reference must scope it here first.
pub(crate) async fn ensure_member_in_gym(conn: &mut PgConnection, gym_id: GymId, member_id: MemberId) -> Result<()> {
    let mut members = Members::new(conn);
    members.get_by_id(gym_id, member_id).await?.ok_or_else(|| Error::NotFound {
        resource: "Member".to_string(),
        id: member_id.to_string(),
    })?;
    Ok(())
}
