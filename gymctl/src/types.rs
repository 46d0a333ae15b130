//! Common type definitions.
//!
//! All entity identifiers are UUIDs wrapped in type aliases. The aliases carry
//! no extra behavior; they exist so signatures say which entity they expect.

use uuid::Uuid;

pub type AccountId = Uuid;
pub type GymId = Uuid;
pub type MemberId = Uuid;
pub type SubscriptionId = Uuid;
pub type ClassId = Uuid;
pub type LockerId = Uuid;
pub type ExpenseId = Uuid;
pub type PayrollRecordId = Uuid;
pub type ProductId = Uuid;
pub type ReservationId = Uuid;
pub type DepositId = Uuid;
pub type AttendanceRecordId = Uuid;
pub type BillingRecordId = Uuid;
pub type SupportTicketId = Uuid;
pub type AuditLogId = Uuid;

/// Abbreviate a UUID to its first 8 characters for more readable logs and traces.
/// Example: "550e8400-e29b-41d4-a716-446655440000" -> "550e8400"
pub fn abbrev_uuid(uuid: &Uuid) -> String {
    uuid.to_string().chars().take(8).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_abbrev_uuid() {
        let id: Uuid = "550e8400-e29b-41d4-a716-446655440000".parse().unwrap();
        assert_eq!(abbrev_uuid(&id), "550e8400");
    }
}
