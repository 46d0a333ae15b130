//! Table repositories.
//!
//! Platform tables implement [`repository::Repository`]; gym-scoped tables
//! implement [`repository::TenantRepository`], whose methods all take the
//! resolved gym id so isolation cannot be skipped at a call site. Gyms,
//! accounts, attendance, and the audit log have bespoke surfaces and expose
//! inherent methods instead.

pub mod accounts;
pub mod attendance;
pub mod billing;
pub mod classes;
pub mod deposits;
pub mod expenses;
pub mod gyms;
pub mod lockers;
pub mod logs;
pub mod members;
pub mod payroll;
pub mod products;
pub mod repository;
pub mod reservations;
pub mod subscriptions;
pub mod support;

pub use accounts::Accounts;
pub use attendance::Attendance;
pub use billing::BillingRecords;
pub use classes::Classes;
pub use deposits::Deposits;
pub use expenses::Expenses;
pub use gyms::Gyms;
pub use lockers::Lockers;
pub use logs::AuditLogs;
pub use members::Members;
pub use payroll::PayrollRecords;
pub use products::Products;
pub use repository::{ListFilter, Repository, TenantRepository};
pub use reservations::Reservations;
pub use subscriptions::Subscriptions;
pub use support::SupportTickets;
