//! Database-layer request and response types.
//!
//! Each module mirrors one table: a `*CreateDBRequest`, a `*UpdateDBRequest`
//! with all-optional fields for partial updates, and a `*DBResponse` that
//! derives `FromRow`. Conversions to and from the API models live alongside.

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
pub mod reservations;
pub mod subscriptions;
pub mod support;
