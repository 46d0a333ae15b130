//! HTTP-facing request and response types.

pub mod accounts;
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
pub mod pagination;
pub mod payroll;
pub mod products;
pub mod reservations;
pub mod subscriptions;
pub mod support;
