//! Authentication and authorization.
//!
//! Stateless JWT sessions: `POST /api/auth/login` (platform operators) and
//! `POST /api/gym-auth/login` (gym admins) exchange credentials for an HS256
//! token carried in the `Authorization: Bearer` header. Nothing is persisted
//! server-side; natural expiry bounds a leaked token's lifetime.
//!
//! # Modules
//!
//! - [`current_account`]: Extractor for the authenticated account in handlers
//! - [`password`]: Password hashing and verification using Argon2
//! - [`permissions`]: Role gates and tenant scope resolution
//! - [`session`]: JWT creation and verification

pub mod current_account;
pub mod password;
pub mod permissions;
pub mod session;
