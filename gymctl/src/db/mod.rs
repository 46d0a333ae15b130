//! Database layer for data persistence and access.
//!
//! This module implements the data access layer using SQLx with PostgreSQL,
//! following the Repository pattern.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  (API request handlers)
//! └──────┬──────┘
//!        │
//!        ↓
//! ┌─────────────┐
//! │ Repositories│  (db::handlers - queries)
//! └──────┬──────┘
//!        │
//!        ↓
//! ┌─────────────┐
//! │   Models    │  (db::models - database records)
//! └──────┬──────┘
//!        │
//!        ↓
//! ┌─────────────┐
//! │  PostgreSQL │
//! └─────────────┘
//! ```
//!
//! # Tenant isolation
//!
//! Repositories for gym-scoped tables implement [`handlers::TenantRepository`],
//! whose every method takes the resolved `gym_id` as the first argument. The
//! `WHERE gym_id = $1` filter is part of each query, so a row belonging to
//! another gym is indistinguishable from an absent row.
//!
//! # Transactions
//!
//! Repositories wrap a SQLx connection. Multi-statement writes create
//! repositories from a transaction, not directly from the pool:
//!
//! ```ignore
//! let mut tx = pool.begin().await?;
//! let mut repo = Members::new(&mut tx);
//! // ... operations ...
//! tx.commit().await?;
//! ```
//!
//! # Migrations
//!
//! Database migrations are managed by SQLx and located in the `migrations/`
//! directory, exposed via [`crate::migrator`].

pub mod errors;
pub mod handlers;
pub mod models;
