//! API layer for HTTP request handling and data models.
//!
//! - **[`handlers`]**: Axum route handlers for all API endpoints
//! - **[`models`]**: Request/response data structures for API communication
//!
//! # API Structure
//!
//! - **Auth** (`/api/auth/login`, `/api/gym-auth/login`): portal logins
//! - **Platform** (`/api/gyms`, `/api/billing`, `/api/support/tickets`,
//!   `/api/logs`): back-office routes, platform_operator only
//! - **Tenant** (`/api/gym/{gym_id}/...`): per-gym resources, scoped by
//!   the caller's token
//!
//! All endpoints carry OpenAPI annotations via `utoipa`; the rendered docs
//! are served at `/docs`.

pub mod handlers;
pub mod models;
