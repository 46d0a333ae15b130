//! Liveness and readiness probes.

use crate::errors::{Error, Result};
use crate::AppState;
use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

/// Health check. Verifies the database is reachable.
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "probes",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 500, description = "Database unreachable")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn health(State(state): State<AppState>) -> Result<Json<HealthResponse>> {
    sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(&state.db)
        .await
        .map_err(|e| Error::Database(e.into()))?;

    Ok(Json(HealthResponse {
        status: "OK".to_string(),
    }))
}
