//! Platform audit log access.

use crate::api::models::accounts::CurrentAccount;
use crate::api::models::logs::AuditLogResponse;
use crate::api::models::pagination::{PaginatedResponse, Pagination};
use crate::auth::permissions::require_platform_operator;
use crate::db::handlers::{AuditLogs, ListFilter};
use crate::errors::{Error, Result};
use crate::AppState;
use axum::{
    extract::{Query, State},
    Json,
};

#[utoipa::path(
    get,
    path = "/api/logs",
    tag = "logs",
    responses(
        (status = 200, description = "Paginated audit log, newest first", body = PaginatedResponse<AuditLogResponse>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Requires the platform_operator role")
    ),
    params(
        ("skip" = Option<i64>, Query, description = "Number of entries to skip"),
        ("limit" = Option<i64>, Query, description = "Maximum number of entries to return")
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn list_logs(
    State(state): State<AppState>,
    current_account: CurrentAccount,
    Query(pagination): Query<Pagination>,
) -> Result<Json<PaginatedResponse<AuditLogResponse>>> {
    require_platform_operator(&current_account)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = AuditLogs::new(&mut conn);

    let (skip, limit) = pagination.params();
    let entries = repo.list(&ListFilter::new(skip, limit)).await?;
    let total_count = repo.count().await?;

    let data = entries.into_iter().map(AuditLogResponse::from).collect();
    Ok(Json(PaginatedResponse::new(data, total_count, skip, limit)))
}

#[utoipa::path(
    get,
    path = "/api/logs/export",
    tag = "logs",
    responses(
        (status = 200, description = "Full audit log, oldest first", body = Vec<AuditLogResponse>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Requires the platform_operator role")
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn export_logs(
    State(state): State<AppState>,
    current_account: CurrentAccount,
) -> Result<Json<Vec<AuditLogResponse>>> {
    require_platform_operator(&current_account)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = AuditLogs::new(&mut conn);

    let entries = repo.export().await?;
    Ok(Json(entries.into_iter().map(AuditLogResponse::from).collect()))
}
