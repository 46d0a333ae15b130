//! Platform billing management.

use crate::api::models::accounts::CurrentAccount;
use crate::api::models::billing::{BillingCreate, BillingResponse, BillingUpdate};
use crate::api::models::pagination::{PaginatedResponse, Pagination};
use crate::auth::permissions::require_platform_operator;
use crate::db::handlers::{BillingRecords, ListFilter, Repository};
use crate::db::models::billing::{BillingCreateDBRequest, BillingUpdateDBRequest};
use crate::errors::{Error, Result};
use crate::types::BillingRecordId;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

#[utoipa::path(
    get,
    path = "/api/billing",
    tag = "billing",
    responses(
        (status = 200, description = "List of billing records", body = PaginatedResponse<BillingResponse>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Requires the platform_operator role")
    ),
    params(
        ("skip" = Option<i64>, Query, description = "Number of records to skip"),
        ("limit" = Option<i64>, Query, description = "Maximum number of records to return")
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn list_billing_records(
    State(state): State<AppState>,
    current_account: CurrentAccount,
    Query(pagination): Query<Pagination>,
) -> Result<Json<PaginatedResponse<BillingResponse>>> {
    require_platform_operator(&current_account)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = BillingRecords::new(&mut conn);

    let (skip, limit) = pagination.params();
    let records = repo.list(&ListFilter::new(skip, limit)).await?;
    let total_count = repo.count().await?;

    let data = records.into_iter().map(BillingResponse::from).collect();
    Ok(Json(PaginatedResponse::new(data, total_count, skip, limit)))
}

#[utoipa::path(
    post,
    path = "/api/billing",
    tag = "billing",
    request_body = BillingCreate,
    responses(
        (status = 201, description = "Billing record created", body = BillingResponse),
        (status = 400, description = "Unknown gym"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Requires the platform_operator role")
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn create_billing_record(
    State(state): State<AppState>,
    current_account: CurrentAccount,
    Json(create): Json<BillingCreate>,
) -> Result<(StatusCode, Json<BillingResponse>)> {
    require_platform_operator(&current_account)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = BillingRecords::new(&mut conn);

    let record = repo.create(&BillingCreateDBRequest::from(&create)).await?;
    Ok((StatusCode::CREATED, Json(BillingResponse::from(record))))
}

#[utoipa::path(
    get,
    path = "/api/billing/{record_id}",
    tag = "billing",
    responses(
        (status = 200, description = "Billing record details", body = BillingResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Requires the platform_operator role"),
        (status = 404, description = "Billing record not found")
    ),
    params(("record_id" = uuid::Uuid, Path, description = "Billing record ID")),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn get_billing_record(
    State(state): State<AppState>,
    current_account: CurrentAccount,
    Path(record_id): Path<BillingRecordId>,
) -> Result<Json<BillingResponse>> {
    require_platform_operator(&current_account)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = BillingRecords::new(&mut conn);

    match repo.get_by_id(record_id).await? {
        Some(record) => Ok(Json(BillingResponse::from(record))),
        None => Err(Error::NotFound {
            resource: "Billing record".to_string(),
            id: record_id.to_string(),
        }),
    }
}

#[utoipa::path(
    put,
    path = "/api/billing/{record_id}",
    tag = "billing",
    request_body = BillingUpdate,
    responses(
        (status = 200, description = "Billing record updated", body = BillingResponse),
        (status = 400, description = "Illegal status transition"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Requires the platform_operator role"),
        (status = 404, description = "Billing record not found")
    ),
    params(("record_id" = uuid::Uuid, Path, description = "Billing record ID")),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn update_billing_record(
    State(state): State<AppState>,
    current_account: CurrentAccount,
    Path(record_id): Path<BillingRecordId>,
    Json(update): Json<BillingUpdate>,
) -> Result<Json<BillingResponse>> {
    require_platform_operator(&current_account)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = BillingRecords::new(&mut conn);

    if let Some(next) = update.status {
        let record = repo.get_by_id(record_id).await?.ok_or_else(|| Error::NotFound {
            resource: "Billing record".to_string(),
            id: record_id.to_string(),
        })?;
        if next != record.status && !record.status.can_transition_to(next) {
            return Err(Error::Validation {
                message: format!("Cannot move billing record from {:?} to {:?}", record.status, next),
            });
        }
    }

    let record = repo.update(record_id, &BillingUpdateDBRequest::from(update)).await?;
    Ok(Json(BillingResponse::from(record)))
}

#[utoipa::path(
    delete,
    path = "/api/billing/{record_id}",
    tag = "billing",
    responses(
        (status = 204, description = "Billing record deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Requires the platform_operator role"),
        (status = 404, description = "Billing record not found")
    ),
    params(("record_id" = uuid::Uuid, Path, description = "Billing record ID")),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn delete_billing_record(
    State(state): State<AppState>,
    current_account: CurrentAccount,
    Path(record_id): Path<BillingRecordId>,
) -> Result<StatusCode> {
    require_platform_operator(&current_account)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = BillingRecords::new(&mut conn);

    if repo.delete(record_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(Error::NotFound {
            resource: "Billing record".to_string(),
            id: record_id.to_string(),
        })
    }
}
