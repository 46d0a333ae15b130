//! Tenant payroll management.

use crate::api::models::accounts::CurrentAccount;
use crate::api::models::pagination::{PaginatedResponse, Pagination};
use crate::api::models::payroll::{PayrollRecordCreate, PayrollRecordResponse, PayrollRecordUpdate};
use crate::auth::permissions::resolve_tenant;
use crate::db::handlers::{ListFilter, PayrollRecords, TenantRepository};
use crate::db::models::payroll::{PayrollRecordCreateDBRequest, PayrollRecordUpdateDBRequest};
use crate::errors::{Error, Result};
use crate::types::{GymId, PayrollRecordId};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

#[utoipa::path(
    get,
    path = "/api/gym/{gym_id}/payroll",
    tag = "payroll",
    responses(
        (status = 200, description = "List of payroll records", body = PaginatedResponse<PayrollRecordResponse>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is bound to a different gym")
    ),
    params(
        ("gym_id" = uuid::Uuid, Path, description = "Gym ID"),
        ("skip" = Option<i64>, Query, description = "Number of records to skip"),
        ("limit" = Option<i64>, Query, description = "Maximum number of records to return")
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn list_payroll(
    State(state): State<AppState>,
    current_account: CurrentAccount,
    Path(gym_id): Path<GymId>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<PaginatedResponse<PayrollRecordResponse>>> {
    let gym_id = resolve_tenant(&current_account, gym_id)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = PayrollRecords::new(&mut conn);

    let (skip, limit) = pagination.params();
    let records = repo.list(gym_id, &ListFilter::new(skip, limit)).await?;
    let total_count = repo.count(gym_id).await?;

    let data = records.into_iter().map(PayrollRecordResponse::from).collect();
    Ok(Json(PaginatedResponse::new(data, total_count, skip, limit)))
}

#[utoipa::path(
    post,
    path = "/api/gym/{gym_id}/payroll",
    tag = "payroll",
    request_body = PayrollRecordCreate,
    responses(
        (status = 201, description = "Payroll record created", body = PayrollRecordResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is bound to a different gym")
    ),
    params(("gym_id" = uuid::Uuid, Path, description = "Gym ID")),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn create_payroll_record(
    State(state): State<AppState>,
    current_account: CurrentAccount,
    Path(gym_id): Path<GymId>,
    Json(create): Json<PayrollRecordCreate>,
) -> Result<(StatusCode, Json<PayrollRecordResponse>)> {
    let gym_id = resolve_tenant(&current_account, gym_id)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = PayrollRecords::new(&mut conn);

    let record = repo.create(gym_id, &PayrollRecordCreateDBRequest::from(&create)).await?;
    Ok((StatusCode::CREATED, Json(PayrollRecordResponse::from(record))))
}

#[utoipa::path(
    get,
    path = "/api/gym/{gym_id}/payroll/{record_id}",
    tag = "payroll",
    responses(
        (status = 200, description = "Payroll record details", body = PayrollRecordResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is bound to a different gym"),
        (status = 404, description = "Payroll record not found in this gym")
    ),
    params(
        ("gym_id" = uuid::Uuid, Path, description = "Gym ID"),
        ("record_id" = uuid::Uuid, Path, description = "Payroll record ID")
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn get_payroll_record(
    State(state): State<AppState>,
    current_account: CurrentAccount,
    Path((gym_id, record_id)): Path<(GymId, PayrollRecordId)>,
) -> Result<Json<PayrollRecordResponse>> {
    let gym_id = resolve_tenant(&current_account, gym_id)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = PayrollRecords::new(&mut conn);

    match repo.get_by_id(gym_id, record_id).await? {
        Some(record) => Ok(Json(PayrollRecordResponse::from(record))),
        None => Err(Error::NotFound {
            resource: "Payroll record".to_string(),
            id: record_id.to_string(),
        }),
    }
}

#[utoipa::path(
    put,
    path = "/api/gym/{gym_id}/payroll/{record_id}",
    tag = "payroll",
    request_body = PayrollRecordUpdate,
    responses(
        (status = 200, description = "Payroll record updated", body = PayrollRecordResponse),
        (status = 400, description = "Illegal status transition"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is bound to a different gym"),
        (status = 404, description = "Payroll record not found in this gym")
    ),
    params(
        ("gym_id" = uuid::Uuid, Path, description = "Gym ID"),
        ("record_id" = uuid::Uuid, Path, description = "Payroll record ID")
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn update_payroll_record(
    State(state): State<AppState>,
    current_account: CurrentAccount,
    Path((gym_id, record_id)): Path<(GymId, PayrollRecordId)>,
    Json(update): Json<PayrollRecordUpdate>,
) -> Result<Json<PayrollRecordResponse>> {
    let gym_id = resolve_tenant(&current_account, gym_id)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = PayrollRecords::new(&mut conn);

    if let Some(next) = update.status {
        let record = repo.get_by_id(gym_id, record_id).await?.ok_or_else(|| Error::NotFound {
            resource: "Payroll record".to_string(),
            id: record_id.to_string(),
        })?;
        if next != record.status && !record.status.can_transition_to(next) {
            return Err(Error::Validation {
                message: format!("Cannot move payroll record from {:?} to {:?}", record.status, next),
            });
        }
    }

    let record = repo
        .update(gym_id, record_id, &PayrollRecordUpdateDBRequest::from(update))
        .await?;
    Ok(Json(PayrollRecordResponse::from(record)))
}

#[utoipa::path(
    delete,
    path = "/api/gym/{gym_id}/payroll/{record_id}",
    tag = "payroll",
    responses(
        (status = 204, description = "Payroll record deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is bound to a different gym"),
        (status = 404, description = "Payroll record not found in this gym")
    ),
    params(
        ("gym_id" = uuid::Uuid, Path, description = "Gym ID"),
        ("record_id" = uuid::Uuid, Path, description = "Payroll record ID")
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn delete_payroll_record(
    State(state): State<AppState>,
    current_account: CurrentAccount,
    Path((gym_id, record_id)): Path<(GymId, PayrollRecordId)>,
) -> Result<StatusCode> {
    let gym_id = resolve_tenant(&current_account, gym_id)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = PayrollRecords::new(&mut conn);

    if repo.delete(gym_id, record_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(Error::NotFound {
            resource: "Payroll record".to_string(),
            id: record_id.to_string(),
        })
    }
}
