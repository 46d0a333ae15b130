//! Tenant attendance tracking.
//!
//! POST checks a member in; PUT on a record stamps the checkout time.

use crate::api::models::accounts::CurrentAccount;
use crate::api::models::attendance::{AttendanceCheckout, AttendanceCreate, AttendanceResponse};
use crate::api::models::pagination::{PaginatedResponse, Pagination};
use crate::auth::permissions::resolve_tenant;
use crate::db::handlers::{Attendance, ListFilter};
use crate::db::models::attendance::{AttendanceCheckoutDBRequest, AttendanceCreateDBRequest};
use crate::errors::{Error, Result};
use crate::types::{AttendanceRecordId, GymId};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

#[utoipa::path(
    get,
    path = "/api/gym/{gym_id}/attendance",
    tag = "attendance",
    responses(
        (status = 200, description = "List of attendance records", body = PaginatedResponse<AttendanceResponse>),
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
pub async fn list_attendance(
    State(state): State<AppState>,
    current_account: CurrentAccount,
    Path(gym_id): Path<GymId>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<PaginatedResponse<AttendanceResponse>>> {
    let gym_id = resolve_tenant(&current_account, gym_id)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Attendance::new(&mut conn);

    let (skip, limit) = pagination.params();
    let records = repo.list(gym_id, &ListFilter::new(skip, limit)).await?;
    let total_count = repo.count(gym_id).await?;

    let data = records.into_iter().map(AttendanceResponse::from).collect();
    Ok(Json(PaginatedResponse::new(data, total_count, skip, limit)))
}

#[utoipa::path(
    post,
    path = "/api/gym/{gym_id}/attendance",
    tag = "attendance",
    request_body = AttendanceCreate,
    responses(
        (status = 201, description = "Member checked in", body = AttendanceResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is bound to a different gym"),
        (status = 404, description = "Member not found in this gym")
    ),
    params(("gym_id" = uuid::Uuid, Path, description = "Gym ID")),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn check_in(
    State(state): State<AppState>,
    current_account: CurrentAccount,
    Path(gym_id): Path<GymId>,
    Json(create): Json<AttendanceCreate>,
) -> Result<(StatusCode, Json<AttendanceResponse>)> {
    let gym_id = resolve_tenant(&current_account, gym_id)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    super::ensure_member_in_gym(&mut conn, gym_id, create.member_id).await?;

    let mut repo = Attendance::new(&mut conn);
    let record = repo.create(gym_id, &AttendanceCreateDBRequest::from(&create)).await?;
    Ok((StatusCode::CREATED, Json(AttendanceResponse::from(record))))
}

#[utoipa::path(
    get,
    path = "/api/gym/{gym_id}/attendance/{record_id}",
    tag = "attendance",
    responses(
        (status = 200, description = "Attendance record details", body = AttendanceResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is bound to a different gym"),
        (status = 404, description = "Attendance record not found in this gym")
    ),
    params(
        ("gym_id" = uuid::Uuid, Path, description = "Gym ID"),
        ("record_id" = uuid::Uuid, Path, description = "Attendance record ID")
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn get_attendance_record(
    State(state): State<AppState>,
    current_account: CurrentAccount,
    Path((gym_id, record_id)): Path<(GymId, AttendanceRecordId)>,
) -> Result<Json<AttendanceResponse>> {
    let gym_id = resolve_tenant(&current_account, gym_id)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Attendance::new(&mut conn);

    match repo.get_by_id(gym_id, record_id).await? {
        Some(record) => Ok(Json(AttendanceResponse::from(record))),
        None => Err(Error::NotFound {
            resource: "Attendance record".to_string(),
            id: record_id.to_string(),
        }),
    }
}

#[utoipa::path(
    put,
    path = "/api/gym/{gym_id}/attendance/{record_id}",
    tag = "attendance",
    request_body = AttendanceCheckout,
    responses(
        (status = 200, description = "Member checked out", body = AttendanceResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is bound to a different gym"),
        (status = 404, description = "Attendance record not found in this gym")
    ),
    params(
        ("gym_id" = uuid::Uuid, Path, description = "Gym ID"),
        ("record_id" = uuid::Uuid, Path, description = "Attendance record ID")
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn check_out(
    State(state): State<AppState>,
    current_account: CurrentAccount,
    Path((gym_id, record_id)): Path<(GymId, AttendanceRecordId)>,
    Json(checkout): Json<AttendanceCheckout>,
) -> Result<Json<AttendanceResponse>> {
    let gym_id = resolve_tenant(&current_account, gym_id)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Attendance::new(&mut conn);

    let record = repo
        .checkout(gym_id, record_id, &AttendanceCheckoutDBRequest::from(checkout))
        .await?;
    Ok(Json(AttendanceResponse::from(record)))
}

#[utoipa::path(
    delete,
    path = "/api/gym/{gym_id}/attendance/{record_id}",
    tag = "attendance",
    responses(
        (status = 204, description = "Attendance record deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is bound to a different gym"),
        (status = 404, description = "Attendance record not found in this gym")
    ),
    params(
        ("gym_id" = uuid::Uuid, Path, description = "Gym ID"),
        ("record_id" = uuid::Uuid, Path, description = "Attendance record ID")
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn delete_attendance_record(
    State(state): State<AppState>,
    current_account: CurrentAccount,
    Path((gym_id, record_id)): Path<(GymId, AttendanceRecordId)>,
) -> Result<StatusCode> {
    let gym_id = resolve_tenant(&current_account, gym_id)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Attendance::new(&mut conn);

    if repo.delete(gym_id, record_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(Error::NotFound {
            resource: "Attendance record".to_string(),
            id: record_id.to_string(),
        })
    }
}
