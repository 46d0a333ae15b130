//! Tenant deposit management.

use crate::api::models::accounts::CurrentAccount;
use crate::api::models::deposits::{DepositCreate, DepositResponse, DepositUpdate};
use crate::api::models::pagination::{PaginatedResponse, Pagination};
use crate::auth::permissions::resolve_tenant;
use crate::db::handlers::{Deposits, ListFilter, TenantRepository};
use crate::db::models::deposits::{DepositCreateDBRequest, DepositUpdateDBRequest};
use crate::errors::{Error, Result};
use crate::types::{DepositId, GymId};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

#[utoipa::path(
    get,
    path = "/api/gym/{gym_id}/deposits",
    tag = "deposits",
    responses(
        (status = 200, description = "List of deposits", body = PaginatedResponse<DepositResponse>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is bound to a different gym")
    ),
    params(
        ("gym_id" = uuid::Uuid, Path, description = "Gym ID"),
        ("skip" = Option<i64>, Query, description = "Number of deposits to skip"),
        ("limit" = Option<i64>, Query, description = "Maximum number of deposits to return")
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn list_deposits(
    State(state): State<AppState>,
    current_account: CurrentAccount,
    Path(gym_id): Path<GymId>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<PaginatedResponse<DepositResponse>>> {
    let gym_id = resolve_tenant(&current_account, gym_id)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Deposits::new(&mut conn);

    let (skip, limit) = pagination.params();
    let deposits = repo.list(gym_id, &ListFilter::new(skip, limit)).await?;
    let total_count = repo.count(gym_id).await?;

    let data = deposits.into_iter().map(DepositResponse::from).collect();
    Ok(Json(PaginatedResponse::new(data, total_count, skip, limit)))
}

#[utoipa::path(
    post,
    path = "/api/gym/{gym_id}/deposits",
    tag = "deposits",
    request_body = DepositCreate,
    responses(
        (status = 201, description = "Deposit recorded", body = DepositResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is bound to a different gym"),
        (status = 404, description = "Member not found in this gym")
    ),
    params(("gym_id" = uuid::Uuid, Path, description = "Gym ID")),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn create_deposit(
    State(state): State<AppState>,
    current_account: CurrentAccount,
    Path(gym_id): Path<GymId>,
    Json(create): Json<DepositCreate>,
) -> Result<(StatusCode, Json<DepositResponse>)> {
    let gym_id = resolve_tenant(&current_account, gym_id)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    super::ensure_member_in_gym(&mut conn, gym_id, create.member_id).await?;

    let mut repo = Deposits::new(&mut conn);
    let deposit = repo.create(gym_id, &DepositCreateDBRequest::from(&create)).await?;
    Ok((StatusCode::CREATED, Json(DepositResponse::from(deposit))))
}

#[utoipa::path(
    get,
    path = "/api/gym/{gym_id}/deposits/{deposit_id}",
    tag = "deposits",
    responses(
        (status = 200, description = "Deposit details", body = DepositResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is bound to a different gym"),
        (status = 404, description = "Deposit not found in this gym")
    ),
    params(
        ("gym_id" = uuid::Uuid, Path, description = "Gym ID"),
        ("deposit_id" = uuid::Uuid, Path, description = "Deposit ID")
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn get_deposit(
    State(state): State<AppState>,
    current_account: CurrentAccount,
    Path((gym_id, deposit_id)): Path<(GymId, DepositId)>,
) -> Result<Json<DepositResponse>> {
    let gym_id = resolve_tenant(&current_account, gym_id)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Deposits::new(&mut conn);

    match repo.get_by_id(gym_id, deposit_id).await? {
        Some(deposit) => Ok(Json(DepositResponse::from(deposit))),
        None => Err(Error::NotFound {
            resource: "Deposit".to_string(),
            id: deposit_id.to_string(),
        }),
    }
}

#[utoipa::path(
    put,
    path = "/api/gym/{gym_id}/deposits/{deposit_id}",
    tag = "deposits",
    request_body = DepositUpdate,
    responses(
        (status = 200, description = "Deposit updated", body = DepositResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is bound to a different gym"),
        (status = 404, description = "Deposit not found in this gym")
    ),
    params(
        ("gym_id" = uuid::Uuid, Path, description = "Gym ID"),
        ("deposit_id" = uuid::Uuid, Path, description = "Deposit ID")
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn update_deposit(
    State(state): State<AppState>,
    current_account: CurrentAccount,
    Path((gym_id, deposit_id)): Path<(GymId, DepositId)>,
    Json(update): Json<DepositUpdate>,
) -> Result<Json<DepositResponse>> {
    let gym_id = resolve_tenant(&current_account, gym_id)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Deposits::new(&mut conn);

    let deposit = repo
        .update(gym_id, deposit_id, &DepositUpdateDBRequest::from(update))
        .await?;
    Ok(Json(DepositResponse::from(deposit)))
}

#[utoipa::path(
    delete,
    path = "/api/gym/{gym_id}/deposits/{deposit_id}",
    tag = "deposits",
    responses(
        (status = 204, description = "Deposit deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is bound to a different gym"),
        (status = 404, description = "Deposit not found in this gym")
    ),
    params(
        ("gym_id" = uuid::Uuid, Path, description = "Gym ID"),
        ("deposit_id" = uuid::Uuid, Path, description = "Deposit ID")
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn delete_deposit(
    State(state): State<AppState>,
    current_account: CurrentAccount,
    Path((gym_id, deposit_id)): Path<(GymId, DepositId)>,
) -> Result<StatusCode> {
    let gym_id = resolve_tenant(&current_account, gym_id)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Deposits::new(&mut conn);

    if repo.delete(gym_id, deposit_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(Error::NotFound {
            resource: "Deposit".to_string(),
            id: deposit_id.to_string(),
        })
    }
}
