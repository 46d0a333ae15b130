//! Tenant locker management.

use crate::api::models::accounts::CurrentAccount;
use crate::api::models::lockers::{LockerCreate, LockerResponse, LockerUpdate};
use crate::api::models::pagination::{PaginatedResponse, Pagination};
use crate::auth::permissions::resolve_tenant;
use crate::db::handlers::{ListFilter, Lockers, TenantRepository};
use crate::db::models::lockers::{LockerCreateDBRequest, LockerUpdateDBRequest};
use crate::errors::{Error, Result};
use crate::types::{GymId, LockerId};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

#[utoipa::path(
    get,
    path = "/api/gym/{gym_id}/lockers",
    tag = "lockers",
    responses(
        (status = 200, description = "List of lockers", body = PaginatedResponse<LockerResponse>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is bound to a different gym")
    ),
    params(
        ("gym_id" = uuid::Uuid, Path, description = "Gym ID"),
        ("skip" = Option<i64>, Query, description = "Number of lockers to skip"),
        ("limit" = Option<i64>, Query, description = "Maximum number of lockers to return")
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn list_lockers(
    State(state): State<AppState>,
    current_account: CurrentAccount,
    Path(gym_id): Path<GymId>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<PaginatedResponse<LockerResponse>>> {
    let gym_id = resolve_tenant(&current_account, gym_id)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Lockers::new(&mut conn);

    let (skip, limit) = pagination.params();
    let lockers = repo.list(gym_id, &ListFilter::new(skip, limit)).await?;
    let total_count = repo.count(gym_id).await?;

    let data = lockers.into_iter().map(LockerResponse::from).collect();
    Ok(Json(PaginatedResponse::new(data, total_count, skip, limit)))
}

#[utoipa::path(
    post,
    path = "/api/gym/{gym_id}/lockers",
    tag = "lockers",
    request_body = LockerCreate,
    responses(
        (status = 201, description = "Locker created", body = LockerResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is bound to a different gym"),
        (status = 409, description = "Locker number already taken in this gym")
    ),
    params(("gym_id" = uuid::Uuid, Path, description = "Gym ID")),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn create_locker(
    State(state): State<AppState>,
    current_account: CurrentAccount,
    Path(gym_id): Path<GymId>,
    Json(create): Json<LockerCreate>,
) -> Result<(StatusCode, Json<LockerResponse>)> {
    let gym_id = resolve_tenant(&current_account, gym_id)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Lockers::new(&mut conn);

    let locker = repo.create(gym_id, &LockerCreateDBRequest::from(&create)).await?;
    Ok((StatusCode::CREATED, Json(LockerResponse::from(locker))))
}

#[utoipa::path(
    get,
    path = "/api/gym/{gym_id}/lockers/{locker_id}",
    tag = "lockers",
    responses(
        (status = 200, description = "Locker details", body = LockerResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is bound to a different gym"),
        (status = 404, description = "Locker not found in this gym")
    ),
    params(
        ("gym_id" = uuid::Uuid, Path, description = "Gym ID"),
        ("locker_id" = uuid::Uuid, Path, description = "Locker ID")
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn get_locker(
    State(state): State<AppState>,
    current_account: CurrentAccount,
    Path((gym_id, locker_id)): Path<(GymId, LockerId)>,
) -> Result<Json<LockerResponse>> {
    let gym_id = resolve_tenant(&current_account, gym_id)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Lockers::new(&mut conn);

    match repo.get_by_id(gym_id, locker_id).await? {
        Some(locker) => Ok(Json(LockerResponse::from(locker))),
        None => Err(Error::NotFound {
            resource: "Locker".to_string(),
            id: locker_id.to_string(),
        }),
    }
}

#[utoipa::path(
    put,
    path = "/api/gym/{gym_id}/lockers/{locker_id}",
    tag = "lockers",
    request_body = LockerUpdate,
    responses(
        (status = 200, description = "Locker updated", body = LockerResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is bound to a different gym"),
        (status = 404, description = "Locker or assigned member not found in this gym")
    ),
    params(
        ("gym_id" = uuid::Uuid, Path, description = "Gym ID"),
        ("locker_id" = uuid::Uuid, Path, description = "Locker ID")
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn update_locker(
    State(state): State<AppState>,
    current_account: CurrentAccount,
    Path((gym_id, locker_id)): Path<(GymId, LockerId)>,
    Json(update): Json<LockerUpdate>,
) -> Result<Json<LockerResponse>> {
    let gym_id = resolve_tenant(&current_account, gym_id)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    if let Some(member_id) = update.member_id {
        super::ensure_member_in_gym(&mut conn, gym_id, member_id).await?;
    }

    let mut repo = Lockers::new(&mut conn);
    let locker = repo.update(gym_id, locker_id, &LockerUpdateDBRequest::from(update)).await?;
    Ok(Json(LockerResponse::from(locker)))
}

#[utoipa::path(
    delete,
    path = "/api/gym/{gym_id}/lockers/{locker_id}",
    tag = "lockers",
    responses(
        (status = 204, description = "Locker deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is bound to a different gym"),
        (status = 404, description = "Locker not found in this gym")
    ),
    params(
        ("gym_id" = uuid::Uuid, Path, description = "Gym ID"),
        ("locker_id" = uuid::Uuid, Path, description = "Locker ID")
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn delete_locker(
    State(state): State<AppState>,
    current_account: CurrentAccount,
    Path((gym_id, locker_id)): Path<(GymId, LockerId)>,
) -> Result<StatusCode> {
    let gym_id = resolve_tenant(&current_account, gym_id)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Lockers::new(&mut conn);

    if repo.delete(gym_id, locker_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(Error::NotFound {
            resource: "Locker".to_string(),
            id: locker_id.to_string(),
        })
    }
}
