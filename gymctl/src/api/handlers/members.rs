//! Tenant member management.

use crate::api::models::accounts::CurrentAccount;
use crate::api::models::members::{MemberCreate, MemberResponse, MemberUpdate};
use crate::api::models::pagination::{PaginatedResponse, Pagination};
use crate::auth::permissions::resolve_tenant;
use crate::db::handlers::{ListFilter, Members, TenantRepository};
use crate::db::models::members::{MemberCreateDBRequest, MemberUpdateDBRequest};
use crate::errors::{Error, Result};
use crate::types::{GymId, MemberId};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

#[utoipa::path(
    get,
    path = "/api/gym/{gym_id}/members",
    tag = "members",
    responses(
        (status = 200, description = "List of members", body = PaginatedResponse<MemberResponse>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is bound to a different gym")
    ),
    params(
        ("gym_id" = uuid::Uuid, Path, description = "Gym ID"),
        ("skip" = Option<i64>, Query, description = "Number of members to skip"),
        ("limit" = Option<i64>, Query, description = "Maximum number of members to return")
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn list_members(
    State(state): State<AppState>,
    current_account: CurrentAccount,
    Path(gym_id): Path<GymId>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<PaginatedResponse<MemberResponse>>> {
    let gym_id = resolve_tenant(&current_account, gym_id)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Members::new(&mut conn);

    let (skip, limit) = pagination.params();
    let members = repo.list(gym_id, &ListFilter::new(skip, limit)).await?;
    let total_count = repo.count(gym_id).await?;

    let data = members.into_iter().map(MemberResponse::from).collect();
    Ok(Json(PaginatedResponse::new(data, total_count, skip, limit)))
}

#[utoipa::path(
    post,
    path = "/api/gym/{gym_id}/members",
    tag = "members",
    request_body = MemberCreate,
    responses(
        (status = 201, description = "Member created", body = MemberResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is bound to a different gym")
    ),
    params(("gym_id" = uuid::Uuid, Path, description = "Gym ID")),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn create_member(
    State(state): State<AppState>,
    current_account: CurrentAccount,
    Path(gym_id): Path<GymId>,
    Json(create): Json<MemberCreate>,
) -> Result<(StatusCode, Json<MemberResponse>)> {
    let gym_id = resolve_tenant(&current_account, gym_id)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Members::new(&mut conn);

    let member = repo.create(gym_id, &MemberCreateDBRequest::from(&create)).await?;
    Ok((StatusCode::CREATED, Json(MemberResponse::from(member))))
}

#[utoipa::path(
    get,
    path = "/api/gym/{gym_id}/members/{member_id}",
    tag = "members",
    responses(
        (status = 200, description = "Member details", body = MemberResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is bound to a different gym"),
        (status = 404, description = "Member not found in this gym")
    ),
    params(
        ("gym_id" = uuid::Uuid, Path, description = "Gym ID"),
        ("member_id" = uuid::Uuid, Path, description = "Member ID")
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn get_member(
    State(state): State<AppState>,
    current_account: CurrentAccount,
    Path((gym_id, member_id)): Path<(GymId, MemberId)>,
) -> Result<Json<MemberResponse>> {
    let gym_id = resolve_tenant(&current_account, gym_id)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Members::new(&mut conn);

    match repo.get_by_id(gym_id, member_id).await? {
        Some(member) => Ok(Json(MemberResponse::from(member))),
        None => Err(Error::NotFound {
            resource: "Member".to_string(),
            id: member_id.to_string(),
        }),
    }
}

#[utoipa::path(
    put,
    path = "/api/gym/{gym_id}/members/{member_id}",
    tag = "members",
    request_body = MemberUpdate,
    responses(
        (status = 200, description = "Member updated", body = MemberResponse),
        (status = 400, description = "Illegal status transition"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is bound to a different gym"),
        (status = 404, description = "Member not found in this gym")
    ),
    params(
        ("gym_id" = uuid::Uuid, Path, description = "Gym ID"),
        ("member_id" = uuid::Uuid, Path, description = "Member ID")
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn update_member(
    State(state): State<AppState>,
    current_account: CurrentAccount,
    Path((gym_id, member_id)): Path<(GymId, MemberId)>,
    Json(update): Json<MemberUpdate>,
) -> Result<Json<MemberResponse>> {
    let gym_id = resolve_tenant(&current_account, gym_id)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Members::new(&mut conn);

    if let Some(next) = update.status {
        let member = repo.get_by_id(gym_id, member_id).await?.ok_or_else(|| Error::NotFound {
            resource: "Member".to_string(),
            id: member_id.to_string(),
        })?;
        if next != member.status && !member.status.can_transition_to(next) {
            return Err(Error::Validation {
                message: format!("Cannot move member from {:?} to {:?}", member.status, next),
            });
        }
    }

    let member = repo
        .update(gym_id, member_id, &MemberUpdateDBRequest::from(update))
        .await?;
    Ok(Json(MemberResponse::from(member)))
}

#[utoipa::path(
    delete,
    path = "/api/gym/{gym_id}/members/{member_id}",
    tag = "members",
    responses(
        (status = 204, description = "Member deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is bound to a different gym"),
        (status = 404, description = "Member not found in this gym")
    ),
    params(
        ("gym_id" = uuid::Uuid, Path, description = "Gym ID"),
        ("member_id" = uuid::Uuid, Path, description = "Member ID")
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn delete_member(
    State(state): State<AppState>,
    current_account: CurrentAccount,
    Path((gym_id, member_id)): Path<(GymId, MemberId)>,
) -> Result<StatusCode> {
    let gym_id = resolve_tenant(&current_account, gym_id)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Members::new(&mut conn);

    if repo.delete(gym_id, member_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(Error::NotFound {
            resource: "Member".to_string(),
            id: member_id.to_string(),
        })
    }
}
