//! Tenant class schedule management.

use crate::api::models::accounts::CurrentAccount;
use crate::api::models::classes::{ClassCreate, ClassResponse, ClassUpdate};
use crate::api::models::pagination::{PaginatedResponse, Pagination};
use crate::auth::permissions::resolve_tenant;
use crate::db::handlers::{Classes, ListFilter, TenantRepository};
use crate::db::models::classes::{ClassCreateDBRequest, ClassUpdateDBRequest};
use crate::errors::{Error, Result};
use crate::types::{ClassId, GymId};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

#[utoipa::path(
    get,
    path = "/api/gym/{gym_id}/classes",
    tag = "classes",
    responses(
        (status = 200, description = "List of classes", body = PaginatedResponse<ClassResponse>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is bound to a different gym")
    ),
    params(
        ("gym_id" = uuid::Uuid, Path, description = "Gym ID"),
        ("skip" = Option<i64>, Query, description = "Number of classes to skip"),
        ("limit" = Option<i64>, Query, description = "Maximum number of classes to return")
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn list_classes(
    State(state): State<AppState>,
    current_account: CurrentAccount,
    Path(gym_id): Path<GymId>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<PaginatedResponse<ClassResponse>>> {
    let gym_id = resolve_tenant(&current_account, gym_id)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Classes::new(&mut conn);

    let (skip, limit) = pagination.params();
    let classes = repo.list(gym_id, &ListFilter::new(skip, limit)).await?;
    let total_count = repo.count(gym_id).await?;

    let data = classes.into_iter().map(ClassResponse::from).collect();
    Ok(Json(PaginatedResponse::new(data, total_count, skip, limit)))
}

#[utoipa::path(
    post,
    path = "/api/gym/{gym_id}/classes",
    tag = "classes",
    request_body = ClassCreate,
    responses(
        (status = 201, description = "Class created", body = ClassResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is bound to a different gym")
    ),
    params(("gym_id" = uuid::Uuid, Path, description = "Gym ID")),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn create_class(
    State(state): State<AppState>,
    current_account: CurrentAccount,
    Path(gym_id): Path<GymId>,
    Json(create): Json<ClassCreate>,
) -> Result<(StatusCode, Json<ClassResponse>)> {
    let gym_id = resolve_tenant(&current_account, gym_id)?;

    if let Some(capacity) = create.capacity {
        if capacity <= 0 {
            return Err(Error::Validation {
                message: "Class capacity must be positive".to_string(),
            });
        }
    }

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Classes::new(&mut conn);

    let class = repo.create(gym_id, &ClassCreateDBRequest::from(&create)).await?;
    Ok((StatusCode::CREATED, Json(ClassResponse::from(class))))
}

#[utoipa::path(
    get,
    path = "/api/gym/{gym_id}/classes/{class_id}",
    tag = "classes",
    responses(
        (status = 200, description = "Class details", body = ClassResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is bound to a different gym"),
        (status = 404, description = "Class not found in this gym")
    ),
    params(
        ("gym_id" = uuid::Uuid, Path, description = "Gym ID"),
        ("class_id" = uuid::Uuid, Path, description = "Class ID")
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn get_class(
    State(state): State<AppState>,
    current_account: CurrentAccount,
    Path((gym_id, class_id)): Path<(GymId, ClassId)>,
) -> Result<Json<ClassResponse>> {
    let gym_id = resolve_tenant(&current_account, gym_id)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Classes::new(&mut conn);

    match repo.get_by_id(gym_id, class_id).await? {
        Some(class) => Ok(Json(ClassResponse::from(class))),
        None => Err(Error::NotFound {
            resource: "Class".to_string(),
            id: class_id.to_string(),
        }),
    }
}

#[utoipa::path(
    put,
    path = "/api/gym/{gym_id}/classes/{class_id}",
    tag = "classes",
    request_body = ClassUpdate,
    responses(
        (status = 200, description = "Class updated", body = ClassResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is bound to a different gym"),
        (status = 404, description = "Class not found in this gym")
    ),
    params(
        ("gym_id" = uuid::Uuid, Path, description = "Gym ID"),
        ("class_id" = uuid::Uuid, Path, description = "Class ID")
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn update_class(
    State(state): State<AppState>,
    current_account: CurrentAccount,
    Path((gym_id, class_id)): Path<(GymId, ClassId)>,
    Json(update): Json<ClassUpdate>,
) -> Result<Json<ClassResponse>> {
    let gym_id = resolve_tenant(&current_account, gym_id)?;

    if let Some(capacity) = update.capacity {
        if capacity <= 0 {
            return Err(Error::Validation {
                message: "Class capacity must be positive".to_string(),
            });
        }
    }

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Classes::new(&mut conn);

    let class = repo.update(gym_id, class_id, &ClassUpdateDBRequest::from(update)).await?;
    Ok(Json(ClassResponse::from(class)))
}

#[utoipa::path(
    delete,
    path = "/api/gym/{gym_id}/classes/{class_id}",
    tag = "classes",
    responses(
        (status = 204, description = "Class deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is bound to a different gym"),
        (status = 404, description = "Class not found in this gym")
    ),
    params(
        ("gym_id" = uuid::Uuid, Path, description = "Gym ID"),
        ("class_id" = uuid::Uuid, Path, description = "Class ID")
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn delete_class(
    State(state): State<AppState>,
    current_account: CurrentAccount,
    Path((gym_id, class_id)): Path<(GymId, ClassId)>,
) -> Result<StatusCode> {
    let gym_id = resolve_tenant(&current_account, gym_id)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Classes::new(&mut conn);

    if repo.delete(gym_id, class_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(Error::NotFound {
            resource: "Class".to_string(),
            id: class_id.to_string(),
        })
    }
}
