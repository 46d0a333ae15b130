//! Platform back-office gym management.
//!
//! Provisioning a gym creates the gym row and its first gym_admin account in
//! a single transaction. Deactivation is soft: the gym row stays for billing
//! history, but its accounts can no longer log in.

use crate::api::models::accounts::{CurrentAccount, Role};
use crate::api::models::gyms::{GymCreate, GymResponse, GymUpdate};
use crate::api::models::pagination::{PaginatedResponse, Pagination};
use crate::auth::{password, permissions::require_platform_operator};
use crate::db::handlers::{Accounts, AuditLogs, Gyms, ListFilter};
use crate::db::models::accounts::AccountCreateDBRequest;
use crate::db::models::gyms::{GymCreateDBRequest, GymUpdateDBRequest};
use crate::db::models::logs::AuditLogDBRequest;
use crate::errors::{Error, Result};
use crate::types::GymId;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use sqlx::Acquire;

#[utoipa::path(
    get,
    path = "/api/gyms",
    tag = "gyms",
    responses(
        (status = 200, description = "List of gyms", body = PaginatedResponse<GymResponse>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Requires the platform_operator role")
    ),
    params(
        ("skip" = Option<i64>, Query, description = "Number of gyms to skip"),
        ("limit" = Option<i64>, Query, description = "Maximum number of gyms to return")
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn list_gyms(
    State(state): State<AppState>,
    current_account: CurrentAccount,
    Query(pagination): Query<Pagination>,
) -> Result<Json<PaginatedResponse<GymResponse>>> {
    require_platform_operator(&current_account)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Gyms::new(&mut conn);

    let (skip, limit) = pagination.params();
    let gyms = repo.list(&ListFilter::new(skip, limit)).await?;
    let total_count = repo.count().await?;

    let data = gyms.into_iter().map(GymResponse::from).collect();
    Ok(Json(PaginatedResponse::new(data, total_count, skip, limit)))
}

#[utoipa::path(
    post,
    path = "/api/gyms",
    tag = "gyms",
    request_body = GymCreate,
    responses(
        (status = 201, description = "Gym provisioned", body = GymResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Requires the platform_operator role"),
        (status = 409, description = "Gym code or admin email already taken")
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn create_gym(
    State(state): State<AppState>,
    current_account: CurrentAccount,
    Json(create): Json<GymCreate>,
) -> Result<(StatusCode, Json<GymResponse>)> {
    require_platform_operator(&current_account)?;

    if create.admin_password.len() < state.config.auth.password.min_length {
        return Err(Error::Validation {
            message: format!(
                "Admin password must be at least {} characters",
                state.config.auth.password.min_length
            ),
        });
    }

    let password_hash = password::hash_password(create.admin_password.clone()).await?;

    // Gym and first admin account succeed or fail together
    let mut tx = state.db.begin().await.map_err(|e| Error::Database(e.into()))?;

    let gym = {
        let mut repo = Gyms::new(tx.acquire().await.map_err(|e| Error::Database(e.into()))?);
        repo.create(&GymCreateDBRequest::from(&create)).await?
    };

    {
        let mut repo = Accounts::new(tx.acquire().await.map_err(|e| Error::Database(e.into()))?);
        repo.create(&AccountCreateDBRequest {
            email: create.admin_email.clone(),
            password_hash,
            display_name: create.admin_name.clone(),
            role: Role::GymAdmin,
            gym_id: Some(gym.id),
        })
        .await?;
    }

    {
        let mut logs = AuditLogs::new(tx.acquire().await.map_err(|e| Error::Database(e.into()))?);
        logs.create(&AuditLogDBRequest {
            actor_email: current_account.email.clone(),
            action: "gym.created".to_string(),
            entity: "gym".to_string(),
            detail: Some(format!("code={}", gym.code)),
            gym_id: Some(gym.id),
        })
        .await?;
    }

    tx.commit().await.map_err(|e| Error::Database(e.into()))?;

    Ok((StatusCode::CREATED, Json(GymResponse::from(gym))))
}

#[utoipa::path(
    get,
    path = "/api/gyms/{gym_id}",
    tag = "gyms",
    responses(
        (status = 200, description = "Gym details", body = GymResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Requires the platform_operator role"),
        (status = 404, description = "Gym not found")
    ),
    params(("gym_id" = uuid::Uuid, Path, description = "Gym ID")),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn get_gym(
    State(state): State<AppState>,
    current_account: CurrentAccount,
    Path(gym_id): Path<GymId>,
) -> Result<Json<GymResponse>> {
    require_platform_operator(&current_account)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Gyms::new(&mut conn);

    match repo.get_by_id(gym_id).await? {
        Some(gym) => Ok(Json(GymResponse::from(gym))),
        None => Err(Error::NotFound {
            resource: "Gym".to_string(),
            id: gym_id.to_string(),
        }),
    }
}

#[utoipa::path(
    put,
    path = "/api/gyms/{gym_id}",
    tag = "gyms",
    request_body = GymUpdate,
    responses(
        (status = 200, description = "Gym updated", body = GymResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Requires the platform_operator role"),
        (status = 404, description = "Gym not found")
    ),
    params(("gym_id" = uuid::Uuid, Path, description = "Gym ID")),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn update_gym(
    State(state): State<AppState>,
    current_account: CurrentAccount,
    Path(gym_id): Path<GymId>,
    Json(update): Json<GymUpdate>,
) -> Result<Json<GymResponse>> {
    require_platform_operator(&current_account)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Gyms::new(&mut conn);

    let gym = repo.update(gym_id, &GymUpdateDBRequest::from(update)).await?;
    Ok(Json(GymResponse::from(gym)))
}

#[utoipa::path(
    delete,
    path = "/api/gyms/{gym_id}",
    tag = "gyms",
    responses(
        (status = 204, description = "Gym deactivated"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Requires the platform_operator role"),
        (status = 404, description = "Gym not found or already deactivated")
    ),
    params(("gym_id" = uuid::Uuid, Path, description = "Gym ID")),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn delete_gym(
    State(state): State<AppState>,
    current_account: CurrentAccount,
    Path(gym_id): Path<GymId>,
) -> Result<StatusCode> {
    require_platform_operator(&current_account)?;

    let mut tx = state.db.begin().await.map_err(|e| Error::Database(e.into()))?;

    let deactivated = {
        let mut repo = Gyms::new(tx.acquire().await.map_err(|e| Error::Database(e.into()))?);
        repo.deactivate(gym_id).await?
    };
    if !deactivated {
        return Err(Error::NotFound {
            resource: "Gym".to_string(),
            id: gym_id.to_string(),
        });
    }

    {
        let mut repo = Accounts::new(tx.acquire().await.map_err(|e| Error::Database(e.into()))?);
        repo.deactivate_for_gym(gym_id).await?;
    }

    {
        let mut logs = AuditLogs::new(tx.acquire().await.map_err(|e| Error::Database(e.into()))?);
        logs.create(&AuditLogDBRequest {
            actor_email: current_account.email.clone(),
            action: "gym.deactivated".to_string(),
            entity: "gym".to_string(),
            detail: None,
            gym_id: Some(gym_id),
        })
        .await?;
    }

    tx.commit().await.map_err(|e| Error::Database(e.into()))?;

    Ok(StatusCode::NO_CONTENT)
}
