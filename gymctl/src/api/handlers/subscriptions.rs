//! Tenant subscription management.
//!
//! Responses report `expired` for active subscriptions whose expiry date has
//! passed; no background job rewrites rows.

use crate::api::models::accounts::CurrentAccount;
use crate::api::models::pagination::{PaginatedResponse, Pagination};
use crate::api::models::subscriptions::{SubscriptionCreate, SubscriptionResponse, SubscriptionUpdate};
use crate::auth::permissions::resolve_tenant;
use crate::db::handlers::{ListFilter, Subscriptions, TenantRepository};
use crate::db::models::subscriptions::{SubscriptionCreateDBRequest, SubscriptionUpdateDBRequest};
use crate::errors::{Error, Result};
use crate::types::{GymId, SubscriptionId};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

#[utoipa::path(
    get,
    path = "/api/gym/{gym_id}/subscriptions",
    tag = "subscriptions",
    responses(
        (status = 200, description = "List of subscriptions", body = PaginatedResponse<SubscriptionResponse>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is bound to a different gym")
    ),
    params(
        ("gym_id" = uuid::Uuid, Path, description = "Gym ID"),
        ("skip" = Option<i64>, Query, description = "Number of subscriptions to skip"),
        ("limit" = Option<i64>, Query, description = "Maximum number of subscriptions to return")
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn list_subscriptions(
    State(state): State<AppState>,
    current_account: CurrentAccount,
    Path(gym_id): Path<GymId>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<PaginatedResponse<SubscriptionResponse>>> {
    let gym_id = resolve_tenant(&current_account, gym_id)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Subscriptions::new(&mut conn);

    let (skip, limit) = pagination.params();
    let subscriptions = repo.list(gym_id, &ListFilter::new(skip, limit)).await?;
    let total_count = repo.count(gym_id).await?;

    let data = subscriptions.into_iter().map(SubscriptionResponse::from).collect();
    Ok(Json(PaginatedResponse::new(data, total_count, skip, limit)))
}

#[utoipa::path(
    post,
    path = "/api/gym/{gym_id}/subscriptions",
    tag = "subscriptions",
    request_body = SubscriptionCreate,
    responses(
        (status = 201, description = "Subscription created", body = SubscriptionResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is bound to a different gym"),
        (status = 404, description = "Member not found in this gym")
    ),
    params(("gym_id" = uuid::Uuid, Path, description = "Gym ID")),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn create_subscription(
    State(state): State<AppState>,
    current_account: CurrentAccount,
    Path(gym_id): Path<GymId>,
    Json(create): Json<SubscriptionCreate>,
) -> Result<(StatusCode, Json<SubscriptionResponse>)> {
    let gym_id = resolve_tenant(&current_account, gym_id)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    super::ensure_member_in_gym(&mut conn, gym_id, create.member_id).await?;

    let mut repo = Subscriptions::new(&mut conn);
    let subscription = repo.create(gym_id, &SubscriptionCreateDBRequest::from(&create)).await?;
    Ok((StatusCode::CREATED, Json(SubscriptionResponse::from(subscription))))
}

#[utoipa::path(
    get,
    path = "/api/gym/{gym_id}/subscriptions/{subscription_id}",
    tag = "subscriptions",
    responses(
        (status = 200, description = "Subscription details", body = SubscriptionResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is bound to a different gym"),
        (status = 404, description = "Subscription not found in this gym")
    ),
    params(
        ("gym_id" = uuid::Uuid, Path, description = "Gym ID"),
        ("subscription_id" = uuid::Uuid, Path, description = "Subscription ID")
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn get_subscription(
    State(state): State<AppState>,
    current_account: CurrentAccount,
    Path((gym_id, subscription_id)): Path<(GymId, SubscriptionId)>,
) -> Result<Json<SubscriptionResponse>> {
    let gym_id = resolve_tenant(&current_account, gym_id)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Subscriptions::new(&mut conn);

    match repo.get_by_id(gym_id, subscription_id).await? {
        Some(subscription) => Ok(Json(SubscriptionResponse::from(subscription))),
        None => Err(Error::NotFound {
            resource: "Subscription".to_string(),
            id: subscription_id.to_string(),
        }),
    }
}

#[utoipa::path(
    put,
    path = "/api/gym/{gym_id}/subscriptions/{subscription_id}",
    tag = "subscriptions",
    request_body = SubscriptionUpdate,
    responses(
        (status = 200, description = "Subscription updated", body = SubscriptionResponse),
        (status = 400, description = "Illegal status transition"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is bound to a different gym"),
        (status = 404, description = "Subscription not found in this gym")
    ),
    params(
        ("gym_id" = uuid::Uuid, Path, description = "Gym ID"),
        ("subscription_id" = uuid::Uuid, Path, description = "Subscription ID")
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn update_subscription(
    State(state): State<AppState>,
    current_account: CurrentAccount,
    Path((gym_id, subscription_id)): Path<(GymId, SubscriptionId)>,
    Json(update): Json<SubscriptionUpdate>,
) -> Result<Json<SubscriptionResponse>> {
    let gym_id = resolve_tenant(&current_account, gym_id)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Subscriptions::new(&mut conn);

    if let Some(next) = update.status {
        let subscription = repo
            .get_by_id(gym_id, subscription_id)
            .await?
            .ok_or_else(|| Error::NotFound {
                resource: "Subscription".to_string(),
                id: subscription_id.to_string(),
            })?;
        if next != subscription.status && !subscription.status.can_transition_to(next) {
            return Err(Error::Validation {
                message: format!("Cannot move subscription from {:?} to {:?}", subscription.status, next),
            });
        }
    }

    let subscription = repo
        .update(gym_id, subscription_id, &SubscriptionUpdateDBRequest::from(update))
        .await?;
    Ok(Json(SubscriptionResponse::from(subscription)))
}

#[utoipa::path(
    delete,
    path = "/api/gym/{gym_id}/subscriptions/{subscription_id}",
    tag = "subscriptions",
    responses(
        (status = 204, description = "Subscription deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is bound to a different gym"),
        (status = 404, description = "Subscription not found in this gym")
    ),
    params(
        ("gym_id" = uuid::Uuid, Path, description = "Gym ID"),
        ("subscription_id" = uuid::Uuid, Path, description = "Subscription ID")
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn delete_subscription(
    State(state): State<AppState>,
    current_account: CurrentAccount,
    Path((gym_id, subscription_id)): Path<(GymId, SubscriptionId)>,
) -> Result<StatusCode> {
    let gym_id = resolve_tenant(&current_account, gym_id)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Subscriptions::new(&mut conn);

    if repo.delete(gym_id, subscription_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(Error::NotFound {
            resource: "Subscription".to_string(),
            id: subscription_id.to_string(),
        })
    }
}
