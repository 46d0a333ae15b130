//! Tenant class reservation management.
//!
//! Booking checks the class and member inside one transaction: both must
//! belong to the caller's gym, and the class must have a free seat once
//! cancelled reservations are discounted. The class row is locked for the
//! duration of the transaction so concurrent bookings serialize.

use crate::api::models::accounts::CurrentAccount;
use crate::api::models::pagination::{PaginatedResponse, Pagination};
use crate::api::models::reservations::{ReservationCreate, ReservationResponse, ReservationUpdate};
use crate::auth::permissions::resolve_tenant;
use crate::db::handlers::{Classes, ListFilter, Reservations, TenantRepository};
use crate::db::models::reservations::{ReservationCreateDBRequest, ReservationUpdateDBRequest};
use crate::errors::{Error, Result};
use crate::types::{GymId, ReservationId};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use sqlx::Acquire;

#[utoipa::path(
    get,
    path = "/api/gym/{gym_id}/reservations",
    tag = "reservations",
    responses(
        (status = 200, description = "List of reservations", body = PaginatedResponse<ReservationResponse>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is bound to a different gym")
    ),
    params(
        ("gym_id" = uuid::Uuid, Path, description = "Gym ID"),
        ("skip" = Option<i64>, Query, description = "Number of reservations to skip"),
        ("limit" = Option<i64>, Query, description = "Maximum number of reservations to return")
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn list_reservations(
    State(state): State<AppState>,
    current_account: CurrentAccount,
    Path(gym_id): Path<GymId>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<PaginatedResponse<ReservationResponse>>> {
    let gym_id = resolve_tenant(&current_account, gym_id)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Reservations::new(&mut conn);

    let (skip, limit) = pagination.params();
    let reservations = repo.list(gym_id, &ListFilter::new(skip, limit)).await?;
    let total_count = repo.count(gym_id).await?;

    let data = reservations.into_iter().map(ReservationResponse::from).collect();
    Ok(Json(PaginatedResponse::new(data, total_count, skip, limit)))
}

#[utoipa::path(
    post,
    path = "/api/gym/{gym_id}/reservations",
    tag = "reservations",
    request_body = ReservationCreate,
    responses(
        (status = 201, description = "Reservation created", body = ReservationResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is bound to a different gym"),
        (status = 404, description = "Class or member not found in this gym"),
        (status = 409, description = "Class is fully booked")
    ),
    params(("gym_id" = uuid::Uuid, Path, description = "Gym ID")),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn create_reservation(
    State(state): State<AppState>,
    current_account: CurrentAccount,
    Path(gym_id): Path<GymId>,
    Json(create): Json<ReservationCreate>,
) -> Result<(StatusCode, Json<ReservationResponse>)> {
    let gym_id = resolve_tenant(&current_account, gym_id)?;

    // The capacity check only holds if the class row stays locked until the
    // insert commits; get_for_booking takes FOR UPDATE for exactly that.
    let mut tx = state.db.begin().await.map_err(|e| Error::Database(e.into()))?;

    let class = {
        let mut classes = Classes::new(tx.acquire().await.map_err(|e| Error::Database(e.into()))?);
        classes
            .get_for_booking(gym_id, create.class_id)
            .await?
            .ok_or_else(|| Error::NotFound {
                resource: "Class".to_string(),
                id: create.class_id.to_string(),
            })?
    };

    super::ensure_member_in_gym(
        tx.acquire().await.map_err(|e| Error::Database(e.into()))?,
        gym_id,
        create.member_id,
    )
    .await?;

    let occupied = {
        let mut classes = Classes::new(tx.acquire().await.map_err(|e| Error::Database(e.into()))?);
        classes.occupied_seats(gym_id, class.id).await?
    };
    if occupied >= class.capacity as i64 {
        return Err(Error::Conflict {
            message: format!("Class {} is fully booked ({} seats)", class.name, class.capacity),
        });
    }

    let reservation = {
        let mut repo = Reservations::new(tx.acquire().await.map_err(|e| Error::Database(e.into()))?);
        repo.create(gym_id, &ReservationCreateDBRequest::from(&create)).await?
    };

    tx.commit().await.map_err(|e| Error::Database(e.into()))?;

    Ok((StatusCode::CREATED, Json(ReservationResponse::from(reservation))))
}

#[utoipa::path(
    get,
    path = "/api/gym/{gym_id}/reservations/{reservation_id}",
    tag = "reservations",
    responses(
        (status = 200, description = "Reservation details", body = ReservationResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is bound to a different gym"),
        (status = 404, description = "Reservation not found in this gym")
    ),
    params(
        ("gym_id" = uuid::Uuid, Path, description = "Gym ID"),
        ("reservation_id" = uuid::Uuid, Path, description = "Reservation ID")
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn get_reservation(
    State(state): State<AppState>,
    current_account: CurrentAccount,
    Path((gym_id, reservation_id)): Path<(GymId, ReservationId)>,
) -> Result<Json<ReservationResponse>> {
    let gym_id = resolve_tenant(&current_account, gym_id)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Reservations::new(&mut conn);

    match repo.get_by_id(gym_id, reservation_id).await? {
        Some(reservation) => Ok(Json(ReservationResponse::from(reservation))),
        None => Err(Error::NotFound {
            resource: "Reservation".to_string(),
            id: reservation_id.to_string(),
        }),
    }
}

#[utoipa::path(
    put,
    path = "/api/gym/{gym_id}/reservations/{reservation_id}",
    tag = "reservations",
    request_body = ReservationUpdate,
    responses(
        (status = 200, description = "Reservation updated", body = ReservationResponse),
        (status = 400, description = "Illegal status transition"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is bound to a different gym"),
        (status = 404, description = "Reservation not found in this gym")
    ),
    params(
        ("gym_id" = uuid::Uuid, Path, description = "Gym ID"),
        ("reservation_id" = uuid::Uuid, Path, description = "Reservation ID")
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn update_reservation(
    State(state): State<AppState>,
    current_account: CurrentAccount,
    Path((gym_id, reservation_id)): Path<(GymId, ReservationId)>,
    Json(update): Json<ReservationUpdate>,
) -> Result<Json<ReservationResponse>> {
    let gym_id = resolve_tenant(&current_account, gym_id)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Reservations::new(&mut conn);

    if let Some(next) = update.status {
        let reservation = repo
            .get_by_id(gym_id, reservation_id)
            .await?
            .ok_or_else(|| Error::NotFound {
                resource: "Reservation".to_string(),
                id: reservation_id.to_string(),
            })?;
        if next != reservation.status && !reservation.status.can_transition_to(next) {
            return Err(Error::Validation {
                message: format!("Cannot move reservation from {:?} to {:?}", reservation.status, next),
            });
        }
    }

    let reservation = repo
        .update(gym_id, reservation_id, &ReservationUpdateDBRequest::from(update))
        .await?;
    Ok(Json(ReservationResponse::from(reservation)))
}

#[utoipa::path(
    delete,
    path = "/api/gym/{gym_id}/reservations/{reservation_id}",
    tag = "reservations",
    responses(
        (status = 204, description = "Reservation deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is bound to a different gym"),
        (status = 404, description = "Reservation not found in this gym")
    ),
    params(
        ("gym_id" = uuid::Uuid, Path, description = "Gym ID"),
        ("reservation_id" = uuid::Uuid, Path, description = "Reservation ID")
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn delete_reservation(
    State(state): State<AppState>,
    current_account: CurrentAccount,
    Path((gym_id, reservation_id)): Path<(GymId, ReservationId)>,
) -> Result<StatusCode> {
    let gym_id = resolve_tenant(&current_account, gym_id)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Reservations::new(&mut conn);

    if repo.delete(gym_id, reservation_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(Error::NotFound {
            resource: "Reservation".to_string(),
            id: reservation_id.to_string(),
        })
    }
}
