//! Platform support ticket management.

use crate::api::models::accounts::CurrentAccount;
use crate::api::models::pagination::{PaginatedResponse, Pagination};
use crate::api::models::support::{SupportTicketCreate, SupportTicketResponse, SupportTicketUpdate};
use crate::auth::permissions::require_platform_operator;
use crate::db::handlers::{ListFilter, Repository, SupportTickets};
use crate::db::models::support::{SupportTicketCreateDBRequest, SupportTicketUpdateDBRequest};
use crate::errors::{Error, Result};
use crate::types::SupportTicketId;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

#[utoipa::path(
    get,
    path = "/api/support/tickets",
    tag = "support",
    responses(
        (status = 200, description = "List of support tickets", body = PaginatedResponse<SupportTicketResponse>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Requires the platform_operator role")
    ),
    params(
        ("skip" = Option<i64>, Query, description = "Number of tickets to skip"),
        ("limit" = Option<i64>, Query, description = "Maximum number of tickets to return")
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn list_tickets(
    State(state): State<AppState>,
    current_account: CurrentAccount,
    Query(pagination): Query<Pagination>,
) -> Result<Json<PaginatedResponse<SupportTicketResponse>>> {
    require_platform_operator(&current_account)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = SupportTickets::new(&mut conn);

    let (skip, limit) = pagination.params();
    let tickets = repo.list(&ListFilter::new(skip, limit)).await?;
    let total_count = repo.count().await?;

    let data = tickets.into_iter().map(SupportTicketResponse::from).collect();
    Ok(Json(PaginatedResponse::new(data, total_count, skip, limit)))
}

#[utoipa::path(
    post,
    path = "/api/support/tickets",
    tag = "support",
    request_body = SupportTicketCreate,
    responses(
        (status = 201, description = "Ticket opened", body = SupportTicketResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Requires the platform_operator role")
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn create_ticket(
    State(state): State<AppState>,
    current_account: CurrentAccount,
    Json(create): Json<SupportTicketCreate>,
) -> Result<(StatusCode, Json<SupportTicketResponse>)> {
    require_platform_operator(&current_account)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = SupportTickets::new(&mut conn);

    let ticket = repo.create(&SupportTicketCreateDBRequest::from(&create)).await?;
    Ok((StatusCode::CREATED, Json(SupportTicketResponse::from(ticket))))
}

#[utoipa::path(
    get,
    path = "/api/support/tickets/{ticket_id}",
    tag = "support",
    responses(
        (status = 200, description = "Ticket details", body = SupportTicketResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Requires the platform_operator role"),
        (status = 404, description = "Ticket not found")
    ),
    params(("ticket_id" = uuid::Uuid, Path, description = "Ticket ID")),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn get_ticket(
    State(state): State<AppState>,
    current_account: CurrentAccount,
    Path(ticket_id): Path<SupportTicketId>,
) -> Result<Json<SupportTicketResponse>> {
    require_platform_operator(&current_account)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = SupportTickets::new(&mut conn);

    match repo.get_by_id(ticket_id).await? {
        Some(ticket) => Ok(Json(SupportTicketResponse::from(ticket))),
        None => Err(Error::NotFound {
            resource: "Support ticket".to_string(),
            id: ticket_id.to_string(),
        }),
    }
}

#[utoipa::path(
    put,
    path = "/api/support/tickets/{ticket_id}",
    tag = "support",
    request_body = SupportTicketUpdate,
    responses(
        (status = 200, description = "Ticket updated", body = SupportTicketResponse),
        (status = 400, description = "Illegal status transition"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Requires the platform_operator role"),
        (status = 404, description = "Ticket not found")
    ),
    params(("ticket_id" = uuid::Uuid, Path, description = "Ticket ID")),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn update_ticket(
    State(state): State<AppState>,
    current_account: CurrentAccount,
    Path(ticket_id): Path<SupportTicketId>,
    Json(update): Json<SupportTicketUpdate>,
) -> Result<Json<SupportTicketResponse>> {
    require_platform_operator(&current_account)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = SupportTickets::new(&mut conn);

    if let Some(next) = update.status {
        let ticket = repo.get_by_id(ticket_id).await?.ok_or_else(|| Error::NotFound {
            resource: "Support ticket".to_string(),
            id: ticket_id.to_string(),
        })?;
        if next != ticket.status && !ticket.status.can_transition_to(next) {
            return Err(Error::Validation {
                message: format!("Cannot move ticket from {:?} to {:?}", ticket.status, next),
            });
        }
    }

    let ticket = repo.update(ticket_id, &SupportTicketUpdateDBRequest::from(update)).await?;
    Ok(Json(SupportTicketResponse::from(ticket)))
}

#[utoipa::path(
    delete,
    path = "/api/support/tickets/{ticket_id}",
    tag = "support",
    responses(
        (status = 204, description = "Ticket deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Requires the platform_operator role"),
        (status = 404, description = "Ticket not found")
    ),
    params(("ticket_id" = uuid::Uuid, Path, description = "Ticket ID")),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn delete_ticket(
    State(state): State<AppState>,
    current_account: CurrentAccount,
    Path(ticket_id): Path<SupportTicketId>,
) -> Result<StatusCode> {
    require_platform_operator(&current_account)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = SupportTickets::new(&mut conn);

    if repo.delete(ticket_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(Error::NotFound {
            resource: "Support ticket".to_string(),
            id: ticket_id.to_string(),
        })
    }
}
