//! Tenant expense tracking.

use crate::api::models::accounts::CurrentAccount;
use crate::api::models::expenses::{ExpenseCreate, ExpenseResponse, ExpenseUpdate};
use crate::api::models::pagination::{PaginatedResponse, Pagination};
use crate::auth::permissions::resolve_tenant;
use crate::db::handlers::{Expenses, ListFilter, TenantRepository};
use crate::db::models::expenses::{ExpenseCreateDBRequest, ExpenseUpdateDBRequest};
use crate::errors::{Error, Result};
use crate::types::{ExpenseId, GymId};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

#[utoipa::path(
    get,
    path = "/api/gym/{gym_id}/expenses",
    tag = "expenses",
    responses(
        (status = 200, description = "List of expenses", body = PaginatedResponse<ExpenseResponse>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is bound to a different gym")
    ),
    params(
        ("gym_id" = uuid::Uuid, Path, description = "Gym ID"),
        ("skip" = Option<i64>, Query, description = "Number of expenses to skip"),
        ("limit" = Option<i64>, Query, description = "Maximum number of expenses to return")
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn list_expenses(
    State(state): State<AppState>,
    current_account: CurrentAccount,
    Path(gym_id): Path<GymId>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<PaginatedResponse<ExpenseResponse>>> {
    let gym_id = resolve_tenant(&current_account, gym_id)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Expenses::new(&mut conn);

    let (skip, limit) = pagination.params();
    let expenses = repo.list(gym_id, &ListFilter::new(skip, limit)).await?;
    let total_count = repo.count(gym_id).await?;

    let data = expenses.into_iter().map(ExpenseResponse::from).collect();
    Ok(Json(PaginatedResponse::new(data, total_count, skip, limit)))
}

#[utoipa::path(
    post,
    path = "/api/gym/{gym_id}/expenses",
    tag = "expenses",
    request_body = ExpenseCreate,
    responses(
        (status = 201, description = "Expense created", body = ExpenseResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is bound to a different gym")
    ),
    params(("gym_id" = uuid::Uuid, Path, description = "Gym ID")),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn create_expense(
    State(state): State<AppState>,
    current_account: CurrentAccount,
    Path(gym_id): Path<GymId>,
    Json(create): Json<ExpenseCreate>,
) -> Result<(StatusCode, Json<ExpenseResponse>)> {
    let gym_id = resolve_tenant(&current_account, gym_id)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Expenses::new(&mut conn);

    let expense = repo.create(gym_id, &ExpenseCreateDBRequest::from(&create)).await?;
    Ok((StatusCode::CREATED, Json(ExpenseResponse::from(expense))))
}

#[utoipa::path(
    get,
    path = "/api/gym/{gym_id}/expenses/{expense_id}",
    tag = "expenses",
    responses(
        (status = 200, description = "Expense details", body = ExpenseResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is bound to a different gym"),
        (status = 404, description = "Expense not found in this gym")
    ),
    params(
        ("gym_id" = uuid::Uuid, Path, description = "Gym ID"),
        ("expense_id" = uuid::Uuid, Path, description = "Expense ID")
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn get_expense(
    State(state): State<AppState>,
    current_account: CurrentAccount,
    Path((gym_id, expense_id)): Path<(GymId, ExpenseId)>,
) -> Result<Json<ExpenseResponse>> {
    let gym_id = resolve_tenant(&current_account, gym_id)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Expenses::new(&mut conn);

    match repo.get_by_id(gym_id, expense_id).await? {
        Some(expense) => Ok(Json(ExpenseResponse::from(expense))),
        None => Err(Error::NotFound {
            resource: "Expense".to_string(),
            id: expense_id.to_string(),
        }),
    }
}

#[utoipa::path(
    put,
    path = "/api/gym/{gym_id}/expenses/{expense_id}",
    tag = "expenses",
    request_body = ExpenseUpdate,
    responses(
        (status = 200, description = "Expense updated", body = ExpenseResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is bound to a different gym"),
        (status = 404, description = "Expense not found in this gym")
    ),
    params(
        ("gym_id" = uuid::Uuid, Path, description = "Gym ID"),
        ("expense_id" = uuid::Uuid, Path, description = "Expense ID")
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn update_expense(
    State(state): State<AppState>,
    current_account: CurrentAccount,
    Path((gym_id, expense_id)): Path<(GymId, ExpenseId)>,
    Json(update): Json<ExpenseUpdate>,
) -> Result<Json<ExpenseResponse>> {
    let gym_id = resolve_tenant(&current_account, gym_id)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Expenses::new(&mut conn);

    let expense = repo
        .update(gym_id, expense_id, &ExpenseUpdateDBRequest::from(update))
        .await?;
    Ok(Json(ExpenseResponse::from(expense)))
}

#[utoipa::path(
    delete,
    path = "/api/gym/{gym_id}/expenses/{expense_id}",
    tag = "expenses",
    responses(
        (status = 204, description = "Expense deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is bound to a different gym"),
        (status = 404, description = "Expense not found in this gym")
    ),
    params(
        ("gym_id" = uuid::Uuid, Path, description = "Gym ID"),
        ("expense_id" = uuid::Uuid, Path, description = "Expense ID")
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn delete_expense(
    State(state): State<AppState>,
    current_account: CurrentAccount,
    Path((gym_id, expense_id)): Path<(GymId, ExpenseId)>,
) -> Result<StatusCode> {
    let gym_id = resolve_tenant(&current_account, gym_id)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Expenses::new(&mut conn);

    if repo.delete(gym_id, expense_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(Error::NotFound {
            resource: "Expense".to_string(),
            id: expense_id.to_string(),
        })
    }
}
