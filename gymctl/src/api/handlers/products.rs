//! Tenant shop product management.

use crate::api::models::accounts::CurrentAccount;
use crate::api::models::pagination::{PaginatedResponse, Pagination};
use crate::api::models::products::{ProductCreate, ProductResponse, ProductUpdate};
use crate::auth::permissions::resolve_tenant;
use crate::db::handlers::{ListFilter, Products, TenantRepository};
use crate::db::models::products::{ProductCreateDBRequest, ProductUpdateDBRequest};
use crate::errors::{Error, Result};
use crate::types::{GymId, ProductId};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

#[utoipa::path(
    get,
    path = "/api/gym/{gym_id}/products",
    tag = "products",
    responses(
        (status = 200, description = "List of products", body = PaginatedResponse<ProductResponse>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is bound to a different gym")
    ),
    params(
        ("gym_id" = uuid::Uuid, Path, description = "Gym ID"),
        ("skip" = Option<i64>, Query, description = "Number of products to skip"),
        ("limit" = Option<i64>, Query, description = "Maximum number of products to return")
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn list_products(
    State(state): State<AppState>,
    current_account: CurrentAccount,
    Path(gym_id): Path<GymId>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<PaginatedResponse<ProductResponse>>> {
    let gym_id = resolve_tenant(&current_account, gym_id)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Products::new(&mut conn);

    let (skip, limit) = pagination.params();
    let products = repo.list(gym_id, &ListFilter::new(skip, limit)).await?;
    let total_count = repo.count(gym_id).await?;

    let data = products.into_iter().map(ProductResponse::from).collect();
    Ok(Json(PaginatedResponse::new(data, total_count, skip, limit)))
}

#[utoipa::path(
    post,
    path = "/api/gym/{gym_id}/products",
    tag = "products",
    request_body = ProductCreate,
    responses(
        (status = 201, description = "Product created", body = ProductResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is bound to a different gym")
    ),
    params(("gym_id" = uuid::Uuid, Path, description = "Gym ID")),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn create_product(
    State(state): State<AppState>,
    current_account: CurrentAccount,
    Path(gym_id): Path<GymId>,
    Json(create): Json<ProductCreate>,
) -> Result<(StatusCode, Json<ProductResponse>)> {
    let gym_id = resolve_tenant(&current_account, gym_id)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Products::new(&mut conn);

    let product = repo.create(gym_id, &ProductCreateDBRequest::from(&create)).await?;
    Ok((StatusCode::CREATED, Json(ProductResponse::from(product))))
}

#[utoipa::path(
    get,
    path = "/api/gym/{gym_id}/products/{product_id}",
    tag = "products",
    responses(
        (status = 200, description = "Product details", body = ProductResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is bound to a different gym"),
        (status = 404, description = "Product not found in this gym")
    ),
    params(
        ("gym_id" = uuid::Uuid, Path, description = "Gym ID"),
        ("product_id" = uuid::Uuid, Path, description = "Product ID")
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn get_product(
    State(state): State<AppState>,
    current_account: CurrentAccount,
    Path((gym_id, product_id)): Path<(GymId, ProductId)>,
) -> Result<Json<ProductResponse>> {
    let gym_id = resolve_tenant(&current_account, gym_id)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Products::new(&mut conn);

    match repo.get_by_id(gym_id, product_id).await? {
        Some(product) => Ok(Json(ProductResponse::from(product))),
        None => Err(Error::NotFound {
            resource: "Product".to_string(),
            id: product_id.to_string(),
        }),
    }
}

#[utoipa::path(
    put,
    path = "/api/gym/{gym_id}/products/{product_id}",
    tag = "products",
    request_body = ProductUpdate,
    responses(
        (status = 200, description = "Product updated", body = ProductResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is bound to a different gym"),
        (status = 404, description = "Product not found in this gym")
    ),
    params(
        ("gym_id" = uuid::Uuid, Path, description = "Gym ID"),
        ("product_id" = uuid::Uuid, Path, description = "Product ID")
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn update_product(
    State(state): State<AppState>,
    current_account: CurrentAccount,
    Path((gym_id, product_id)): Path<(GymId, ProductId)>,
    Json(update): Json<ProductUpdate>,
) -> Result<Json<ProductResponse>> {
    let gym_id = resolve_tenant(&current_account, gym_id)?;

    if let Some(stock) = update.stock {
        if stock < 0 {
            return Err(Error::Validation {
                message: "Product stock cannot be negative".to_string(),
            });
        }
    }

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Products::new(&mut conn);

    let product = repo
        .update(gym_id, product_id, &ProductUpdateDBRequest::from(update))
        .await?;
    Ok(Json(ProductResponse::from(product)))
}

#[utoipa::path(
    delete,
    path = "/api/gym/{gym_id}/products/{product_id}",
    tag = "products",
    responses(
        (status = 204, description = "Product deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is bound to a different gym"),
        (status = 404, description = "Product not found in this gym")
    ),
    params(
        ("gym_id" = uuid::Uuid, Path, description = "Gym ID"),
        ("product_id" = uuid::Uuid, Path, description = "Product ID")
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn delete_product(
    State(state): State<AppState>,
    current_account: CurrentAccount,
    Path((gym_id, product_id)): Path<(GymId, ProductId)>,
) -> Result<StatusCode> {
    let gym_id = resolve_tenant(&current_account, gym_id)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Products::new(&mut conn);

    if repo.delete(gym_id, product_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(Error::NotFound {
            resource: "Product".to_string(),
            id: product_id.to_string(),
        })
    }
}
