//! Database repository for shop products.

use crate::types::{abbrev_uuid, GymId, ProductId};
use crate::db::{
    errors::{DbError, Result},
    handlers::repository::{ListFilter, TenantRepository},
    models::products::{ProductCreateDBRequest, ProductDBResponse, ProductUpdateDBRequest},
};
use sqlx::PgConnection;
use tracing::instrument;

pub struct Products<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Products<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }
}

#[async_trait::async_trait]
impl<'c> TenantRepository for Products<'c> {
    type CreateRequest = ProductCreateDBRequest;
    type UpdateRequest = ProductUpdateDBRequest;
    type Response = ProductDBResponse;
    type Id = ProductId;

    #[instrument(skip(self, request), fields(gym_id = %abbrev_uuid(&gym_id), name = %request.name), err)]
    async fn create(&mut self, gym_id: GymId, request: &Self::CreateRequest) -> Result<Self::Response> {
        let product = sqlx::query_as::<_, ProductDBResponse>(
            r#"
            INSERT INTO products (gym_id, name, category, price, stock)
            VALUES ($1, $2, $3, $4, COALESCE($5, 0))
            RETURNING *
            "#,
        )
        .bind(gym_id)
        .bind(&request.name)
        .bind(&request.category)
        .bind(request.price)
        .bind(request.stock)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(product)
    }

    #[instrument(skip(self), fields(gym_id = %abbrev_uuid(&gym_id), product_id = %abbrev_uuid(&id)), err)]
    async fn get_by_id(&mut self, gym_id: GymId, id: Self::Id) -> Result<Option<Self::Response>> {
        let product = sqlx::query_as::<_, ProductDBResponse>("SELECT * FROM products WHERE gym_id = $1 AND id = $2")
            .bind(gym_id)
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(product)
    }

    #[instrument(skip(self, filter), fields(gym_id = %abbrev_uuid(&gym_id), limit = filter.limit, skip = filter.skip), err)]
    async fn list(&mut self, gym_id: GymId, filter: &ListFilter) -> Result<Vec<Self::Response>> {
        let products = sqlx::query_as::<_, ProductDBResponse>(
            "SELECT * FROM products WHERE gym_id = $1 ORDER BY name ASC LIMIT $2 OFFSET $3",
        )
        .bind(gym_id)
        .bind(filter.limit)
        .bind(filter.skip)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(products)
    }

    #[instrument(skip(self), fields(gym_id = %abbrev_uuid(&gym_id)), err)]
    async fn count(&mut self, gym_id: GymId) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE gym_id = $1")
            .bind(gym_id)
            .fetch_one(&mut *self.db)
            .await?;

        Ok(count)
    }

    #[instrument(skip(self, request), fields(gym_id = %abbrev_uuid(&gym_id), product_id = %abbrev_uuid(&id)), err)]
    async fn update(&mut self, gym_id: GymId, id: Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response> {
        let product = sqlx::query_as::<_, ProductDBResponse>(
            r#"
            UPDATE products
            SET name = COALESCE($3, name),
                category = COALESCE($4, category),
                price = COALESCE($5, price),
                stock = COALESCE($6, stock),
                updated_at = NOW()
            WHERE gym_id = $1 AND id = $2
            RETURNING *
            "#,
        )
        .bind(gym_id)
        .bind(id)
        .bind(&request.name)
        .bind(&request.category)
        .bind(request.price)
        .bind(request.stock)
        .fetch_optional(&mut *self.db)
        .await?;

        product.ok_or(DbError::NotFound)
    }

    #[instrument(skip(self), fields(gym_id = %abbrev_uuid(&gym_id), product_id = %abbrev_uuid(&id)), err)]
    async fn delete(&mut self, gym_id: GymId, id: Self::Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM products WHERE gym_id = $1 AND id = $2")
            .bind(gym_id)
            .bind(id)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
