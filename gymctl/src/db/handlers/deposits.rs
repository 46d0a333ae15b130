//! Database repository for member deposits.

use crate::types::{abbrev_uuid, DepositId, GymId};
use crate::db::{
    errors::{DbError, Result},
    handlers::repository::{ListFilter, TenantRepository},
    models::deposits::{DepositCreateDBRequest, DepositDBResponse, DepositUpdateDBRequest},
};
use sqlx::PgConnection;
use tracing::instrument;

pub struct Deposits<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Deposits<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }
}

#[async_trait::async_trait]
impl<'c> TenantRepository for Deposits<'c> {
    type CreateRequest = DepositCreateDBRequest;
    type UpdateRequest = DepositUpdateDBRequest;
    type Response = DepositDBResponse;
    type Id = DepositId;

    #[instrument(skip(self, request), fields(gym_id = %abbrev_uuid(&gym_id), member_id = %abbrev_uuid(&request.member_id)), err)]
    async fn create(&mut self, gym_id: GymId, request: &Self::CreateRequest) -> Result<Self::Response> {
        let deposit = sqlx::query_as::<_, DepositDBResponse>(
            r#"
            INSERT INTO deposits (gym_id, member_id, amount, method, reference, received_on)
            VALUES ($1, $2, $3, $4, $5, COALESCE($6, NOW()))
            RETURNING *
            "#,
        )
        .bind(gym_id)
        .bind(request.member_id)
        .bind(request.amount)
        .bind(&request.method)
        .bind(&request.reference)
        .bind(request.received_on)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(deposit)
    }

    #[instrument(skip(self), fields(gym_id = %abbrev_uuid(&gym_id), deposit_id = %abbrev_uuid(&id)), err)]
    async fn get_by_id(&mut self, gym_id: GymId, id: Self::Id) -> Result<Option<Self::Response>> {
        let deposit = sqlx::query_as::<_, DepositDBResponse>("SELECT * FROM deposits WHERE gym_id = $1 AND id = $2")
            .bind(gym_id)
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(deposit)
    }

    #[instrument(skip(self, filter), fields(gym_id = %abbrev_uuid(&gym_id), limit = filter.limit, skip = filter.skip), err)]
    async fn list(&mut self, gym_id: GymId, filter: &ListFilter) -> Result<Vec<Self::Response>> {
        let deposits = sqlx::query_as::<_, DepositDBResponse>(
            "SELECT * FROM deposits WHERE gym_id = $1 ORDER BY received_on DESC LIMIT $2 OFFSET $3",
        )
        .bind(gym_id)
        .bind(filter.limit)
        .bind(filter.skip)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(deposits)
    }

    #[instrument(skip(self), fields(gym_id = %abbrev_uuid(&gym_id)), err)]
    async fn count(&mut self, gym_id: GymId) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM deposits WHERE gym_id = $1")
            .bind(gym_id)
            .fetch_one(&mut *self.db)
            .await?;

        Ok(count)
    }

    #[instrument(skip(self, request), fields(gym_id = %abbrev_uuid(&gym_id), deposit_id = %abbrev_uuid(&id)), err)]
    async fn update(&mut self, gym_id: GymId, id: Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response> {
        let deposit = sqlx::query_as::<_, DepositDBResponse>(
            r#"
            UPDATE deposits
            SET amount = COALESCE($3, amount),
                method = COALESCE($4, method),
                reference = COALESCE($5, reference),
                received_on = COALESCE($6, received_on),
                updated_at = NOW()
            WHERE gym_id = $1 AND id = $2
            RETURNING *
            "#,
        )
        .bind(gym_id)
        .bind(id)
        .bind(request.amount)
        .bind(&request.method)
        .bind(&request.reference)
        .bind(request.received_on)
        .fetch_optional(&mut *self.db)
        .await?;

        deposit.ok_or(DbError::NotFound)
    }

    #[instrument(skip(self), fields(gym_id = %abbrev_uuid(&gym_id), deposit_id = %abbrev_uuid(&id)), err)]
    async fn delete(&mut self, gym_id: GymId, id: Self::Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM deposits WHERE gym_id = $1 AND id = $2")
            .bind(gym_id)
            .bind(id)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
