//! Database repository for expenses.

use crate::types::{abbrev_uuid, ExpenseId, GymId};
use crate::db::{
    errors::{DbError, Result},
    handlers::repository::{ListFilter, TenantRepository},
    models::expenses::{ExpenseCreateDBRequest, ExpenseDBResponse, ExpenseUpdateDBRequest},
};
use sqlx::PgConnection;
use tracing::instrument;

pub struct Expenses<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Expenses<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }
}

#[async_trait::async_trait]
impl<'c> TenantRepository for Expenses<'c> {
    type CreateRequest = ExpenseCreateDBRequest;
    type UpdateRequest = ExpenseUpdateDBRequest;
    type Response = ExpenseDBResponse;
    type Id = ExpenseId;

    #[instrument(skip(self, request), fields(gym_id = %abbrev_uuid(&gym_id), category = %request.category), err)]
    async fn create(&mut self, gym_id: GymId, request: &Self::CreateRequest) -> Result<Self::Response> {
        let expense = sqlx::query_as::<_, ExpenseDBResponse>(
            r#"
            INSERT INTO expenses (gym_id, category, description, amount, incurred_on)
            VALUES ($1, $2, $3, $4, COALESCE($5, NOW()))
            RETURNING *
            "#,
        )
        .bind(gym_id)
        .bind(&request.category)
        .bind(&request.description)
        .bind(request.amount)
        .bind(request.incurred_on)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(expense)
    }

    #[instrument(skip(self), fields(gym_id = %abbrev_uuid(&gym_id), expense_id = %abbrev_uuid(&id)), err)]
    async fn get_by_id(&mut self, gym_id: GymId, id: Self::Id) -> Result<Option<Self::Response>> {
        let expense = sqlx::query_as::<_, ExpenseDBResponse>("SELECT * FROM expenses WHERE gym_id = $1 AND id = $2")
            .bind(gym_id)
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(expense)
    }

    #[instrument(skip(self, filter), fields(gym_id = %abbrev_uuid(&gym_id), limit = filter.limit, skip = filter.skip), err)]
    async fn list(&mut self, gym_id: GymId, filter: &ListFilter) -> Result<Vec<Self::Response>> {
        let expenses = sqlx::query_as::<_, ExpenseDBResponse>(
            "SELECT * FROM expenses WHERE gym_id = $1 ORDER BY incurred_on DESC LIMIT $2 OFFSET $3",
        )
        .bind(gym_id)
        .bind(filter.limit)
        .bind(filter.skip)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(expenses)
    }

    #[instrument(skip(self), fields(gym_id = %abbrev_uuid(&gym_id)), err)]
    async fn count(&mut self, gym_id: GymId) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM expenses WHERE gym_id = $1")
            .bind(gym_id)
            .fetch_one(&mut *self.db)
            .await?;

        Ok(count)
    }

    #[instrument(skip(self, request), fields(gym_id = %abbrev_uuid(&gym_id), expense_id = %abbrev_uuid(&id)), err)]
    async fn update(&mut self, gym_id: GymId, id: Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response> {
        let expense = sqlx::query_as::<_, ExpenseDBResponse>(
            r#"
            UPDATE expenses
            SET category = COALESCE($3, category),
                description = COALESCE($4, description),
                amount = COALESCE($5, amount),
                incurred_on = COALESCE($6, incurred_on),
                updated_at = NOW()
            WHERE gym_id = $1 AND id = $2
            RETURNING *
            "#,
        )
        .bind(gym_id)
        .bind(id)
        .bind(&request.category)
        .bind(&request.description)
        .bind(request.amount)
        .bind(request.incurred_on)
        .fetch_optional(&mut *self.db)
        .await?;

        expense.ok_or(DbError::NotFound)
    }

    #[instrument(skip(self), fields(gym_id = %abbrev_uuid(&gym_id), expense_id = %abbrev_uuid(&id)), err)]
    async fn delete(&mut self, gym_id: GymId, id: Self::Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM expenses WHERE gym_id = $1 AND id = $2")
            .bind(gym_id)
            .bind(id)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
