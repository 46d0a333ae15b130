//! Database repository for lockers.

use crate::types::{abbrev_uuid, GymId, LockerId};
use crate::db::{
    errors::{DbError, Result},
    handlers::repository::{ListFilter, TenantRepository},
    models::lockers::{LockerCreateDBRequest, LockerDBResponse, LockerUpdateDBRequest},
};
use sqlx::PgConnection;
use tracing::instrument;

pub struct Lockers<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Lockers<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }
}

#[async_trait::async_trait]
impl<'c> TenantRepository for Lockers<'c> {
    type CreateRequest = LockerCreateDBRequest;
    type UpdateRequest = LockerUpdateDBRequest;
    type Response = LockerDBResponse;
    type Id = LockerId;

    #[instrument(skip(self, request), fields(gym_id = %abbrev_uuid(&gym_id), number = %request.number), err)]
    async fn create(&mut self, gym_id: GymId, request: &Self::CreateRequest) -> Result<Self::Response> {
        let locker = sqlx::query_as::<_, LockerDBResponse>(
            r#"
            INSERT INTO lockers (gym_id, number, monthly_fee)
            VALUES ($1, $2, COALESCE($3, 0))
            RETURNING *
            "#,
        )
        .bind(gym_id)
        .bind(&request.number)
        .bind(request.monthly_fee)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(locker)
    }

    #[instrument(skip(self), fields(gym_id = %abbrev_uuid(&gym_id), locker_id = %abbrev_uuid(&id)), err)]
    async fn get_by_id(&mut self, gym_id: GymId, id: Self::Id) -> Result<Option<Self::Response>> {
        let locker = sqlx::query_as::<_, LockerDBResponse>("SELECT * FROM lockers WHERE gym_id = $1 AND id = $2")
            .bind(gym_id)
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(locker)
    }

    #[instrument(skip(self, filter), fields(gym_id = %abbrev_uuid(&gym_id), limit = filter.limit, skip = filter.skip), err)]
    async fn list(&mut self, gym_id: GymId, filter: &ListFilter) -> Result<Vec<Self::Response>> {
        let lockers = sqlx::query_as::<_, LockerDBResponse>(
            "SELECT * FROM lockers WHERE gym_id = $1 ORDER BY number ASC LIMIT $2 OFFSET $3",
        )
        .bind(gym_id)
        .bind(filter.limit)
        .bind(filter.skip)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(lockers)
    }

    #[instrument(skip(self), fields(gym_id = %abbrev_uuid(&gym_id)), err)]
    async fn count(&mut self, gym_id: GymId) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM lockers WHERE gym_id = $1")
            .bind(gym_id)
            .fetch_one(&mut *self.db)
            .await?;

        Ok(count)
    }

    #[instrument(skip(self, request), fields(gym_id = %abbrev_uuid(&gym_id), locker_id = %abbrev_uuid(&id)), err)]
    async fn update(&mut self, gym_id: GymId, id: Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response> {
        let locker = sqlx::query_as::<_, LockerDBResponse>(
            r#"
            UPDATE lockers
            SET member_id = COALESCE($3, member_id),
                status = COALESCE($4, status),
                monthly_fee = COALESCE($5, monthly_fee),
                updated_at = NOW()
            WHERE gym_id = $1 AND id = $2
            RETURNING *
            "#,
        )
        .bind(gym_id)
        .bind(id)
        .bind(request.member_id)
        .bind(request.status)
        .bind(request.monthly_fee)
        .fetch_optional(&mut *self.db)
        .await?;

        locker.ok_or(DbError::NotFound)
    }

    #[instrument(skip(self), fields(gym_id = %abbrev_uuid(&gym_id), locker_id = %abbrev_uuid(&id)), err)]
    async fn delete(&mut self, gym_id: GymId, id: Self::Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM lockers WHERE gym_id = $1 AND id = $2")
            .bind(gym_id)
            .bind(id)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::PgPool;

    async fn seed_gym(pool: &PgPool, code: &str) -> GymId {
        sqlx::query_scalar("INSERT INTO gyms (code, name) VALUES ($1, $1) RETURNING id")
            .bind(code)
            .fetch_one(pool)
            .await
            .unwrap()
    }

    #[sqlx::test]
    async fn test_number_unique_per_gym_only(pool: PgPool) {
        let gym_a = seed_gym(&pool, "gym-a").await;
        let gym_b = seed_gym(&pool, "gym-b").await;

        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Lockers::new(&mut conn);

        let request = LockerCreateDBRequest {
            number: "A-01".to_string(),
            monthly_fee: None,
        };

        repo.create(gym_a, &request).await.unwrap();

        // Same number in the same gym conflicts
        let err = repo.create(gym_a, &request).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));

        // Same number in another gym is fine
        repo.create(gym_b, &request).await.unwrap();
    }
}
