//! Database repository for member subscriptions.

use crate::types::{abbrev_uuid, GymId, SubscriptionId};
use crate::db::{
    errors::{DbError, Result},
    handlers::repository::{ListFilter, TenantRepository},
    models::subscriptions::{SubscriptionCreateDBRequest, SubscriptionDBResponse, SubscriptionUpdateDBRequest},
};
use sqlx::PgConnection;
use tracing::instrument;

pub struct Subscriptions<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Subscriptions<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }
}

#[async_trait::async_trait]
impl<'c> TenantRepository for Subscriptions<'c> {
    type CreateRequest = SubscriptionCreateDBRequest;
    type UpdateRequest = SubscriptionUpdateDBRequest;
    type Response = SubscriptionDBResponse;
    type Id = SubscriptionId;

    #[instrument(skip(self, request), fields(gym_id = %abbrev_uuid(&gym_id), member_id = %abbrev_uuid(&request.member_id)), err)]
    async fn create(&mut self, gym_id: GymId, request: &Self::CreateRequest) -> Result<Self::Response> {
        let subscription = sqlx::query_as::<_, SubscriptionDBResponse>(
            r#"
            INSERT INTO subscriptions (gym_id, member_id, plan, amount, starts_on, expires_on)
            VALUES ($1, $2, $3, $4, COALESCE($5, NOW()), $6)
            RETURNING *
            "#,
        )
        .bind(gym_id)
        .bind(request.member_id)
        .bind(&request.plan)
        .bind(request.amount)
        .bind(request.starts_on)
        .bind(request.expires_on)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(subscription)
    }

    #[instrument(skip(self), fields(gym_id = %abbrev_uuid(&gym_id), subscription_id = %abbrev_uuid(&id)), err)]
    async fn get_by_id(&mut self, gym_id: GymId, id: Self::Id) -> Result<Option<Self::Response>> {
        let subscription =
            sqlx::query_as::<_, SubscriptionDBResponse>("SELECT * FROM subscriptions WHERE gym_id = $1 AND id = $2")
                .bind(gym_id)
                .bind(id)
                .fetch_optional(&mut *self.db)
                .await?;

        Ok(subscription)
    }

    #[instrument(skip(self, filter), fields(gym_id = %abbrev_uuid(&gym_id), limit = filter.limit, skip = filter.skip), err)]
    async fn list(&mut self, gym_id: GymId, filter: &ListFilter) -> Result<Vec<Self::Response>> {
        let subscriptions = sqlx::query_as::<_, SubscriptionDBResponse>(
            "SELECT * FROM subscriptions WHERE gym_id = $1 ORDER BY created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(gym_id)
        .bind(filter.limit)
        .bind(filter.skip)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(subscriptions)
    }

    #[instrument(skip(self), fields(gym_id = %abbrev_uuid(&gym_id)), err)]
    async fn count(&mut self, gym_id: GymId) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM subscriptions WHERE gym_id = $1")
            .bind(gym_id)
            .fetch_one(&mut *self.db)
            .await?;

        Ok(count)
    }

    #[instrument(skip(self, request), fields(gym_id = %abbrev_uuid(&gym_id), subscription_id = %abbrev_uuid(&id)), err)]
    async fn update(&mut self, gym_id: GymId, id: Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response> {
        let subscription = sqlx::query_as::<_, SubscriptionDBResponse>(
            r#"
            UPDATE subscriptions
            SET plan = COALESCE($3, plan),
                amount = COALESCE($4, amount),
                status = COALESCE($5, status),
                expires_on = COALESCE($6, expires_on),
                updated_at = NOW()
            WHERE gym_id = $1 AND id = $2
            RETURNING *
            "#,
        )
        .bind(gym_id)
        .bind(id)
        .bind(&request.plan)
        .bind(request.amount)
        .bind(request.status)
        .bind(request.expires_on)
        .fetch_optional(&mut *self.db)
        .await?;

        subscription.ok_or(DbError::NotFound)
    }

    #[instrument(skip(self), fields(gym_id = %abbrev_uuid(&gym_id), subscription_id = %abbrev_uuid(&id)), err)]
    async fn delete(&mut self, gym_id: GymId, id: Self::Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM subscriptions WHERE gym_id = $1 AND id = $2")
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
    use crate::api::models::subscriptions::SubscriptionStatus;
    use rust_decimal::Decimal;
    use sqlx::PgPool;
    use uuid::Uuid;

    async fn seed_gym_and_member(pool: &PgPool, code: &str) -> (GymId, Uuid) {
        let gym_id: GymId = sqlx::query_scalar("INSERT INTO gyms (code, name) VALUES ($1, $1) RETURNING id")
            .bind(code)
            .fetch_one(pool)
            .await
            .unwrap();
        let member_id: Uuid =
            sqlx::query_scalar("INSERT INTO members (gym_id, name) VALUES ($1, 'Alice') RETURNING id")
                .bind(gym_id)
                .fetch_one(pool)
                .await
                .unwrap();
        (gym_id, member_id)
    }

    #[sqlx::test]
    async fn test_create_defaults_to_pending(pool: PgPool) {
        let (gym_id, member_id) = seed_gym_and_member(&pool, "gym-a").await;
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Subscriptions::new(&mut conn);

        let subscription = repo
            .create(
                gym_id,
                &SubscriptionCreateDBRequest {
                    member_id,
                    plan: "monthly".to_string(),
                    amount: Decimal::new(4999, 2),
                    starts_on: None,
                    expires_on: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(subscription.status, SubscriptionStatus::Pending);
        assert_eq!(subscription.amount, Decimal::new(4999, 2));
    }

    #[sqlx::test]
    async fn test_unknown_member_is_foreign_key_violation(pool: PgPool) {
        let (gym_id, _member_id) = seed_gym_and_member(&pool, "gym-a").await;
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Subscriptions::new(&mut conn);

        let err = repo
            .create(
                gym_id,
                &SubscriptionCreateDBRequest {
                    member_id: Uuid::new_v4(),
                    plan: "monthly".to_string(),
                    amount: Decimal::ONE,
                    starts_on: None,
                    expires_on: None,
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
    }

    #[sqlx::test]
    async fn test_member_delete_cascades(pool: PgPool) {
        let (gym_id, member_id) = seed_gym_and_member(&pool, "gym-a").await;
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Subscriptions::new(&mut conn);

        repo.create(
            gym_id,
            &SubscriptionCreateDBRequest {
                member_id,
                plan: "monthly".to_string(),
                amount: Decimal::ONE,
                starts_on: None,
                expires_on: None,
            },
        )
        .await
        .unwrap();

        sqlx::query("DELETE FROM members WHERE id = $1")
            .bind(member_id)
            .execute(&mut *conn)
            .await
            .unwrap();

        let mut repo = Subscriptions::new(&mut conn);
        assert_eq!(repo.count(gym_id).await.unwrap(), 0);
    }
}
