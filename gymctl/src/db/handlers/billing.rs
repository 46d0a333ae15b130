//! Database repository for platform billing records.

use crate::types::{abbrev_uuid, BillingRecordId};
use crate::db::{
    errors::{DbError, Result},
    handlers::repository::{ListFilter, Repository},
    models::billing::{BillingCreateDBRequest, BillingDBResponse, BillingUpdateDBRequest},
};
use sqlx::PgConnection;
use tracing::instrument;

pub struct BillingRecords<'c> {
    db: &'c mut PgConnection,
}

impl<'c> BillingRecords<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }
}

#[async_trait::async_trait]
impl<'c> Repository for BillingRecords<'c> {
    type CreateRequest = BillingCreateDBRequest;
    type UpdateRequest = BillingUpdateDBRequest;
    type Response = BillingDBResponse;
    type Id = BillingRecordId;

    #[instrument(skip(self, request), fields(gym_id = %abbrev_uuid(&request.gym_id)), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let record = sqlx::query_as::<_, BillingDBResponse>(
            r#"
            INSERT INTO billing_records (gym_id, description, amount, due_on)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(request.gym_id)
        .bind(&request.description)
        .bind(request.amount)
        .bind(request.due_on)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(record)
    }

    #[instrument(skip(self), fields(record_id = %abbrev_uuid(&id)), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let record = sqlx::query_as::<_, BillingDBResponse>("SELECT * FROM billing_records WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(record)
    }

    #[instrument(skip(self, filter), fields(limit = filter.limit, skip = filter.skip), err)]
    async fn list(&mut self, filter: &ListFilter) -> Result<Vec<Self::Response>> {
        let records = sqlx::query_as::<_, BillingDBResponse>(
            "SELECT * FROM billing_records ORDER BY created_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(filter.limit)
        .bind(filter.skip)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(records)
    }

    #[instrument(skip(self), err)]
    async fn count(&mut self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM billing_records")
            .fetch_one(&mut *self.db)
            .await?;

        Ok(count)
    }

    #[instrument(skip(self, request), fields(record_id = %abbrev_uuid(&id)), err)]
    async fn update(&mut self, id: Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response> {
        let record = sqlx::query_as::<_, BillingDBResponse>(
            r#"
            UPDATE billing_records
            SET description = COALESCE($2, description),
                amount = COALESCE($3, amount),
                status = COALESCE($4, status),
                due_on = COALESCE($5, due_on),
                paid_on = CASE WHEN $4 = 'paid'::billing_status THEN NOW() ELSE paid_on END,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&request.description)
        .bind(request.amount)
        .bind(request.status)
        .bind(request.due_on)
        .fetch_optional(&mut *self.db)
        .await?;

        record.ok_or(DbError::NotFound)
    }

    #[instrument(skip(self), fields(record_id = %abbrev_uuid(&id)), err)]
    async fn delete(&mut self, id: Self::Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM billing_records WHERE id = $1")
            .bind(id)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::billing::BillingStatus;
    use rust_decimal::Decimal;
    use sqlx::PgPool;
    use uuid::Uuid;

    async fn seed_gym(pool: &PgPool) -> Uuid {
        sqlx::query_scalar("INSERT INTO gyms (code, name) VALUES ('gym-a', 'Gym A') RETURNING id")
            .fetch_one(pool)
            .await
            .unwrap()
    }

    #[sqlx::test]
    async fn test_paid_on_stamped_on_payment(pool: PgPool) {
        let gym_id = seed_gym(&pool).await;
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = BillingRecords::new(&mut conn);

        let record = repo
            .create(&BillingCreateDBRequest {
                gym_id,
                description: "Monthly platform fee".into(),
                amount: Decimal::new(9900, 2),
                due_on: None,
            })
            .await
            .unwrap();
        assert_eq!(record.status, BillingStatus::Pending);
        assert!(record.paid_on.is_none());

        let record = repo
            .update(
                record.id,
                &BillingUpdateDBRequest {
                    status: Some(BillingStatus::Paid),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(record.status, BillingStatus::Paid);
        assert!(record.paid_on.is_some());
    }

    #[sqlx::test]
    async fn test_unknown_gym_rejected(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = BillingRecords::new(&mut conn);

        let err = repo
            .create(&BillingCreateDBRequest {
                gym_id: Uuid::new_v4(),
                description: "Fee".into(),
                amount: Decimal::new(100, 0),
                due_on: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
    }
}
