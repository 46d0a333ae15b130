//! Database repository for payroll records.

use crate::types::{abbrev_uuid, GymId, PayrollRecordId};
use crate::{
    api::models::payroll::PayrollStatus,
    db::{
        errors::{DbError, Result},
        handlers::repository::{ListFilter, TenantRepository},
        models::payroll::{PayrollRecordCreateDBRequest, PayrollRecordDBResponse, PayrollRecordUpdateDBRequest},
    },
};
use sqlx::PgConnection;
use tracing::instrument;

pub struct PayrollRecords<'c> {
    db: &'c mut PgConnection,
}

impl<'c> PayrollRecords<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }
}

#[async_trait::async_trait]
impl<'c> TenantRepository for PayrollRecords<'c> {
    type CreateRequest = PayrollRecordCreateDBRequest;
    type UpdateRequest = PayrollRecordUpdateDBRequest;
    type Response = PayrollRecordDBResponse;
    type Id = PayrollRecordId;

    #[instrument(skip(self, request), fields(gym_id = %abbrev_uuid(&gym_id), period = %request.period), err)]
    async fn create(&mut self, gym_id: GymId, request: &Self::CreateRequest) -> Result<Self::Response> {
        let record = sqlx::query_as::<_, PayrollRecordDBResponse>(
            r#"
            INSERT INTO payroll_records (gym_id, staff_name, role_title, amount, period)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(gym_id)
        .bind(&request.staff_name)
        .bind(&request.role_title)
        .bind(request.amount)
        .bind(&request.period)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(record)
    }

    #[instrument(skip(self), fields(gym_id = %abbrev_uuid(&gym_id), record_id = %abbrev_uuid(&id)), err)]
    async fn get_by_id(&mut self, gym_id: GymId, id: Self::Id) -> Result<Option<Self::Response>> {
        let record =
            sqlx::query_as::<_, PayrollRecordDBResponse>("SELECT * FROM payroll_records WHERE gym_id = $1 AND id = $2")
                .bind(gym_id)
                .bind(id)
                .fetch_optional(&mut *self.db)
                .await?;

        Ok(record)
    }

    #[instrument(skip(self, filter), fields(gym_id = %abbrev_uuid(&gym_id), limit = filter.limit, skip = filter.skip), err)]
    async fn list(&mut self, gym_id: GymId, filter: &ListFilter) -> Result<Vec<Self::Response>> {
        let records = sqlx::query_as::<_, PayrollRecordDBResponse>(
            "SELECT * FROM payroll_records WHERE gym_id = $1 ORDER BY created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(gym_id)
        .bind(filter.limit)
        .bind(filter.skip)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(records)
    }

    #[instrument(skip(self), fields(gym_id = %abbrev_uuid(&gym_id)), err)]
    async fn count(&mut self, gym_id: GymId) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM payroll_records WHERE gym_id = $1")
            .bind(gym_id)
            .fetch_one(&mut *self.db)
            .await?;

        Ok(count)
    }

    #[instrument(skip(self, request), fields(gym_id = %abbrev_uuid(&gym_id), record_id = %abbrev_uuid(&id)), err)]
    async fn update(&mut self, gym_id: GymId, id: Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response> {
        // paid_on is stamped exactly when the status moves to paid
        let record = sqlx::query_as::<_, PayrollRecordDBResponse>(
            r#"
            UPDATE payroll_records
            SET staff_name = COALESCE($3, staff_name),
                role_title = COALESCE($4, role_title),
                amount = COALESCE($5, amount),
                period = COALESCE($6, period),
                status = COALESCE($7, status),
                paid_on = CASE WHEN $7 = 'paid'::payroll_status THEN NOW() ELSE paid_on END,
                updated_at = NOW()
            WHERE gym_id = $1 AND id = $2
            RETURNING *
            "#,
        )
        .bind(gym_id)
        .bind(id)
        .bind(&request.staff_name)
        .bind(&request.role_title)
        .bind(request.amount)
        .bind(&request.period)
        .bind(request.status)
        .fetch_optional(&mut *self.db)
        .await?;

        record.ok_or(DbError::NotFound)
    }

    #[instrument(skip(self), fields(gym_id = %abbrev_uuid(&gym_id), record_id = %abbrev_uuid(&id)), err)]
    async fn delete(&mut self, gym_id: GymId, id: Self::Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM payroll_records WHERE gym_id = $1 AND id = $2")
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
    use rust_decimal::Decimal;
    use sqlx::PgPool;

    #[sqlx::test]
    async fn test_paid_on_stamped_with_status(pool: PgPool) {
        let gym_id: GymId = sqlx::query_scalar("INSERT INTO gyms (code, name) VALUES ('gym-a', 'Gym A') RETURNING id")
            .fetch_one(&pool)
            .await
            .unwrap();

        let mut conn = pool.acquire().await.unwrap();
        let mut repo = PayrollRecords::new(&mut conn);

        let record = repo
            .create(
                gym_id,
                &PayrollRecordCreateDBRequest {
                    staff_name: "Jo Coach".to_string(),
                    role_title: Some("Trainer".to_string()),
                    amount: Decimal::new(250_000, 2),
                    period: "2026-08".to_string(),
                },
            )
            .await
            .unwrap();
        assert_eq!(record.status, PayrollStatus::Pending);
        assert!(record.paid_on.is_none());

        let paid = repo
            .update(
                gym_id,
                record.id,
                &PayrollRecordUpdateDBRequest {
                    status: Some(PayrollStatus::Paid),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(paid.status, PayrollStatus::Paid);
        assert!(paid.paid_on.is_some());
    }
}
