//! Database repository for attendance records.
//!
//! Attendance differs from the other tenant resources in that its update
//! operation is a checkout: it only stamps `checked_out_at`, so the
//! repository exposes inherent methods instead of implementing
//! [`TenantRepository`](crate::db::handlers::repository::TenantRepository).

use crate::types::{abbrev_uuid, AttendanceRecordId, GymId};
use crate::db::{
    errors::{DbError, Result},
    handlers::repository::ListFilter,
    models::attendance::{AttendanceCheckoutDBRequest, AttendanceCreateDBRequest, AttendanceDBResponse},
};
use sqlx::PgConnection;
use tracing::instrument;

pub struct Attendance<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Attendance<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    #[instrument(skip(self, request), fields(gym_id = %abbrev_uuid(&gym_id), member_id = %abbrev_uuid(&request.member_id)), err)]
    pub async fn create(
        &mut self,
        gym_id: GymId,
        request: &AttendanceCreateDBRequest,
    ) -> Result<AttendanceDBResponse> {
        let record = sqlx::query_as::<_, AttendanceDBResponse>(
            r#"
            INSERT INTO attendance_records (gym_id, member_id, checked_in_at)
            VALUES ($1, $2, COALESCE($3, NOW()))
            RETURNING *
            "#,
        )
        .bind(gym_id)
        .bind(request.member_id)
        .bind(request.checked_in_at)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(record)
    }

    #[instrument(skip(self), fields(gym_id = %abbrev_uuid(&gym_id), record_id = %abbrev_uuid(&id)), err)]
    pub async fn get_by_id(&mut self, gym_id: GymId, id: AttendanceRecordId) -> Result<Option<AttendanceDBResponse>> {
        let record = sqlx::query_as::<_, AttendanceDBResponse>(
            "SELECT * FROM attendance_records WHERE gym_id = $1 AND id = $2",
        )
        .bind(gym_id)
        .bind(id)
        .fetch_optional(&mut *self.db)
        .await?;

        Ok(record)
    }

    #[instrument(skip(self, filter), fields(gym_id = %abbrev_uuid(&gym_id), limit = filter.limit, skip = filter.skip), err)]
    pub async fn list(&mut self, gym_id: GymId, filter: &ListFilter) -> Result<Vec<AttendanceDBResponse>> {
        let records = sqlx::query_as::<_, AttendanceDBResponse>(
            "SELECT * FROM attendance_records WHERE gym_id = $1 ORDER BY checked_in_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(gym_id)
        .bind(filter.limit)
        .bind(filter.skip)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(records)
    }

    #[instrument(skip(self), fields(gym_id = %abbrev_uuid(&gym_id)), err)]
    pub async fn count(&mut self, gym_id: GymId) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM attendance_records WHERE gym_id = $1")
            .bind(gym_id)
            .fetch_one(&mut *self.db)
            .await?;

        Ok(count)
    }

    /// Stamps the checkout time on an open record. Checking out an already
    /// checked-out record overwrites the previous timestamp.
    #[instrument(skip(self, request), fields(gym_id = %abbrev_uuid(&gym_id), record_id = %abbrev_uuid(&id)), err)]
    pub async fn checkout(
        &mut self,
        gym_id: GymId,
        id: AttendanceRecordId,
        request: &AttendanceCheckoutDBRequest,
    ) -> Result<AttendanceDBResponse> {
        let record = sqlx::query_as::<_, AttendanceDBResponse>(
            r#"
            UPDATE attendance_records
            SET checked_out_at = COALESCE($3, NOW()),
                updated_at = NOW()
            WHERE gym_id = $1 AND id = $2
            RETURNING *
            "#,
        )
        .bind(gym_id)
        .bind(id)
        .bind(request.checked_out_at)
        .fetch_optional(&mut *self.db)
        .await?;

        record.ok_or(DbError::NotFound)
    }

    #[instrument(skip(self), fields(gym_id = %abbrev_uuid(&gym_id), record_id = %abbrev_uuid(&id)), err)]
    pub async fn delete(&mut self, gym_id: GymId, id: AttendanceRecordId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM attendance_records WHERE gym_id = $1 AND id = $2")
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
    use uuid::Uuid;

    async fn seed(pool: &PgPool) -> (GymId, Uuid) {
        let gym_id: GymId = sqlx::query_scalar("INSERT INTO gyms (code, name) VALUES ('gym-a', 'Gym A') RETURNING id")
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
    async fn test_checkin_then_checkout(pool: PgPool) {
        let (gym_id, member_id) = seed(&pool).await;
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Attendance::new(&mut conn);

        let record = repo
            .create(
                gym_id,
                &AttendanceCreateDBRequest {
                    member_id,
                    checked_in_at: None,
                },
            )
            .await
            .unwrap();
        assert!(record.checked_out_at.is_none());

        let record = repo
            .checkout(gym_id, record.id, &AttendanceCheckoutDBRequest::default())
            .await
            .unwrap();
        assert!(record.checked_out_at.is_some());
    }

    #[sqlx::test]
    async fn test_checkout_unknown_record(pool: PgPool) {
        let (gym_id, _) = seed(&pool).await;
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Attendance::new(&mut conn);

        let err = repo
            .checkout(gym_id, Uuid::new_v4(), &AttendanceCheckoutDBRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound));
    }
}
