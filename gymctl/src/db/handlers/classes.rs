//! Database repository for scheduled classes.

use crate::types::{abbrev_uuid, ClassId, GymId};
use crate::db::{
    errors::{DbError, Result},
    handlers::repository::{ListFilter, TenantRepository},
    models::classes::{ClassCreateDBRequest, ClassDBResponse, ClassUpdateDBRequest},
};
use sqlx::PgConnection;
use tracing::instrument;

pub struct Classes<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Classes<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// Fetch a class and lock its row until the surrounding transaction ends.
    ///
    /// Booking must go through this: the row lock serializes concurrent
    /// reservations so two transactions cannot both count the last free seat.
    #[instrument(skip(self), fields(gym_id = %abbrev_uuid(&gym_id), class_id = %abbrev_uuid(&class_id)), err)]
    pub async fn get_for_booking(&mut self, gym_id: GymId, class_id: ClassId) -> Result<Option<ClassDBResponse>> {
        let class =
            sqlx::query_as::<_, ClassDBResponse>("SELECT * FROM classes WHERE gym_id = $1 AND id = $2 FOR UPDATE")
                .bind(gym_id)
                .bind(class_id)
                .fetch_optional(&mut *self.db)
                .await?;

        Ok(class)
    }

    /// Count reservations that still occupy a seat (pending or confirmed).
    #[instrument(skip(self), fields(class_id = %abbrev_uuid(&class_id)), err)]
    pub async fn occupied_seats(&mut self, gym_id: GymId, class_id: ClassId) -> Result<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM reservations WHERE gym_id = $1 AND class_id = $2 AND status != 'cancelled'",
        )
        .bind(gym_id)
        .bind(class_id)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(count)
    }
}

#[async_trait::async_trait]
impl<'c> TenantRepository for Classes<'c> {
    type CreateRequest = ClassCreateDBRequest;
    type UpdateRequest = ClassUpdateDBRequest;
    type Response = ClassDBResponse;
    type Id = ClassId;

    #[instrument(skip(self, request), fields(gym_id = %abbrev_uuid(&gym_id), name = %request.name), err)]
    async fn create(&mut self, gym_id: GymId, request: &Self::CreateRequest) -> Result<Self::Response> {
        let class = sqlx::query_as::<_, ClassDBResponse>(
            r#"
            INSERT INTO classes (gym_id, name, instructor, capacity, scheduled_at, duration_minutes)
            VALUES ($1, $2, $3, COALESCE($4, 20), $5, COALESCE($6, 60))
            RETURNING *
            "#,
        )
        .bind(gym_id)
        .bind(&request.name)
        .bind(&request.instructor)
        .bind(request.capacity)
        .bind(request.scheduled_at)
        .bind(request.duration_minutes)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(class)
    }

    #[instrument(skip(self), fields(gym_id = %abbrev_uuid(&gym_id), class_id = %abbrev_uuid(&id)), err)]
    async fn get_by_id(&mut self, gym_id: GymId, id: Self::Id) -> Result<Option<Self::Response>> {
        let class = sqlx::query_as::<_, ClassDBResponse>("SELECT * FROM classes WHERE gym_id = $1 AND id = $2")
            .bind(gym_id)
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(class)
    }

    #[instrument(skip(self, filter), fields(gym_id = %abbrev_uuid(&gym_id), limit = filter.limit, skip = filter.skip), err)]
    async fn list(&mut self, gym_id: GymId, filter: &ListFilter) -> Result<Vec<Self::Response>> {
        let classes = sqlx::query_as::<_, ClassDBResponse>(
            "SELECT * FROM classes WHERE gym_id = $1 ORDER BY scheduled_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(gym_id)
        .bind(filter.limit)
        .bind(filter.skip)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(classes)
    }

    #[instrument(skip(self), fields(gym_id = %abbrev_uuid(&gym_id)), err)]
    async fn count(&mut self, gym_id: GymId) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM classes WHERE gym_id = $1")
            .bind(gym_id)
            .fetch_one(&mut *self.db)
            .await?;

        Ok(count)
    }

    #[instrument(skip(self, request), fields(gym_id = %abbrev_uuid(&gym_id), class_id = %abbrev_uuid(&id)), err)]
    async fn update(&mut self, gym_id: GymId, id: Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response> {
        let class = sqlx::query_as::<_, ClassDBResponse>(
            r#"
            UPDATE classes
            SET name = COALESCE($3, name),
                instructor = COALESCE($4, instructor),
                capacity = COALESCE($5, capacity),
                scheduled_at = COALESCE($6, scheduled_at),
                duration_minutes = COALESCE($7, duration_minutes),
                updated_at = NOW()
            WHERE gym_id = $1 AND id = $2
            RETURNING *
            "#,
        )
        .bind(gym_id)
        .bind(id)
        .bind(&request.name)
        .bind(&request.instructor)
        .bind(request.capacity)
        .bind(request.scheduled_at)
        .bind(request.duration_minutes)
        .fetch_optional(&mut *self.db)
        .await?;

        class.ok_or(DbError::NotFound)
    }

    #[instrument(skip(self), fields(gym_id = %abbrev_uuid(&gym_id), class_id = %abbrev_uuid(&id)), err)]
    async fn delete(&mut self, gym_id: GymId, id: Self::Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM classes WHERE gym_id = $1 AND id = $2")
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
    use chrono::Utc;
    use sqlx::PgPool;

    #[sqlx::test]
    async fn test_create_applies_defaults(pool: PgPool) {
        let gym_id: GymId = sqlx::query_scalar("INSERT INTO gyms (code, name) VALUES ('gym-a', 'Gym A') RETURNING id")
            .fetch_one(&pool)
            .await
            .unwrap();

        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Classes::new(&mut conn);

        let class = repo
            .create(
                gym_id,
                &ClassCreateDBRequest {
                    name: "Spin".to_string(),
                    instructor: None,
                    capacity: None,
                    scheduled_at: Utc::now(),
                    duration_minutes: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(class.capacity, 20);
        assert_eq!(class.duration_minutes, 60);
        assert_eq!(repo.occupied_seats(gym_id, class.id).await.unwrap(), 0);
    }

    #[sqlx::test]
    async fn test_get_for_booking_scopes_by_gym(pool: PgPool) {
        let gym_id: GymId = sqlx::query_scalar("INSERT INTO gyms (code, name) VALUES ('gym-a', 'Gym A') RETURNING id")
            .fetch_one(&pool)
            .await
            .unwrap();

        let class = {
            let mut conn = pool.acquire().await.unwrap();
            let mut repo = Classes::new(&mut conn);
            repo.create(
                gym_id,
                &ClassCreateDBRequest {
                    name: "Yoga".to_string(),
                    instructor: None,
                    capacity: None,
                    scheduled_at: Utc::now(),
                    duration_minutes: None,
                },
            )
            .await
            .unwrap()
        };

        let mut tx = pool.begin().await.unwrap();
        let mut repo = Classes::new(&mut tx);

        let locked = repo.get_for_booking(gym_id, class.id).await.unwrap();
        assert_eq!(locked.map(|c| c.id), Some(class.id));

        let other_gym = repo.get_for_booking(GymId::new_v4(), class.id).await.unwrap();
        assert!(other_gym.is_none());

        tx.commit().await.unwrap();
    }
}
