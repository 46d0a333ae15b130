//! Database repository for class reservations.

use crate::types::{abbrev_uuid, GymId, ReservationId};
use crate::db::{
    errors::{DbError, Result},
    handlers::repository::{ListFilter, TenantRepository},
    models::reservations::{ReservationCreateDBRequest, ReservationDBResponse, ReservationUpdateDBRequest},
};
use sqlx::PgConnection;
use tracing::instrument;

pub struct Reservations<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Reservations<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }
}

#[async_trait::async_trait]
impl<'c> TenantRepository for Reservations<'c> {
    type CreateRequest = ReservationCreateDBRequest;
    type UpdateRequest = ReservationUpdateDBRequest;
    type Response = ReservationDBResponse;
    type Id = ReservationId;

    #[instrument(skip(self, request), fields(gym_id = %abbrev_uuid(&gym_id), class_id = %abbrev_uuid(&request.class_id)), err)]
    async fn create(&mut self, gym_id: GymId, request: &Self::CreateRequest) -> Result<Self::Response> {
        let reservation = sqlx::query_as::<_, ReservationDBResponse>(
            r#"
            INSERT INTO reservations (gym_id, class_id, member_id)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(gym_id)
        .bind(request.class_id)
        .bind(request.member_id)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(reservation)
    }

    #[instrument(skip(self), fields(gym_id = %abbrev_uuid(&gym_id), reservation_id = %abbrev_uuid(&id)), err)]
    async fn get_by_id(&mut self, gym_id: GymId, id: Self::Id) -> Result<Option<Self::Response>> {
        let reservation =
            sqlx::query_as::<_, ReservationDBResponse>("SELECT * FROM reservations WHERE gym_id = $1 AND id = $2")
                .bind(gym_id)
                .bind(id)
                .fetch_optional(&mut *self.db)
                .await?;

        Ok(reservation)
    }

    #[instrument(skip(self, filter), fields(gym_id = %abbrev_uuid(&gym_id), limit = filter.limit, skip = filter.skip), err)]
    async fn list(&mut self, gym_id: GymId, filter: &ListFilter) -> Result<Vec<Self::Response>> {
        let reservations = sqlx::query_as::<_, ReservationDBResponse>(
            "SELECT * FROM reservations WHERE gym_id = $1 ORDER BY created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(gym_id)
        .bind(filter.limit)
        .bind(filter.skip)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(reservations)
    }

    #[instrument(skip(self), fields(gym_id = %abbrev_uuid(&gym_id)), err)]
    async fn count(&mut self, gym_id: GymId) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM reservations WHERE gym_id = $1")
            .bind(gym_id)
            .fetch_one(&mut *self.db)
            .await?;

        Ok(count)
    }

    #[instrument(skip(self, request), fields(gym_id = %abbrev_uuid(&gym_id), reservation_id = %abbrev_uuid(&id)), err)]
    async fn update(&mut self, gym_id: GymId, id: Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response> {
        let reservation = sqlx::query_as::<_, ReservationDBResponse>(
            r#"
            UPDATE reservations
            SET status = COALESCE($3, status),
                updated_at = NOW()
            WHERE gym_id = $1 AND id = $2
            RETURNING *
            "#,
        )
        .bind(gym_id)
        .bind(id)
        .bind(request.status)
        .fetch_optional(&mut *self.db)
        .await?;

        reservation.ok_or(DbError::NotFound)
    }

    #[instrument(skip(self), fields(gym_id = %abbrev_uuid(&gym_id), reservation_id = %abbrev_uuid(&id)), err)]
    async fn delete(&mut self, gym_id: GymId, id: Self::Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM reservations WHERE gym_id = $1 AND id = $2")
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
    use crate::db::handlers::classes::Classes;
    use chrono::Utc;
    use sqlx::PgPool;
    use uuid::Uuid;

    async fn seed(pool: &PgPool) -> (GymId, Uuid, Uuid) {
        let gym_id: GymId = sqlx::query_scalar("INSERT INTO gyms (code, name) VALUES ('gym-a', 'Gym A') RETURNING id")
            .fetch_one(pool)
            .await
            .unwrap();
        let class_id: Uuid = sqlx::query_scalar(
            "INSERT INTO classes (gym_id, name, capacity, scheduled_at) VALUES ($1, 'Spin', 2, $2) RETURNING id",
        )
        .bind(gym_id)
        .bind(Utc::now())
        .fetch_one(pool)
        .await
        .unwrap();
        let member_id: Uuid =
            sqlx::query_scalar("INSERT INTO members (gym_id, name) VALUES ($1, 'Alice') RETURNING id")
                .bind(gym_id)
                .fetch_one(pool)
                .await
                .unwrap();
        (gym_id, class_id, member_id)
    }

    #[sqlx::test]
    async fn test_create_and_cancel(pool: PgPool) {
        let (gym_id, class_id, member_id) = seed(&pool).await;
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Reservations::new(&mut conn);

        let reservation = repo
            .create(gym_id, &ReservationCreateDBRequest { class_id, member_id })
            .await
            .unwrap();
        assert_eq!(reservation.status, crate::api::models::reservations::ReservationStatus::Pending);

        let mut classes = Classes::new(&mut conn);
        assert_eq!(classes.occupied_seats(gym_id, class_id).await.unwrap(), 1);

        let mut repo = Reservations::new(&mut conn);
        repo.update(
            gym_id,
            reservation.id,
            &ReservationUpdateDBRequest {
                status: Some(crate::api::models::reservations::ReservationStatus::Cancelled),
            },
        )
        .await
        .unwrap();

        // Cancelled reservations free their seat
        let mut classes = Classes::new(&mut conn);
        assert_eq!(classes.occupied_seats(gym_id, class_id).await.unwrap(), 0);
    }
}
