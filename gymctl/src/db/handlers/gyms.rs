//! Database repository for gyms.

use crate::types::{abbrev_uuid, GymId};
use crate::db::{
    errors::{DbError, Result},
    handlers::repository::ListFilter,
    models::gyms::{GymCreateDBRequest, GymDBResponse, GymUpdateDBRequest},
};
use sqlx::PgConnection;
use tracing::instrument;

pub struct Gyms<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Gyms<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    #[instrument(skip(self, request), fields(code = %request.code), err)]
    pub async fn create(&mut self, request: &GymCreateDBRequest) -> Result<GymDBResponse> {
        let gym = sqlx::query_as::<_, GymDBResponse>(
            r#"
            INSERT INTO gyms (code, name, email, phone, address)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&request.code)
        .bind(&request.name)
        .bind(&request.email)
        .bind(&request.phone)
        .bind(&request.address)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(gym)
    }

    #[instrument(skip(self), fields(gym_id = %abbrev_uuid(&id)), err)]
    pub async fn get_by_id(&mut self, id: GymId) -> Result<Option<GymDBResponse>> {
        let gym = sqlx::query_as::<_, GymDBResponse>("SELECT * FROM gyms WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(gym)
    }

    #[instrument(skip(self, filter), fields(limit = filter.limit, skip = filter.skip), err)]
    pub async fn list(&mut self, filter: &ListFilter) -> Result<Vec<GymDBResponse>> {
        let gyms = sqlx::query_as::<_, GymDBResponse>(
            "SELECT * FROM gyms ORDER BY created_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(filter.limit)
        .bind(filter.skip)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(gyms)
    }

    #[instrument(skip(self), err)]
    pub async fn count(&mut self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM gyms")
            .fetch_one(&mut *self.db)
            .await?;

        Ok(count)
    }

    #[instrument(skip(self, request), fields(gym_id = %abbrev_uuid(&id)), err)]
    pub async fn update(&mut self, id: GymId, request: &GymUpdateDBRequest) -> Result<GymDBResponse> {
        let gym = sqlx::query_as::<_, GymDBResponse>(
            r#"
            UPDATE gyms
            SET name = COALESCE($2, name),
                email = COALESCE($3, email),
                phone = COALESCE($4, phone),
                address = COALESCE($5, address),
                is_active = COALESCE($6, is_active),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&request.name)
        .bind(&request.email)
        .bind(&request.phone)
        .bind(&request.address)
        .bind(request.is_active)
        .fetch_optional(&mut *self.db)
        .await?;

        gym.ok_or(DbError::NotFound)
    }

    /// Deactivate a gym. Gyms are never physically deleted; rows under them
    /// stay intact for bookkeeping. Returns false if the gym was already
    /// inactive or absent.
    #[instrument(skip(self), fields(gym_id = %abbrev_uuid(&id)), err)]
    pub async fn deactivate(&mut self, id: GymId) -> Result<bool> {
        let result = sqlx::query("UPDATE gyms SET is_active = FALSE, updated_at = NOW() WHERE id = $1 AND is_active = TRUE")
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

    fn gym_request(code: &str) -> GymCreateDBRequest {
        GymCreateDBRequest {
            code: code.to_string(),
            name: "Iron Temple".to_string(),
            email: Some("front@irontemple.com".to_string()),
            phone: None,
            address: Some("12 Bench St".to_string()),
        }
    }

    #[sqlx::test]
    async fn test_create_list_and_count(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Gyms::new(&mut conn);

        repo.create(&gym_request("iron-temple")).await.unwrap();
        repo.create(&gym_request("squat-city")).await.unwrap();

        assert_eq!(repo.count().await.unwrap(), 2);

        let page = repo.list(&ListFilter::new(0, 1)).await.unwrap();
        assert_eq!(page.len(), 1);
    }

    #[sqlx::test]
    async fn test_duplicate_code_rejected(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Gyms::new(&mut conn);

        repo.create(&gym_request("iron-temple")).await.unwrap();
        let err = repo.create(&gym_request("iron-temple")).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[sqlx::test]
    async fn test_deactivate_is_soft_and_idempotent(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Gyms::new(&mut conn);

        let gym = repo.create(&gym_request("iron-temple")).await.unwrap();

        assert!(repo.deactivate(gym.id).await.unwrap());
        // Second deactivation affects no rows
        assert!(!repo.deactivate(gym.id).await.unwrap());

        // Row still exists
        let reloaded = repo.get_by_id(gym.id).await.unwrap().unwrap();
        assert!(!reloaded.is_active);
    }

    #[sqlx::test]
    async fn test_partial_update(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Gyms::new(&mut conn);

        let gym = repo.create(&gym_request("iron-temple")).await.unwrap();
        let updated = repo
            .update(
                gym.id,
                &GymUpdateDBRequest {
                    phone: Some("555-0100".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        // Untouched fields survive
        assert_eq!(updated.name, "Iron Temple");
        assert_eq!(updated.phone.as_deref(), Some("555-0100"));
    }
}
