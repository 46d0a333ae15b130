//! Database repository for gym members.

use crate::types::{abbrev_uuid, GymId, MemberId};
use crate::db::{
    errors::{DbError, Result},
    handlers::repository::{ListFilter, TenantRepository},
    models::members::{MemberCreateDBRequest, MemberDBResponse, MemberUpdateDBRequest},
};
use sqlx::PgConnection;
use tracing::instrument;

pub struct Members<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Members<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }
}

#[async_trait::async_trait]
impl<'c> TenantRepository for Members<'c> {
    type CreateRequest = MemberCreateDBRequest;
    type UpdateRequest = MemberUpdateDBRequest;
    type Response = MemberDBResponse;
    type Id = MemberId;

    #[instrument(skip(self, request), fields(gym_id = %abbrev_uuid(&gym_id), name = %request.name), err)]
    async fn create(&mut self, gym_id: GymId, request: &Self::CreateRequest) -> Result<Self::Response> {
        let member = sqlx::query_as::<_, MemberDBResponse>(
            r#"
            INSERT INTO members (gym_id, name, email, phone)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(gym_id)
        .bind(&request.name)
        .bind(&request.email)
        .bind(&request.phone)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(member)
    }

    #[instrument(skip(self), fields(gym_id = %abbrev_uuid(&gym_id), member_id = %abbrev_uuid(&id)), err)]
    async fn get_by_id(&mut self, gym_id: GymId, id: Self::Id) -> Result<Option<Self::Response>> {
        let member = sqlx::query_as::<_, MemberDBResponse>("SELECT * FROM members WHERE gym_id = $1 AND id = $2")
            .bind(gym_id)
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(member)
    }

    #[instrument(skip(self, filter), fields(gym_id = %abbrev_uuid(&gym_id), limit = filter.limit, skip = filter.skip), err)]
    async fn list(&mut self, gym_id: GymId, filter: &ListFilter) -> Result<Vec<Self::Response>> {
        let members = sqlx::query_as::<_, MemberDBResponse>(
            "SELECT * FROM members WHERE gym_id = $1 ORDER BY created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(gym_id)
        .bind(filter.limit)
        .bind(filter.skip)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(members)
    }

    #[instrument(skip(self), fields(gym_id = %abbrev_uuid(&gym_id)), err)]
    async fn count(&mut self, gym_id: GymId) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM members WHERE gym_id = $1")
            .bind(gym_id)
            .fetch_one(&mut *self.db)
            .await?;

        Ok(count)
    }

    #[instrument(skip(self, request), fields(gym_id = %abbrev_uuid(&gym_id), member_id = %abbrev_uuid(&id)), err)]
    async fn update(&mut self, gym_id: GymId, id: Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response> {
        let member = sqlx::query_as::<_, MemberDBResponse>(
            r#"
            UPDATE members
            SET name = COALESCE($3, name),
                email = COALESCE($4, email),
                phone = COALESCE($5, phone),
                status = COALESCE($6, status),
                updated_at = NOW()
            WHERE gym_id = $1 AND id = $2
            RETURNING *
            "#,
        )
        .bind(gym_id)
        .bind(id)
        .bind(&request.name)
        .bind(&request.email)
        .bind(&request.phone)
        .bind(request.status)
        .fetch_optional(&mut *self.db)
        .await?;

        member.ok_or(DbError::NotFound)
    }

    #[instrument(skip(self), fields(gym_id = %abbrev_uuid(&gym_id), member_id = %abbrev_uuid(&id)), err)]
    async fn delete(&mut self, gym_id: GymId, id: Self::Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM members WHERE gym_id = $1 AND id = $2")
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
    use crate::api::models::members::MemberStatus;
    use sqlx::PgPool;

    async fn seed_gym(pool: &PgPool, code: &str) -> GymId {
        sqlx::query_scalar("INSERT INTO gyms (code, name) VALUES ($1, $1) RETURNING id")
            .bind(code)
            .fetch_one(pool)
            .await
            .unwrap()
    }

    fn member_request(name: &str) -> MemberCreateDBRequest {
        MemberCreateDBRequest {
            name: name.to_string(),
            email: None,
            phone: None,
        }
    }

    #[sqlx::test]
    async fn test_rows_are_invisible_across_gyms(pool: PgPool) {
        let gym_a = seed_gym(&pool, "gym-a").await;
        let gym_b = seed_gym(&pool, "gym-b").await;

        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Members::new(&mut conn);

        let alice = repo.create(gym_a, &member_request("Alice")).await.unwrap();
        repo.create(gym_b, &member_request("Bob")).await.unwrap();

        // Listing gym A only shows Alice
        let a_members = repo.list(gym_a, &ListFilter::new(0, 50)).await.unwrap();
        assert_eq!(a_members.len(), 1);
        assert_eq!(a_members[0].name, "Alice");

        // Alice is invisible when scoped to gym B
        assert!(repo.get_by_id(gym_b, alice.id).await.unwrap().is_none());

        // Updating and deleting through the wrong gym touch nothing
        let err = repo
            .update(gym_b, alice.id, &MemberUpdateDBRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound));
        assert!(!repo.delete(gym_b, alice.id).await.unwrap());

        // Alice is still there for gym A
        assert!(repo.get_by_id(gym_a, alice.id).await.unwrap().is_some());
    }

    #[sqlx::test]
    async fn test_double_delete(pool: PgPool) {
        let gym = seed_gym(&pool, "gym-a").await;
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Members::new(&mut conn);

        let member = repo.create(gym, &member_request("Alice")).await.unwrap();
        assert!(repo.delete(gym, member.id).await.unwrap());
        assert!(!repo.delete(gym, member.id).await.unwrap());
    }

    #[sqlx::test]
    async fn test_status_update(pool: PgPool) {
        let gym = seed_gym(&pool, "gym-a").await;
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Members::new(&mut conn);

        let member = repo.create(gym, &member_request("Alice")).await.unwrap();
        assert_eq!(member.status, MemberStatus::Pending);

        let updated = repo
            .update(
                gym,
                member.id,
                &MemberUpdateDBRequest {
                    status: Some(MemberStatus::Active),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.status, MemberStatus::Active);
        // Other fields untouched
        assert_eq!(updated.name, "Alice");
    }
}
