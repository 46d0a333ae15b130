//! Database repository for accounts.

use crate::types::{abbrev_uuid, AccountId, GymId};
use crate::{
    api::models::accounts::Role,
    db::{
        errors::{DbError, Result},
        models::accounts::{AccountCreateDBRequest, AccountDBResponse, AccountUpdateDBRequest},
    },
};
use sqlx::PgConnection;
use tracing::instrument;

pub struct Accounts<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Accounts<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    #[instrument(skip(self, request), fields(email = %request.email), err)]
    pub async fn create(&mut self, request: &AccountCreateDBRequest) -> Result<AccountDBResponse> {
        let account = sqlx::query_as::<_, AccountDBResponse>(
            r#"
            INSERT INTO accounts (email, password_hash, display_name, role, gym_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&request.email)
        .bind(&request.password_hash)
        .bind(&request.display_name)
        .bind(request.role)
        .bind(request.gym_id)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(account)
    }

    #[instrument(skip(self), fields(account_id = %abbrev_uuid(&id)), err)]
    pub async fn get_by_id(&mut self, id: AccountId) -> Result<Option<AccountDBResponse>> {
        let account = sqlx::query_as::<_, AccountDBResponse>("SELECT * FROM accounts WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(account)
    }

    #[instrument(skip(self, email), err)]
    pub async fn get_by_email(&mut self, email: &str) -> Result<Option<AccountDBResponse>> {
        let account = sqlx::query_as::<_, AccountDBResponse>("SELECT * FROM accounts WHERE email = $1")
            .bind(email)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(account)
    }

    #[instrument(skip(self, request), fields(account_id = %abbrev_uuid(&id)), err)]
    pub async fn update(&mut self, id: AccountId, request: &AccountUpdateDBRequest) -> Result<AccountDBResponse> {
        let account = sqlx::query_as::<_, AccountDBResponse>(
            r#"
            UPDATE accounts
            SET display_name = COALESCE($2, display_name),
                password_hash = COALESCE($3, password_hash),
                is_active = COALESCE($4, is_active),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&request.display_name)
        .bind(&request.password_hash)
        .bind(request.is_active)
        .fetch_optional(&mut *self.db)
        .await?;

        account.ok_or(DbError::NotFound)
    }

    /// Deactivate every account bound to a gym. Used when the gym itself is
    /// deactivated so its admin credentials stop working immediately.
    #[instrument(skip(self), fields(gym_id = %abbrev_uuid(&gym_id)), err)]
    pub async fn deactivate_for_gym(&mut self, gym_id: GymId) -> Result<u64> {
        let result = sqlx::query("UPDATE accounts SET is_active = FALSE, updated_at = NOW() WHERE gym_id = $1")
            .bind(gym_id)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected())
    }

    /// Count accounts holding a given role. Used for idempotent operator seeding.
    #[instrument(skip(self), err)]
    pub async fn count_by_role(&mut self, role: Role) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM accounts WHERE role = $1")
            .bind(role)
            .fetch_one(&mut *self.db)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::password;
    use sqlx::PgPool;

    fn operator_request(email: &str) -> AccountCreateDBRequest {
        AccountCreateDBRequest {
            email: email.to_string(),
            password_hash: password::hash_string("hunter2!").unwrap(),
            display_name: Some("Op".to_string()),
            role: Role::PlatformOperator,
            gym_id: None,
        }
    }

    #[sqlx::test]
    async fn test_create_and_fetch_account(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Accounts::new(&mut conn);

        let created = repo.create(&operator_request("op@example.com")).await.unwrap();
        assert_eq!(created.role, Role::PlatformOperator);
        assert!(created.is_active);

        let by_email = repo.get_by_email("op@example.com").await.unwrap().unwrap();
        assert_eq!(by_email.id, created.id);

        let by_id = repo.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(by_id.email, "op@example.com");
    }

    #[sqlx::test]
    async fn test_duplicate_email_is_unique_violation(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Accounts::new(&mut conn);

        repo.create(&operator_request("dup@example.com")).await.unwrap();
        let err = repo.create(&operator_request("dup@example.com")).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[sqlx::test]
    async fn test_operator_with_gym_violates_check(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();

        let gym_id: GymId = sqlx::query_scalar(
            "INSERT INTO gyms (code, name) VALUES ('iron-temple', 'Iron Temple') RETURNING id",
        )
        .fetch_one(&mut *conn)
        .await
        .unwrap();

        let mut repo = Accounts::new(&mut conn);
        let mut request = operator_request("bad@example.com");
        request.gym_id = Some(gym_id);

        let err = repo.create(&request).await.unwrap_err();
        assert!(matches!(err, DbError::CheckViolation { .. }));
    }

    #[sqlx::test]
    async fn test_deactivate_for_gym(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();

        let gym_id: GymId = sqlx::query_scalar(
            "INSERT INTO gyms (code, name) VALUES ('iron-temple', 'Iron Temple') RETURNING id",
        )
        .fetch_one(&mut *conn)
        .await
        .unwrap();

        let mut repo = Accounts::new(&mut conn);
        let admin = repo
            .create(&AccountCreateDBRequest {
                email: "admin@irontemple.com".to_string(),
                password_hash: password::hash_string("hunter2!").unwrap(),
                display_name: None,
                role: Role::GymAdmin,
                gym_id: Some(gym_id),
            })
            .await
            .unwrap();

        let affected = repo.deactivate_for_gym(gym_id).await.unwrap();
        assert_eq!(affected, 1);

        let reloaded = repo.get_by_id(admin.id).await.unwrap().unwrap();
        assert!(!reloaded.is_active);
    }
}
