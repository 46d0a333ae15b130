//! Database repository for the append-only audit log.
//!
//! Audit entries are never updated or deleted, so this repository exposes
//! only create, paginated list, and a full export.

use crate::db::{
    errors::Result,
    handlers::repository::ListFilter,
    models::logs::{AuditLogDBRequest, AuditLogDBResponse},
};
use sqlx::PgConnection;
use tracing::instrument;

pub struct AuditLogs<'c> {
    db: &'c mut PgConnection,
}

impl<'c> AuditLogs<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    #[instrument(skip(self, request), fields(action = %request.action, entity = %request.entity), err)]
    pub async fn create(&mut self, request: &AuditLogDBRequest) -> Result<AuditLogDBResponse> {
        let entry = sqlx::query_as::<_, AuditLogDBResponse>(
            r#"
            INSERT INTO audit_logs (actor_email, action, entity, detail, gym_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&request.actor_email)
        .bind(&request.action)
        .bind(&request.entity)
        .bind(&request.detail)
        .bind(request.gym_id)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(entry)
    }

    #[instrument(skip(self, filter), fields(limit = filter.limit, skip = filter.skip), err)]
    pub async fn list(&mut self, filter: &ListFilter) -> Result<Vec<AuditLogDBResponse>> {
        let entries = sqlx::query_as::<_, AuditLogDBResponse>(
            "SELECT * FROM audit_logs ORDER BY created_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(filter.limit)
        .bind(filter.skip)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(entries)
    }

    #[instrument(skip(self), err)]
    pub async fn count(&mut self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM audit_logs")
            .fetch_one(&mut *self.db)
            .await?;

        Ok(count)
    }

    /// Full chronological dump, oldest first, for the export endpoint.
    #[instrument(skip(self), err)]
    pub async fn export(&mut self) -> Result<Vec<AuditLogDBResponse>> {
        let entries = sqlx::query_as::<_, AuditLogDBResponse>("SELECT * FROM audit_logs ORDER BY created_at ASC")
            .fetch_all(&mut *self.db)
            .await?;

        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::PgPool;

    #[sqlx::test]
    async fn test_append_and_export_order(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = AuditLogs::new(&mut conn);

        for action in ["login", "gym.created", "gym.deactivated"] {
            repo.create(&AuditLogDBRequest {
                actor_email: "ops@platform.example".into(),
                action: action.into(),
                entity: "gym".into(),
                detail: None,
                gym_id: None,
            })
            .await
            .unwrap();
        }

        assert_eq!(repo.count().await.unwrap(), 3);

        let export = repo.export().await.unwrap();
        assert_eq!(export.len(), 3);
        assert_eq!(export[0].action, "login");
        assert_eq!(export[2].action, "gym.deactivated");

        // List view is newest-first
        let page = repo.list(&ListFilter::new(0, 2)).await.unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].action, "gym.deactivated");
    }
}
