//! Database repository for support tickets.

use crate::types::{abbrev_uuid, SupportTicketId};
use crate::db::{
    errors::{DbError, Result},
    handlers::repository::{ListFilter, Repository},
    models::support::{SupportTicketCreateDBRequest, SupportTicketDBResponse, SupportTicketUpdateDBRequest},
};
use sqlx::PgConnection;
use tracing::instrument;

pub struct SupportTickets<'c> {
    db: &'c mut PgConnection,
}

impl<'c> SupportTickets<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }
}

#[async_trait::async_trait]
impl<'c> Repository for SupportTickets<'c> {
    type CreateRequest = SupportTicketCreateDBRequest;
    type UpdateRequest = SupportTicketUpdateDBRequest;
    type Response = SupportTicketDBResponse;
    type Id = SupportTicketId;

    #[instrument(skip(self, request), fields(subject = %request.subject), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let ticket = sqlx::query_as::<_, SupportTicketDBResponse>(
            r#"
            INSERT INTO support_tickets (gym_id, subject, body, opened_by)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(request.gym_id)
        .bind(&request.subject)
        .bind(&request.body)
        .bind(&request.opened_by)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(ticket)
    }

    #[instrument(skip(self), fields(ticket_id = %abbrev_uuid(&id)), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let ticket = sqlx::query_as::<_, SupportTicketDBResponse>("SELECT * FROM support_tickets WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(ticket)
    }

    #[instrument(skip(self, filter), fields(limit = filter.limit, skip = filter.skip), err)]
    async fn list(&mut self, filter: &ListFilter) -> Result<Vec<Self::Response>> {
        let tickets = sqlx::query_as::<_, SupportTicketDBResponse>(
            "SELECT * FROM support_tickets ORDER BY created_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(filter.limit)
        .bind(filter.skip)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(tickets)
    }

    #[instrument(skip(self), err)]
    async fn count(&mut self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM support_tickets")
            .fetch_one(&mut *self.db)
            .await?;

        Ok(count)
    }

    #[instrument(skip(self, request), fields(ticket_id = %abbrev_uuid(&id)), err)]
    async fn update(&mut self, id: Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response> {
        let ticket = sqlx::query_as::<_, SupportTicketDBResponse>(
            r#"
            UPDATE support_tickets
            SET subject = COALESCE($2, subject),
                body = COALESCE($3, body),
                status = COALESCE($4, status),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&request.subject)
        .bind(&request.body)
        .bind(request.status)
        .fetch_optional(&mut *self.db)
        .await?;

        ticket.ok_or(DbError::NotFound)
    }

    #[instrument(skip(self), fields(ticket_id = %abbrev_uuid(&id)), err)]
    async fn delete(&mut self, id: Self::Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM support_tickets WHERE id = $1")
            .bind(id)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::support::TicketStatus;
    use sqlx::PgPool;

    #[sqlx::test]
    async fn test_ticket_without_gym(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = SupportTickets::new(&mut conn);

        // Tickets may be raised before any gym exists (prospect enquiries)
        let ticket = repo
            .create(&SupportTicketCreateDBRequest {
                gym_id: None,
                subject: "Cannot log in".into(),
                body: Some("Password reset loops".into()),
                opened_by: "admin@ironworks.example".into(),
            })
            .await
            .unwrap();
        assert_eq!(ticket.status, TicketStatus::Open);
        assert!(ticket.gym_id.is_none());

        let ticket = repo
            .update(
                ticket.id,
                &SupportTicketUpdateDBRequest {
                    status: Some(TicketStatus::InProgress),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(ticket.status, TicketStatus::InProgress);
    }
}
