use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::tickets::models::{SatisfactionRating, Ticket, TicketMetric};
use crate::tickets::repositories::TicketRepository;
use helma_common::error::{HelmaError, HelmaResult};

#[derive(Clone)]
pub struct PgTicketRepository {
    pool: PgPool,
}

impl PgTicketRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TicketRepository for PgTicketRepository {
    async fn upsert_ticket(&self, ticket: &Ticket) -> HelmaResult<()> {
        sqlx::query(
            "insert into tickets
             (id, brand_id, status, priority, assignee_id, group_id,
              tags, language_code, language_name, subject, created_at, updated_at)
             values ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
             on conflict (id) do update set
               brand_id = excluded.brand_id,
               status = excluded.status,
               priority = excluded.priority,
               assignee_id = excluded.assignee_id,
               group_id = excluded.group_id,
               tags = excluded.tags,
               language_code = excluded.language_code,
               language_name = excluded.language_name,
               subject = excluded.subject,
               created_at = excluded.created_at,
               updated_at = excluded.updated_at",
        )
        .bind(ticket.id)
        .bind(ticket.brand_id)
        .bind(&ticket.status)
        .bind(&ticket.priority)
        .bind(ticket.assignee_id)
        .bind(ticket.group_id)
        .bind(&ticket.tags)
        .bind(&ticket.language_code)
        .bind(&ticket.language_name)
        .bind(&ticket.subject)
        .bind(ticket.created_at)
        .bind(ticket.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| HelmaError::Database(e.to_string()))?;
        Ok(())
    }

    async fn upsert_metric(&self, metric: &TicketMetric) -> HelmaResult<()> {
        sqlx::query(
            "insert into ticket_metrics
             (ticket_id, reply_time_calendar_minutes, reply_time_business_minutes,
              full_resolution_time_calendar_minutes, full_resolution_time_business_minutes,
              agent_wait_time_minutes, requester_wait_time_minutes,
              first_resolution_time_minutes, reopens, replies, created_at)
             values ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             on conflict (ticket_id) do update set
               reply_time_calendar_minutes = excluded.reply_time_calendar_minutes,
               reply_time_business_minutes = excluded.reply_time_business_minutes,
               full_resolution_time_calendar_minutes = excluded.full_resolution_time_calendar_minutes,
               full_resolution_time_business_minutes = excluded.full_resolution_time_business_minutes,
               agent_wait_time_minutes = excluded.agent_wait_time_minutes,
               requester_wait_time_minutes = excluded.requester_wait_time_minutes,
               first_resolution_time_minutes = excluded.first_resolution_time_minutes,
               reopens = excluded.reopens,
               replies = excluded.replies,
               created_at = excluded.created_at",
        )
        .bind(metric.ticket_id)
        .bind(metric.reply_time_calendar_minutes)
        .bind(metric.reply_time_business_minutes)
        .bind(metric.full_resolution_time_calendar_minutes)
        .bind(metric.full_resolution_time_business_minutes)
        .bind(metric.agent_wait_time_minutes)
        .bind(metric.requester_wait_time_minutes)
        .bind(metric.first_resolution_time_minutes)
        .bind(metric.reopens)
        .bind(metric.replies)
        .bind(metric.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| HelmaError::Database(e.to_string()))?;
        Ok(())
    }

    async fn upsert_rating(&self, rating: &SatisfactionRating) -> HelmaResult<()> {
        sqlx::query(
            "insert into satisfaction_ratings
             (id, ticket_id, score, comment, assignee_id, group_id, created_at)
             values ($1, $2, $3, $4, $5, $6, $7)
             on conflict (id) do update set
               ticket_id = excluded.ticket_id,
               score = excluded.score,
               comment = excluded.comment,
               assignee_id = excluded.assignee_id,
               group_id = excluded.group_id,
               created_at = excluded.created_at",
        )
        .bind(rating.id)
        .bind(rating.ticket_id)
        .bind(&rating.score)
        .bind(&rating.comment)
        .bind(rating.assignee_id)
        .bind(rating.group_id)
        .bind(rating.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| HelmaError::Database(e.to_string()))?;
        Ok(())
    }

    async fn set_first_pending_at_if_earlier(
        &self,
        ticket_id: i64,
        at: DateTime<Utc>,
    ) -> HelmaResult<()> {
        // Atomic conditional update: the stored value only ever moves down.
        sqlx::query(
            "update tickets
             set first_pending_at = $2
             where id = $1
               and (first_pending_at is null or first_pending_at > $2)",
        )
        .bind(ticket_id)
        .bind(at)
        .execute(&self.pool)
        .await
        .map_err(|e| HelmaError::Database(e.to_string()))?;
        Ok(())
    }
}
