use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::tickets::models::{SatisfactionRating, Ticket, TicketMetric};
use helma_common::error::HelmaResult;

#[async_trait]
pub trait TicketRepository: Send + Sync {
    /// Insert or replace a ticket, keyed by upstream id.
    /// Leaves `first_pending_at` untouched on update.
    async fn upsert_ticket(&self, ticket: &Ticket) -> HelmaResult<()>;

    /// Insert or fully replace a metrics row, keyed by ticket id.
    async fn upsert_metric(&self, metric: &TicketMetric) -> HelmaResult<()>;

    /// Insert or fully replace a satisfaction rating, keyed by upstream id.
    async fn upsert_rating(&self, rating: &SatisfactionRating) -> HelmaResult<()>;

    /// Earliest-wins merge of a ticket's first-pending timestamp: the stored
    /// value is lowered to `at` only when currently null or strictly later.
    /// Applying a later-or-equal timestamp is a no-op.
    async fn set_first_pending_at_if_earlier(
        &self,
        ticket_id: i64,
        at: DateTime<Utc>,
    ) -> HelmaResult<()>;
}
