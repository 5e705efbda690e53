use async_trait::async_trait;

use helma_db::tickets::models::TicketMetric;
use helma_db::tickets::repositories::TicketRepository;

use super::client::ZendeskClient;
use super::models::{MinutePair, ZendeskTicketMetric};
use crate::connector::Syncer;

const ENTITY: &str = "ticket_metrics";

pub struct TicketMetricSyncer<T> {
    client: ZendeskClient,
    ticket_repo: T,
}

impl<T: TicketRepository> TicketMetricSyncer<T> {
    pub fn new(client: ZendeskClient, ticket_repo: T) -> Self {
        Self {
            client,
            ticket_repo,
        }
    }
}

fn calendar(pair: &Option<MinutePair>) -> Option<i32> {
    pair.as_ref().and_then(|p| p.calendar)
}

fn to_row(metric: &ZendeskTicketMetric) -> TicketMetric {
    TicketMetric {
        ticket_id: metric.ticket_id,
        reply_time_calendar_minutes: calendar(&metric.reply_time_in_minutes),
        reply_time_business_minutes: metric
            .reply_time_in_minutes
            .as_ref()
            .and_then(|p| p.business),
        full_resolution_time_calendar_minutes: calendar(&metric.full_resolution_time_in_minutes),
        full_resolution_time_business_minutes: metric
            .full_resolution_time_in_minutes
            .as_ref()
            .and_then(|p| p.business),
        agent_wait_time_minutes: calendar(&metric.agent_wait_time_in_minutes),
        requester_wait_time_minutes: calendar(&metric.requester_wait_time_in_minutes),
        first_resolution_time_minutes: calendar(&metric.first_resolution_time_in_minutes),
        reopens: metric.reopens,
        replies: metric.replies,
        created_at: metric.created_at,
    }
}

#[async_trait]
impl<T: TicketRepository> Syncer for TicketMetricSyncer<T> {
    fn entity(&self) -> &str {
        ENTITY
    }

    /// Always a full rescan: the metrics endpoint has no incremental cursor,
    /// so every run overwrites one row per ticket.
    async fn sync(&self) -> Result<u64, Box<dyn std::error::Error + Send + Sync>> {
        let mut pages = self
            .client
            .list_pages::<ZendeskTicketMetric>("/api/v2/ticket_metrics.json", "ticket_metrics");
        let mut count = 0u64;

        while let Some(metrics) = pages.next_page().await? {
            for metric in &metrics {
                self.ticket_repo.upsert_metric(&to_row(metric)).await?;
                count += 1;
            }
        }

        tracing::info!(count, "ticket metrics synced");
        Ok(count)
    }
}
