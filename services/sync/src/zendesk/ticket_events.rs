use std::time::Duration;

use async_trait::async_trait;
use chrono::DateTime;

use helma_db::sync::repositories::SyncStateRepository;
use helma_db::tickets::repositories::TicketRepository;

use super::client::ZendeskClient;
use super::models::TicketEvent;
use crate::connector::Syncer;
use crate::cursor::resolve_start_cursor;

const ENTITY: &str = "ticket_events";

/// Inter-page throttle for this high-volume export endpoint.
const PAGE_DELAY: Duration = Duration::from_millis(500);

/// Reconciles each ticket's "first time moved to pending" timestamp from the
/// ticket event stream. Events may be replayed or arrive out of order, so
/// the write is an earliest-wins merge rather than an upsert.
pub struct PendingEventSyncer<T, S> {
    client: ZendeskClient,
    ticket_repo: T,
    sync_repo: S,
    backfill_months: u32,
}

impl<T, S> PendingEventSyncer<T, S>
where
    T: TicketRepository,
    S: SyncStateRepository,
{
    pub fn new(client: ZendeskClient, ticket_repo: T, sync_repo: S, backfill_months: u32) -> Self {
        Self {
            client,
            ticket_repo,
            sync_repo,
            backfill_months,
        }
    }
}

#[async_trait]
impl<T, S> Syncer for PendingEventSyncer<T, S>
where
    T: TicketRepository,
    S: SyncStateRepository,
{
    fn entity(&self) -> &str {
        ENTITY
    }

    async fn sync(&self) -> Result<u64, Box<dyn std::error::Error + Send + Sync>> {
        let start_time = resolve_start_cursor(&self.sync_repo, ENTITY, self.backfill_months).await?;

        let mut pages = self.client.export_pages::<TicketEvent>(
            "/api/v2/incremental/ticket_events.json",
            "ticket_events",
            start_time,
            Some(PAGE_DELAY),
        );

        let mut count = 0u64;
        let mut last_end_time = start_time;

        while let Some(page) = pages.next_page().await? {
            for event in &page.items {
                if !event.child_events.iter().any(|ce| ce.is_pending_transition()) {
                    continue;
                }

                let at = DateTime::from_timestamp(event.timestamp, 0).ok_or_else(|| {
                    format!(
                        "event {} has out-of-range timestamp {}",
                        event.id, event.timestamp
                    )
                })?;
                self.ticket_repo
                    .set_first_pending_at_if_earlier(event.ticket_id, at)
                    .await?;
                count += 1;
            }
            last_end_time = page.end_time;
        }

        self.sync_repo
            .set_last_synced_at(ENTITY, last_end_time)
            .await?;

        tracing::info!(count, cursor = last_end_time, "first-pending times reconciled");
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zendesk::test_support::{test_client, InMemorySyncState, RecordingTicketRepo};
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn pending_event(id: i64, ticket_id: i64, timestamp: i64) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "ticket_id": ticket_id,
            "timestamp": timestamp,
            "child_events": [
                { "field_name": "status", "value": "pending", "previous_value": "open" }
            ]
        })
    }

    fn other_event(id: i64, ticket_id: i64, timestamp: i64) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "ticket_id": ticket_id,
            "timestamp": timestamp,
            "child_events": [
                { "field_name": "priority", "value": "high", "previous_value": "normal" },
                { "field_name": "status", "value": "solved", "previous_value": "pending" }
            ]
        })
    }

    #[tokio::test]
    async fn marks_only_pending_transitions() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v2/incremental/ticket_events.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "ticket_events": [
                    pending_event(1, 500, 1_740_000_000),
                    other_event(2, 500, 1_740_000_100),
                    pending_event(3, 501, 1_740_000_200)
                ],
                "end_time": 1_740_000_300i64,
                "end_of_stream": true
            })))
            .mount(&server)
            .await;

        let repo = RecordingTicketRepo::default();
        let state = InMemorySyncState::with(ENTITY, 100);
        let syncer =
            PendingEventSyncer::new(test_client(&server.uri()), repo.clone(), state.clone(), 3);

        let count = syncer.sync().await.expect("sync should succeed");
        assert_eq!(count, 2);

        let marks = repo.pending_marks.lock().unwrap();
        assert_eq!(marks.len(), 2);
        assert_eq!(marks[0].0, 500);
        assert_eq!(marks[0].1.timestamp(), 1_740_000_000);
        assert_eq!(marks[1].0, 501);

        assert_eq!(state.get(ENTITY), Some(1_740_000_300));
    }

    #[tokio::test]
    async fn events_without_child_changes_are_skipped() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v2/incremental/ticket_events.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "ticket_events": [
                    { "id": 1, "ticket_id": 500, "timestamp": 1_740_000_000i64 }
                ],
                "end_time": 1_740_000_300i64,
                "end_of_stream": true
            })))
            .mount(&server)
            .await;

        let repo = RecordingTicketRepo::default();
        let state = InMemorySyncState::with(ENTITY, 100);
        let syncer =
            PendingEventSyncer::new(test_client(&server.uri()), repo.clone(), state.clone(), 3);

        let count = syncer.sync().await.expect("sync should succeed");
        assert_eq!(count, 0);
        assert!(repo.pending_marks.lock().unwrap().is_empty());
        // The stream still completed: the cursor advances.
        assert_eq!(state.get(ENTITY), Some(1_740_000_300));
    }

    #[tokio::test]
    async fn mid_stream_failure_leaves_watermark_unchanged() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v2/incremental/ticket_events.json"))
            .and(query_param("cursor", "2"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/api/v2/incremental/ticket_events.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "ticket_events": [pending_event(1, 500, 1_740_000_000)],
                "end_time": 1_740_000_100i64,
                "end_of_stream": false,
                "next_page": format!("{}/api/v2/incremental/ticket_events.json?cursor=2", server.uri())
            })))
            .mount(&server)
            .await;

        let repo = RecordingTicketRepo::default();
        let state = InMemorySyncState::with(ENTITY, 100);
        let syncer =
            PendingEventSyncer::new(test_client(&server.uri()), repo.clone(), state.clone(), 3);

        assert!(syncer.sync().await.is_err());
        // The first page's merge was applied (idempotent), but the cursor
        // must stay put so the next run replays from the known-good point.
        assert_eq!(repo.pending_marks.lock().unwrap().len(), 1);
        assert_eq!(state.get(ENTITY), Some(100));
    }
}
