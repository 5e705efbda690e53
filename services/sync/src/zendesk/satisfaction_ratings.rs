use async_trait::async_trait;

use helma_db::sync::repositories::SyncStateRepository;
use helma_db::tickets::models::SatisfactionRating;
use helma_db::tickets::repositories::TicketRepository;

use super::client::ZendeskClient;
use super::models::ZendeskSatisfactionRating;
use crate::connector::Syncer;
use crate::cursor::resolve_start_cursor;

const ENTITY: &str = "satisfaction_ratings";

pub struct SatisfactionRatingSyncer<T, S> {
    client: ZendeskClient,
    ticket_repo: T,
    sync_repo: S,
    backfill_months: u32,
}

impl<T, S> SatisfactionRatingSyncer<T, S>
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

fn to_row(rating: &ZendeskSatisfactionRating) -> SatisfactionRating {
    SatisfactionRating {
        id: rating.id,
        ticket_id: rating.ticket_id,
        score: rating.score.clone(),
        comment: rating.comment.clone(),
        assignee_id: rating.assignee_id,
        group_id: rating.group_id,
        created_at: rating.created_at,
    }
}

#[async_trait]
impl<T, S> Syncer for SatisfactionRatingSyncer<T, S>
where
    T: TicketRepository,
    S: SyncStateRepository,
{
    fn entity(&self) -> &str {
        ENTITY
    }

    async fn sync(&self) -> Result<u64, Box<dyn std::error::Error + Send + Sync>> {
        let start_time = resolve_start_cursor(&self.sync_repo, ENTITY, self.backfill_months).await?;

        // The ratings endpoint is a filtered listing, not an export stream,
        // so there is no server cursor to resume from.
        let mut pages = self.client.list_pages::<ZendeskSatisfactionRating>(
            &format!("/api/v2/satisfaction_ratings.json?start_time={start_time}"),
            "satisfaction_ratings",
        );

        let mut count = 0u64;
        // Watermark is the max created_at actually observed, across every
        // processed record, as a margin against the listing lagging record
        // timestamps.
        let mut latest_created_at = start_time;

        while let Some(ratings) = pages.next_page().await? {
            for rating in &ratings {
                self.ticket_repo.upsert_rating(&to_row(rating)).await?;
                latest_created_at = latest_created_at.max(rating.created_at.timestamp());
                count += 1;
            }
        }

        self.sync_repo
            .set_last_synced_at(ENTITY, latest_created_at)
            .await?;

        tracing::info!(count, cursor = latest_created_at, "satisfaction ratings synced");
        Ok(count)
    }
}
