use async_trait::async_trait;

use helma_db::sync::repositories::SyncStateRepository;
use helma_db::tickets::models::Ticket;
use helma_db::tickets::repositories::TicketRepository;

use super::client::ZendeskClient;
use super::models::ZendeskTicket;
use crate::connector::Syncer;
use crate::cursor::resolve_start_cursor;

const ENTITY: &str = "tickets";

/// Tag → language vocabulary. Tickets are tagged with bare language codes;
/// the ticket's tags are scanned in order and the first recognized tag wins.
const LANGUAGE_TAGS: [(&str, &str); 6] = [
    ("en", "English"),
    ("fr", "French"),
    ("de", "German"),
    ("es", "Spanish"),
    ("nl", "Dutch"),
    ("pt", "Portuguese"),
];

pub(crate) fn extract_language(tags: &[String]) -> Option<(&'static str, &'static str)> {
    tags.iter().find_map(|tag| {
        LANGUAGE_TAGS
            .iter()
            .find(|(code, _)| *code == tag.as_str())
            .copied()
    })
}

fn to_row(ticket: &ZendeskTicket) -> Ticket {
    let language = extract_language(&ticket.tags);
    Ticket {
        id: ticket.id,
        brand_id: ticket.brand_id,
        status: ticket.status.clone(),
        priority: ticket.priority.clone(),
        assignee_id: ticket.assignee_id,
        group_id: ticket.group_id,
        tags: ticket.tags.clone(),
        language_code: language.map(|(code, _)| code.to_string()),
        language_name: language.map(|(_, name)| name.to_string()),
        subject: ticket.subject.clone(),
        created_at: ticket.created_at,
        updated_at: ticket.updated_at,
    }
}

pub struct TicketSyncer<T, S> {
    client: ZendeskClient,
    ticket_repo: T,
    sync_repo: S,
    backfill_months: u32,
}

impl<T, S> TicketSyncer<T, S>
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
impl<T, S> Syncer for TicketSyncer<T, S>
where
    T: TicketRepository,
    S: SyncStateRepository,
{
    fn entity(&self) -> &str {
        ENTITY
    }

    async fn sync(&self) -> Result<u64, Box<dyn std::error::Error + Send + Sync>> {
        let start_time = resolve_start_cursor(&self.sync_repo, ENTITY, self.backfill_months).await?;

        let mut pages = self.client.export_pages::<ZendeskTicket>(
            "/api/v2/incremental/tickets.json",
            "tickets",
            start_time,
            None,
        );

        let mut count = 0u64;
        let mut last_end_time = start_time;

        while let Some(page) = pages.next_page().await? {
            for ticket in &page.items {
                self.ticket_repo.upsert_ticket(&to_row(ticket)).await?;
                count += 1;
            }
            // Intermediate cursors are not safe resumption points; only the
            // cursor of the page we fully persisted is kept.
            last_end_time = page.end_time;
        }

        // The cursor advances only once the whole stream has completed.
        self.sync_repo
            .set_last_synced_at(ENTITY, last_end_time)
            .await?;

        tracing::info!(count, cursor = last_end_time, "tickets synced");
        Ok(count)
    }
}
