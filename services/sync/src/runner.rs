use sqlx::PgPool;

use helma_db::dimensions::pg_repository::PgDimensionRepository;
use helma_db::sync::pg_repository::PgSyncStateRepository;
use helma_db::tickets::pg_repository::PgTicketRepository;

use crate::connector::{SyncResult, Syncer};
use crate::zendesk::agents::AgentSyncer;
use crate::zendesk::brands::BrandSyncer;
use crate::zendesk::client::ZendeskClient;
use crate::zendesk::groups::GroupSyncer;
use crate::zendesk::satisfaction_ratings::SatisfactionRatingSyncer;
use crate::zendesk::ticket_events::PendingEventSyncer;
use crate::zendesk::ticket_metrics::TicketMetricSyncer;
use crate::zendesk::tickets::TicketSyncer;

/// Run every entity synchronizer once, strictly sequentially, dimensions
/// before facts. A failing entity is recorded and the run moves on; the
/// returned list always has one result per entity.
pub async fn run_full_sync(
    pool: PgPool,
    client: ZendeskClient,
    backfill_months: u32,
) -> Vec<SyncResult> {
    let dimensions = PgDimensionRepository::new(pool.clone());
    let tickets = PgTicketRepository::new(pool.clone());
    let sync_state = PgSyncStateRepository::new(pool);

    let mut results = Vec::new();

    // Dimension tables first: fact rows reference them.
    run_one(
        &BrandSyncer::new(client.clone(), dimensions.clone()),
        &mut results,
    )
    .await;
    run_one(
        &GroupSyncer::new(client.clone(), dimensions.clone()),
        &mut results,
    )
    .await;
    run_one(&AgentSyncer::new(client.clone(), dimensions), &mut results).await;

    run_one(
        &TicketSyncer::new(
            client.clone(),
            tickets.clone(),
            sync_state.clone(),
            backfill_months,
        ),
        &mut results,
    )
    .await;
    run_one(
        &TicketMetricSyncer::new(client.clone(), tickets.clone()),
        &mut results,
    )
    .await;
    run_one(
        &SatisfactionRatingSyncer::new(
            client.clone(),
            tickets.clone(),
            sync_state.clone(),
            backfill_months,
        ),
        &mut results,
    )
    .await;
    run_one(
        &PendingEventSyncer::new(client, tickets, sync_state, backfill_months),
        &mut results,
    )
    .await;

    results
}

async fn run_one<S: Syncer>(syncer: &S, results: &mut Vec<SyncResult>) {
    let entity = syncer.entity().to_string();
    tracing::info!(entity = %entity, "sync starting");

    match syncer.sync().await {
        Ok(count) => {
            results.push(SyncResult {
                entity,
                count,
                error: None,
            });
        }
        Err(e) => {
            let message = e.to_string();
            tracing::error!(entity = %entity, error = %message, "sync failed");
            results.push(SyncResult {
                entity,
                count: 0,
                error: Some(message),
            });
        }
    }
}
