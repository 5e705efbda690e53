mod connector;
mod cursor;
mod runner;
mod zendesk;

use helma_config::{init_tracing, AppConfig};

use crate::zendesk::client::{ZendeskClient, ZendeskClientConfig};

#[tokio::main]
async fn main() {
    init_tracing("info");

    let config = AppConfig::from_env().expect("failed to load config");
    tracing::info!(service = "helma-sync", "starting");

    let pool = helma_db::create_pool(&config.database_url)
        .await
        .expect("failed to connect to database");

    let zendesk_config = ZendeskClientConfig::from_env().expect("zendesk configuration error");
    let client = ZendeskClient::new(zendesk_config).expect("failed to create zendesk client");

    let results = runner::run_full_sync(pool, client, config.backfill_months).await;

    let mut failed = 0usize;
    for result in &results {
        match &result.error {
            Some(message) => {
                failed += 1;
                tracing::error!(entity = %result.entity, error = %message, "entity failed");
            }
            None => {
                tracing::info!(entity = %result.entity, count = result.count, "entity synced");
            }
        }
    }

    if failed > 0 {
        tracing::error!(failed, total = results.len(), "sync finished with failures");
        std::process::exit(1);
    }

    tracing::info!(total = results.len(), "all entities synced");
}
