use helma_config::{init_tracing, AppConfig};

#[tokio::main]
async fn main() {
    init_tracing("info");

    let config = AppConfig::from_env().expect("failed to load config");
    let pool = helma_db::create_pool(&config.database_url)
        .await
        .expect("failed to connect to database");

    if let Err(e) = helma_db::run_migrations(&pool).await {
        tracing::error!(error = %e, "migration failed");
        std::process::exit(1);
    }

    tracing::info!("migrations complete");
}
