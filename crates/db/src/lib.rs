pub mod dimensions;
pub mod sync;
pub mod tickets;

use helma_common::error::{HelmaError, HelmaResult};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Create a Postgres connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> HelmaResult<PgPool> {
    tracing::info!("connecting to database");
    PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
        .map_err(|e| HelmaError::Database(e.to_string()))
}

/// Apply any pending schema migrations embedded in this crate.
pub async fn run_migrations(pool: &PgPool) -> HelmaResult<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| HelmaError::Database(e.to_string()))
}
