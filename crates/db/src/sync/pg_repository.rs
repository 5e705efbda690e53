use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::sync::repositories::SyncStateRepository;
use helma_common::error::{HelmaError, HelmaResult};

#[derive(Clone)]
pub struct PgSyncStateRepository {
    pool: PgPool,
}

impl PgSyncStateRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SyncStateRepository for PgSyncStateRepository {
    async fn last_synced_at(&self, entity: &str) -> HelmaResult<Option<i64>> {
        let row = sqlx::query("select last_synced_at from sync_state where entity = $1")
            .bind(entity)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| HelmaError::Database(e.to_string()))?;

        Ok(row.map(|r| r.get::<i64, _>("last_synced_at")))
    }

    async fn set_last_synced_at(&self, entity: &str, epoch_secs: i64) -> HelmaResult<()> {
        sqlx::query(
            "insert into sync_state (entity, last_synced_at, updated_at)
             values ($1, $2, now())
             on conflict (entity) do update set
               last_synced_at = excluded.last_synced_at,
               updated_at = now()",
        )
        .bind(entity)
        .bind(epoch_secs)
        .execute(&self.pool)
        .await
        .map_err(|e| HelmaError::Database(e.to_string()))?;
        Ok(())
    }
}
