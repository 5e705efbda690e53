use async_trait::async_trait;

use helma_common::error::HelmaResult;

/// Durable per-entity sync cursor.
///
/// The stored value is the single source of truth for how far an entity's
/// sync has progressed; synchronizers never infer progress from the target
/// tables. Entities never share a key, so no cross-entity coordination is
/// needed.
#[async_trait]
pub trait SyncStateRepository: Send + Sync {
    /// Epoch seconds the entity last synced up to, or `None` if the entity
    /// has never completed a sync.
    async fn last_synced_at(&self, entity: &str) -> HelmaResult<Option<i64>>;

    /// Upsert the watermark. Idempotent, last-write-wins on the entity key.
    async fn set_last_synced_at(&self, entity: &str, epoch_secs: i64) -> HelmaResult<()>;
}
