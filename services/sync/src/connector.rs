use async_trait::async_trait;

/// Outcome of one entity's sync attempt, as collected by the runner.
#[derive(Debug, Clone)]
pub struct SyncResult {
    pub entity: String,
    pub count: u64,
    pub error: Option<String>,
}

/// One entity synchronizer: pulls a record stream from upstream and
/// reconciles it into the local store, returning how many records it
/// processed.
#[async_trait]
pub trait Syncer: Send + Sync {
    fn entity(&self) -> &str;
    async fn sync(&self) -> Result<u64, Box<dyn std::error::Error + Send + Sync>>;
}
