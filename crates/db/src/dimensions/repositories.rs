use async_trait::async_trait;

use crate::dimensions::models::{Agent, Brand, Group};
use helma_common::error::HelmaResult;

#[async_trait]
pub trait DimensionRepository: Send + Sync {
    /// Insert or fully replace a brand, keyed by upstream id.
    async fn upsert_brand(&self, brand: &Brand) -> HelmaResult<()>;

    /// Insert or fully replace a group, keyed by upstream id.
    async fn upsert_group(&self, group: &Group) -> HelmaResult<()>;

    /// Insert or fully replace an agent, keyed by upstream id.
    async fn upsert_agent(&self, agent: &Agent) -> HelmaResult<()>;
}
