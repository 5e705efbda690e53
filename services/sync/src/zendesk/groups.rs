use async_trait::async_trait;

use helma_db::dimensions::models::Group;
use helma_db::dimensions::repositories::DimensionRepository;

use super::client::ZendeskClient;
use super::models::ZendeskGroup;
use crate::connector::Syncer;

const ENTITY: &str = "groups";

pub struct GroupSyncer<D> {
    client: ZendeskClient,
    dimension_repo: D,
}

impl<D: DimensionRepository> GroupSyncer<D> {
    pub fn new(client: ZendeskClient, dimension_repo: D) -> Self {
        Self {
            client,
            dimension_repo,
        }
    }
}

fn to_row(group: &ZendeskGroup) -> Group {
    Group {
        id: group.id,
        name: group.name.clone(),
    }
}

#[async_trait]
impl<D: DimensionRepository> Syncer for GroupSyncer<D> {
    fn entity(&self) -> &str {
        ENTITY
    }

    async fn sync(&self) -> Result<u64, Box<dyn std::error::Error + Send + Sync>> {
        let mut pages = self
            .client
            .list_pages::<ZendeskGroup>("/api/v2/groups.json", "groups");
        let mut count = 0u64;

        while let Some(groups) = pages.next_page().await? {
            for group in &groups {
                self.dimension_repo.upsert_group(&to_row(group)).await?;
                count += 1;
            }
        }

        tracing::info!(count, "groups synced");
        Ok(count)
    }
}
