use async_trait::async_trait;

use helma_db::dimensions::models::Brand;
use helma_db::dimensions::repositories::DimensionRepository;

use super::client::ZendeskClient;
use super::models::ZendeskBrand;
use crate::connector::Syncer;

const ENTITY: &str = "brands";

pub struct BrandSyncer<D> {
    client: ZendeskClient,
    dimension_repo: D,
}

impl<D: DimensionRepository> BrandSyncer<D> {
    pub fn new(client: ZendeskClient, dimension_repo: D) -> Self {
        Self {
            client,
            dimension_repo,
        }
    }
}

fn to_row(brand: &ZendeskBrand) -> Brand {
    Brand {
        id: brand.id,
        name: brand.name.clone(),
        subdomain: brand.subdomain.clone(),
    }
}

#[async_trait]
impl<D: DimensionRepository> Syncer for BrandSyncer<D> {
    fn entity(&self) -> &str {
        ENTITY
    }

    /// Full replace: the whole collection is re-fetched every run, no cursor.
    async fn sync(&self) -> Result<u64, Box<dyn std::error::Error + Send + Sync>> {
        let mut pages = self
            .client
            .list_pages::<ZendeskBrand>("/api/v2/brands.json", "brands");
        let mut count = 0u64;

        while let Some(brands) = pages.next_page().await? {
            for brand in &brands {
                self.dimension_repo.upsert_brand(&to_row(brand)).await?;
                count += 1;
            }
        }

        tracing::info!(count, "brands synced");
        Ok(count)
    }
}
