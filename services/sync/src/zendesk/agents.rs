use async_trait::async_trait;

use helma_db::dimensions::models::Agent;
use helma_db::dimensions::repositories::DimensionRepository;

use super::client::ZendeskClient;
use super::models::ZendeskUser;
use crate::connector::Syncer;

const ENTITY: &str = "agents";

/// Staff users come back role-filtered, so the listing runs once per role.
const ROLES: [&str; 2] = ["agent", "admin"];

pub struct AgentSyncer<D> {
    client: ZendeskClient,
    dimension_repo: D,
}

impl<D: DimensionRepository> AgentSyncer<D> {
    pub fn new(client: ZendeskClient, dimension_repo: D) -> Self {
        Self {
            client,
            dimension_repo,
        }
    }
}

fn to_row(user: &ZendeskUser) -> Agent {
    Agent {
        id: user.id,
        name: user.name.clone(),
        email: user.email.clone(),
        role: user.role.clone(),
        active: user.active,
        default_group_id: user.default_group_id,
    }
}

#[async_trait]
impl<D: DimensionRepository> Syncer for AgentSyncer<D> {
    fn entity(&self) -> &str {
        ENTITY
    }

    async fn sync(&self) -> Result<u64, Box<dyn std::error::Error + Send + Sync>> {
        let mut count = 0u64;

        for role in ROLES {
            let mut pages = self
                .client
                .list_pages::<ZendeskUser>(&format!("/api/v2/users.json?role={role}"), "users");

            while let Some(users) = pages.next_page().await? {
                for user in &users {
                    self.dimension_repo.upsert_agent(&to_row(user)).await?;
                    count += 1;
                }
            }
        }

        tracing::info!(count, "agents synced");
        Ok(count)
    }
}
