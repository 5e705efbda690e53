use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use helma_common::error::{HelmaError, HelmaResult};
use helma_db::dimensions::models::{Agent, Brand, Group};
use helma_db::dimensions::repositories::DimensionRepository;
use helma_db::sync::repositories::SyncStateRepository;
use helma_db::tickets::models::{SatisfactionRating, Ticket, TicketMetric};
use helma_db::tickets::repositories::TicketRepository;

use super::client::{ZendeskClient, ZendeskClientConfig};

pub fn test_client(base_url: &str) -> ZendeskClient {
    ZendeskClient::new(ZendeskClientConfig {
        base_url: base_url.to_string(),
        email: "agent@example.com".to_string(),
        api_token: "fake-token".to_string(),
        timeout_secs: 5,
    })
    .expect("client should build")
}

#[derive(Clone, Default)]
pub struct RecordingDimensionRepo {
    pub brands: Arc<Mutex<Vec<Brand>>>,
    pub groups: Arc<Mutex<Vec<Group>>>,
    pub agents: Arc<Mutex<Vec<Agent>>>,
}

#[async_trait]
impl DimensionRepository for RecordingDimensionRepo {
    async fn upsert_brand(&self, brand: &Brand) -> HelmaResult<()> {
        self.brands.lock().unwrap().push(brand.clone());
        Ok(())
    }

    async fn upsert_group(&self, group: &Group) -> HelmaResult<()> {
        self.groups.lock().unwrap().push(group.clone());
        Ok(())
    }

    async fn upsert_agent(&self, agent: &Agent) -> HelmaResult<()> {
        self.agents.lock().unwrap().push(agent.clone());
        Ok(())
    }
}

/// Records every write; `failing()` makes all writes error to simulate a
/// persistence failure mid-run.
#[derive(Clone, Default)]
pub struct RecordingTicketRepo {
    pub tickets: Arc<Mutex<Vec<Ticket>>>,
    pub metrics: Arc<Mutex<Vec<TicketMetric>>>,
    pub ratings: Arc<Mutex<Vec<SatisfactionRating>>>,
    pub pending_marks: Arc<Mutex<Vec<(i64, DateTime<Utc>)>>>,
    pub fail_writes: bool,
}

impl RecordingTicketRepo {
    pub fn failing() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    fn check(&self) -> HelmaResult<()> {
        if self.fail_writes {
            return Err(HelmaError::Database("write refused".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl TicketRepository for RecordingTicketRepo {
    async fn upsert_ticket(&self, ticket: &Ticket) -> HelmaResult<()> {
        self.check()?;
        self.tickets.lock().unwrap().push(ticket.clone());
        Ok(())
    }

    async fn upsert_metric(&self, metric: &TicketMetric) -> HelmaResult<()> {
        self.check()?;
        self.metrics.lock().unwrap().push(metric.clone());
        Ok(())
    }

    async fn upsert_rating(&self, rating: &SatisfactionRating) -> HelmaResult<()> {
        self.check()?;
        self.ratings.lock().unwrap().push(rating.clone());
        Ok(())
    }

    async fn set_first_pending_at_if_earlier(
        &self,
        ticket_id: i64,
        at: DateTime<Utc>,
    ) -> HelmaResult<()> {
        self.check()?;
        self.pending_marks.lock().unwrap().push((ticket_id, at));
        Ok(())
    }
}

/// In-memory watermark store for syncer tests.
#[derive(Clone, Default)]
pub struct InMemorySyncState {
    state: Arc<Mutex<HashMap<String, i64>>>,
}

impl InMemorySyncState {
    pub fn with(entity: &str, epoch_secs: i64) -> Self {
        let store = Self::default();
        store
            .state
            .lock()
            .unwrap()
            .insert(entity.to_string(), epoch_secs);
        store
    }

    pub fn get(&self, entity: &str) -> Option<i64> {
        self.state.lock().unwrap().get(entity).copied()
    }
}

#[async_trait]
impl SyncStateRepository for InMemorySyncState {
    async fn last_synced_at(&self, entity: &str) -> HelmaResult<Option<i64>> {
        Ok(self.get(entity))
    }

    async fn set_last_synced_at(&self, entity: &str, epoch_secs: i64) -> HelmaResult<()> {
        self.state
            .lock()
            .unwrap()
            .insert(entity.to_string(), epoch_secs);
        Ok(())
    }
}
