use async_trait::async_trait;
use sqlx::PgPool;

use crate::dimensions::models::{Agent, Brand, Group};
use crate::dimensions::repositories::DimensionRepository;
use helma_common::error::{HelmaError, HelmaResult};

#[derive(Clone)]
pub struct PgDimensionRepository {
    pool: PgPool,
}

impl PgDimensionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DimensionRepository for PgDimensionRepository {
    async fn upsert_brand(&self, brand: &Brand) -> HelmaResult<()> {
        sqlx::query(
            "insert into brands (id, name, subdomain)
             values ($1, $2, $3)
             on conflict (id) do update set
               name = excluded.name,
               subdomain = excluded.subdomain",
        )
        .bind(brand.id)
        .bind(&brand.name)
        .bind(&brand.subdomain)
        .execute(&self.pool)
        .await
        .map_err(|e| HelmaError::Database(e.to_string()))?;
        Ok(())
    }

    async fn upsert_group(&self, group: &Group) -> HelmaResult<()> {
        sqlx::query(
            "insert into groups (id, name)
             values ($1, $2)
             on conflict (id) do update set
               name = excluded.name",
        )
        .bind(group.id)
        .bind(&group.name)
        .execute(&self.pool)
        .await
        .map_err(|e| HelmaError::Database(e.to_string()))?;
        Ok(())
    }

    async fn upsert_agent(&self, agent: &Agent) -> HelmaResult<()> {
        sqlx::query(
            "insert into agents (id, name, email, role, active, default_group_id)
             values ($1, $2, $3, $4, $5, $6)
             on conflict (id) do update set
               name = excluded.name,
               email = excluded.email,
               role = excluded.role,
               active = excluded.active,
               default_group_id = excluded.default_group_id",
        )
        .bind(agent.id)
        .bind(&agent.name)
        .bind(&agent.email)
        .bind(&agent.role)
        .bind(agent.active)
        .bind(agent.default_group_id)
        .execute(&self.pool)
        .await
        .map_err(|e| HelmaError::Database(e.to_string()))?;
        Ok(())
    }
}
