use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;

use crate::lead_storage::PgLeadRepository;

pub struct Database {
    pub pool: PgPool,
}

impl Database {
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .acquire_timeout(Duration::from_secs(10))
            .connect(database_url)
            .await?;

        sqlx::query("SELECT 1").execute(&pool).await?;

        Ok(Self { pool })
    }

    pub fn lead_repository(&self) -> PgLeadRepository {
        PgLeadRepository::new(self.pool.clone())
    }
}
