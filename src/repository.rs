//! Data-access contract shared by the HTTP layer and the collector.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::Lead;

/// Upper bound on rows returned by a recent-leads listing.
pub const RECENT_LEADS_LIMIT: usize = 100;

#[async_trait]
pub trait LeadRepository: Send + Sync {
    /// Most recently created leads first, at most `limit` rows.
    async fn list_recent_leads(&self, limit: usize) -> Result<Vec<Lead>, AppError>;

    /// The `has_website` flag of every stored lead.
    async fn get_website_flags(&self) -> Result<Vec<bool>, AppError>;

    /// Inserts new leads and overwrites existing ones with the same `place_id`.
    ///
    /// A batch may repeat a `place_id`; the last occurrence wins. Returns the
    /// number of distinct rows written.
    async fn upsert_leads(&self, leads: &[Lead]) -> Result<usize, AppError>;
}

/// Collapses leads sharing a `place_id`, keeping the last occurrence in its original slot.
pub fn dedupe_by_place_id(leads: Vec<Lead>) -> Vec<Lead> {
    let mut slot_of: HashMap<String, usize> = HashMap::with_capacity(leads.len());
    let mut unique: Vec<Lead> = Vec::with_capacity(leads.len());

    for lead in leads {
        match slot_of.get(&lead.place_id) {
            Some(&slot) => unique[slot] = lead,
            None => {
                slot_of.insert(lead.place_id.clone(), unique.len());
                unique.push(lead);
            }
        }
    }

    unique
}

/// Process-local lead store with the same upsert semantics as the Postgres table.
#[derive(Default)]
pub struct InMemoryLeadRepository {
    rows: RwLock<Vec<Lead>>,
    failure: Option<String>,
}

impl InMemoryLeadRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every call fails with a storage error carrying `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            rows: RwLock::default(),
            failure: Some(message.into()),
        }
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }

    pub async fn get(&self, place_id: &str) -> Option<Lead> {
        self.rows
            .read()
            .await
            .iter()
            .find(|l| l.place_id == place_id)
            .cloned()
    }

    fn check(&self) -> Result<(), AppError> {
        match &self.failure {
            Some(msg) => Err(AppError::Storage(msg.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl LeadRepository for InMemoryLeadRepository {
    async fn list_recent_leads(&self, limit: usize) -> Result<Vec<Lead>, AppError> {
        self.check()?;
        let rows = self.rows.read().await;
        // Newest insert first among equal timestamps.
        let mut recent: Vec<Lead> = rows.iter().rev().cloned().collect();
        recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        recent.truncate(limit);
        Ok(recent)
    }

    async fn get_website_flags(&self) -> Result<Vec<bool>, AppError> {
        self.check()?;
        Ok(self.rows.read().await.iter().map(|l| l.has_website).collect())
    }

    async fn upsert_leads(&self, leads: &[Lead]) -> Result<usize, AppError> {
        self.check()?;
        let leads = dedupe_by_place_id(leads.to_vec());
        let mut rows = self.rows.write().await;

        for lead in &leads {
            match rows.iter().position(|row| row.place_id == lead.place_id) {
                Some(idx) => {
                    let existing = &mut rows[idx];
                    *existing = Lead {
                        id: existing.id,
                        created_at: existing.created_at,
                        ..lead.clone()
                    };
                }
                None => rows.push(Lead {
                    id: Some(Uuid::new_v4()),
                    created_at: Some(Utc::now()),
                    ..lead.clone()
                }),
            }
        }

        Ok(leads.len())
    }
}
