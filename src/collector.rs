//! One collection run: search the places provider, keep the businesses
//! without a real website and upsert them as leads.

use crate::config::CollectConfig;
use crate::errors::{AppError, ResultExt};
use crate::models::Lead;
use crate::places_client::PlacesClient;
use crate::repository::LeadRepository;

/// Outcome of a collection run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectionReport {
    /// Qualifying leads returned by the search.
    pub found: usize,
    /// Rows written after collapsing duplicate place ids.
    pub saved: usize,
}

/// Upserts `leads` into `repo`, keyed by `place_id`; repeated ids collapse to the last one.
pub async fn save_leads(repo: &dyn LeadRepository, leads: Vec<Lead>) -> Result<usize, AppError> {
    let written = repo
        .upsert_leads(&leads)
        .await
        .context("Failed to save leads")?;

    tracing::info!("Saved {} leads", written);
    Ok(written)
}

pub async fn collect_leads(
    places: &PlacesClient,
    repo: &dyn LeadRepository,
    params: &CollectConfig,
) -> Result<CollectionReport, AppError> {
    tracing::info!(
        "Searching for '{}' businesses without websites near {}",
        params.keyword,
        params.location.to_query_value()
    );
    let leads = places.search_with(params).await?;
    let found = leads.len();
    tracing::info!("Found {} potential leads", found);

    if leads.is_empty() {
        return Ok(CollectionReport { found, saved: 0 });
    }

    let saved = save_leads(repo, leads).await?;

    Ok(CollectionReport { found, saved })
}
