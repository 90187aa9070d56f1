use crate::errors::AppError;
use crate::models::{HealthResponse, LeadStats, LeadsResponse, StatsResponse};
use crate::repository::{LeadRepository, RECENT_LEADS_LIMIT};
use axum::{extract::State, routing::get, Json, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub const SERVICE_NAME: &str = "Business Lead Finder API v1.0";

/// Shared application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Lead store the read routes query.
    pub repo: Arc<dyn LeadRepository>,
}

impl AppState {
    pub fn new(repo: Arc<dyn LeadRepository>) -> Self {
        Self { repo }
    }
}

/// Builds the HTTP surface: health, recent leads and stats.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/leads", get(list_leads))
        .route("/api/stats", get(stats))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Health check endpoint.
///
/// Returns static service metadata and the current time; never fails.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now(),
        service: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /api/leads
///
/// The most recently created leads, newest first, capped at [`RECENT_LEADS_LIMIT`].
pub async fn list_leads(
    State(state): State<Arc<AppState>>,
) -> Result<Json<LeadsResponse>, AppError> {
    let leads = state.repo.list_recent_leads(RECENT_LEADS_LIMIT).await?;
    tracing::debug!("GET /api/leads - {} rows", leads.len());

    Ok(Json(LeadsResponse {
        success: true,
        count: leads.len(),
        leads,
    }))
}

/// GET /api/stats
///
/// Counts of leads with and without a website across the whole table.
pub async fn stats(State(state): State<Arc<AppState>>) -> Result<Json<StatsResponse>, AppError> {
    let flags = state.repo.get_website_flags().await?;
    let stats = LeadStats::from_flags(&flags);
    tracing::debug!("GET /api/stats - {:?}", stats);

    Ok(Json(StatsResponse {
        success: true,
        stats,
    }))
}
