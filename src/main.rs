use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lead_finder::config::Config;
use lead_finder::db::Database;
use lead_finder::handlers::{self, AppState};

/// Main entry point for the Query API.
///
/// Initializes tracing, loads configuration, connects the lead store and
/// serves `/health`, `/api/leads` and `/api/stats`.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lead_finder=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!("Configuration loaded successfully");

    // Initialize database connection pool
    let db = Database::new(&config.database_url).await?;
    tracing::info!("Database connection pool established");

    let app_state = Arc::new(AppState::new(Arc::new(db.lead_repository())));
    let app = handlers::router(app_state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Business Lead Finder API running on port {}", config.port);
    tracing::info!("Health: http://localhost:{}/health", config.port);
    tracing::info!("Stats: http://localhost:{}/api/stats", config.port);

    axum::serve(listener, app).await?;

    Ok(())
}
