//! Runs one lead collection: places search, website filter, upsert.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lead_finder::collector::collect_leads;
use lead_finder::config::{CollectConfig, Config};
use lead_finder::db::Database;
use lead_finder::places_client::PlacesClient;

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lead_finder=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run().await {
        tracing::error!("Lead collection failed: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    let params = CollectConfig::from_env()?;

    let places = PlacesClient::from_config(&config)?;
    let db = Database::new(&config.database_url).await?;
    let repo = db.lead_repository();

    let report = collect_leads(&places, &repo, &params).await?;
    tracing::info!(
        "Collection finished: {} found, {} saved",
        report.found,
        report.saved
    );

    Ok(())
}
