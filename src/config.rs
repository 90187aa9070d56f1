use serde::Deserialize;

use crate::models::GeoPoint;
use crate::qualification::WebsiteMatch;

pub const DEFAULT_PLACES_BASE_URL: &str = "https://maps.googleapis.com/maps/api/place";

/// Maximum number of result pages the places provider will hand out for one search.
pub const MAX_RESULT_PAGES: u32 = 3;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub google_maps_api_key: Option<String>,
    pub places_base_url: String,
    pub website_match: WebsiteMatch,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(var: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Self {
            database_url: var("DATABASE_URL")
                .or_else(|| var("DB_URL"))
                .ok_or_else(|| {
                    anyhow::anyhow!("DATABASE_URL or DB_URL environment variable required")
                })
                .and_then(|url| {
                    if url.trim().is_empty() {
                        anyhow::bail!("DATABASE_URL cannot be empty");
                    }
                    if !url.starts_with("postgresql://") && !url.starts_with("postgres://") {
                        anyhow::bail!("DATABASE_URL must start with postgresql:// or postgres://");
                    }
                    Ok(url)
                })?,
            port: var("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?,
            google_maps_api_key: var("GOOGLE_MAPS_API_KEY").filter(|s| !s.trim().is_empty()),
            places_base_url: var("PLACES_BASE_URL")
                .filter(|s| !s.trim().is_empty())
                .map(|url| {
                    if !url.starts_with("http://") && !url.starts_with("https://") {
                        anyhow::bail!("PLACES_BASE_URL must start with http:// or https://");
                    }
                    Ok(url.trim_end_matches('/').to_string())
                })
                .transpose()?
                .unwrap_or_else(|| DEFAULT_PLACES_BASE_URL.to_string()),
            website_match: match var("WEBSITE_MATCH") {
                Some(mode) => mode.parse::<WebsiteMatch>().map_err(anyhow::Error::msg)?,
                None => WebsiteMatch::default(),
            },
        };

        // Log successful configuration load (without sensitive values)
        tracing::debug!(
            "Database URL: {}...",
            url_prefix(&config.database_url)
        );
        tracing::debug!("Places Base URL: {}", config.places_base_url);
        tracing::debug!("Website match mode: {:?}", config.website_match);
        tracing::debug!("Server Port: {}", config.port);

        Ok(config)
    }

    /// The places API credential; only the collector needs it.
    pub fn places_api_key(&self) -> anyhow::Result<&str> {
        self.google_maps_api_key
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("GOOGLE_MAPS_API_KEY environment variable required"))
    }
}

/// Parameters of one collection run.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CollectConfig {
    pub location: GeoPoint,
    pub keyword: String,
    pub radius_meters: u32,
    pub result_page_limit: u32,
}

impl Default for CollectConfig {
    /// Plumbers around downtown Vancouver, first result page only.
    fn default() -> Self {
        Self {
            location: GeoPoint {
                lat: 49.2827,
                lng: -123.1207,
            },
            keyword: "plumber".to_string(),
            radius_meters: 5000,
            result_page_limit: 1,
        }
    }
}

impl CollectConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(var: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let lat = parse_or(&var, "COLLECT_LAT", defaults.location.lat)?;
        let lng = parse_or(&var, "COLLECT_LNG", defaults.location.lng)?;
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
            anyhow::bail!("COLLECT_LAT/COLLECT_LNG out of range: {},{}", lat, lng);
        }

        let keyword = var("COLLECT_KEYWORD")
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .unwrap_or(defaults.keyword);

        let radius_meters = parse_or(&var, "COLLECT_RADIUS_METERS", defaults.radius_meters)?;
        if radius_meters == 0 {
            anyhow::bail!("COLLECT_RADIUS_METERS must be greater than zero");
        }

        let result_page_limit =
            parse_or(&var, "COLLECT_PAGE_LIMIT", defaults.result_page_limit)?;
        if !(1..=MAX_RESULT_PAGES).contains(&result_page_limit) {
            anyhow::bail!(
                "COLLECT_PAGE_LIMIT must be between 1 and {}",
                MAX_RESULT_PAGES
            );
        }

        Ok(Self {
            location: GeoPoint { lat, lng },
            keyword,
            radius_meters,
            result_page_limit,
        })
    }
}

/// First 20 characters of a connection URL, for logging.
fn url_prefix(url: &str) -> String {
    url.chars().take(20).collect()
}

fn parse_or<F, T>(var: &F, key: &str, default: T) -> anyhow::Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match var(key).filter(|s| !s.trim().is_empty()) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("{} has an invalid value: {}", key, raw)),
        None => Ok(default),
    }
}
