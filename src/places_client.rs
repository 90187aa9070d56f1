use crate::config::{CollectConfig, Config};
use crate::errors::AppError;
use crate::models::{GeoPoint, Lead, LeadStatus};
use crate::places_models::{NearbySearchResponse, PlaceResult};
use crate::qualification::{is_real_website, WebsiteMatch};
use std::time::Duration;

/// Search radius used when the caller does not pick one.
pub const DEFAULT_RADIUS_METERS: u32 = 5000;

/// Follow-up page tokens are rejected by the provider until a short while after issue.
const DEFAULT_PAGE_TOKEN_DELAY: Duration = Duration::from_secs(2);

/// Client for the nearby-places search endpoint.
#[derive(Clone)]
pub struct PlacesClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    website_match: WebsiteMatch,
    page_token_delay: Duration,
}

impl PlacesClient {
    /// Creates a new `PlacesClient`.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL of the places API, without the `/nearbysearch/json` suffix.
    /// * `api_key` - The API credential sent as the `key` parameter.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| {
                AppError::ExternalApi(format!("Failed to create places client: {}", e))
            })?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            website_match: WebsiteMatch::default(),
            page_token_delay: DEFAULT_PAGE_TOKEN_DELAY,
        })
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let client = Self::new(&config.places_base_url, config.places_api_key()?)?
            .with_website_match(config.website_match);
        Ok(client)
    }

    pub fn with_website_match(mut self, website_match: WebsiteMatch) -> Self {
        self.website_match = website_match;
        self
    }

    pub fn with_page_token_delay(mut self, delay: Duration) -> Self {
        self.page_token_delay = delay;
        self
    }

    /// Searches around `location` and returns the businesses lacking a real website.
    ///
    /// Only the first result page is used. `radius_meters` defaults to
    /// [`DEFAULT_RADIUS_METERS`].
    pub async fn search_businesses(
        &self,
        location: GeoPoint,
        keyword: &str,
        radius_meters: Option<u32>,
    ) -> Result<Vec<Lead>, AppError> {
        let places = self
            .nearby_search(
                location,
                keyword,
                radius_meters.unwrap_or(DEFAULT_RADIUS_METERS),
                1,
            )
            .await?;
        Ok(places_to_leads(places, self.website_match))
    }

    /// Same as [`search_businesses`](Self::search_businesses), following up to
    /// `result_page_limit` result pages.
    pub async fn search_with(&self, params: &CollectConfig) -> Result<Vec<Lead>, AppError> {
        let places = self
            .nearby_search(
                params.location,
                &params.keyword,
                params.radius_meters,
                params.result_page_limit.max(1),
            )
            .await?;
        Ok(places_to_leads(places, self.website_match))
    }

    async fn nearby_search(
        &self,
        location: GeoPoint,
        keyword: &str,
        radius_meters: u32,
        page_limit: u32,
    ) -> Result<Vec<PlaceResult>, AppError> {
        let location_param = location.to_query_value();
        let radius_param = radius_meters.to_string();

        tracing::info!(
            "Places nearby search: keyword='{}' location={} radius={}m",
            keyword,
            location_param,
            radius_param
        );

        let mut page = self
            .fetch_page(&[
                ("location", location_param.as_str()),
                ("radius", radius_param.as_str()),
                ("keyword", keyword),
            ])
            .await?;
        let mut places = std::mem::take(&mut page.results);
        let mut fetched = 1;

        while fetched < page_limit {
            let Some(token) = page.next_page_token.take() else {
                break;
            };
            tokio::time::sleep(self.page_token_delay).await;

            page = self.fetch_page(&[("pagetoken", token.as_str())]).await?;
            fetched += 1;
            tracing::debug!(
                "Fetched result page {} ({} places)",
                fetched,
                page.results.len()
            );
            places.append(&mut page.results);
        }

        tracing::info!(
            "Places search returned {} places over {} page(s)",
            places.len(),
            fetched
        );
        Ok(places)
    }

    async fn fetch_page(&self, params: &[(&str, &str)]) -> Result<NearbySearchResponse, AppError> {
        // Build URL with proper parameter encoding
        let endpoint = format!("{}/nearbysearch/json", self.base_url);
        let mut query: Vec<(&str, &str)> = vec![("key", self.api_key.as_str())];
        query.extend_from_slice(params);
        let url = reqwest::Url::parse_with_params(&endpoint, &query)
            .map_err(|e| AppError::ExternalApi(format!("Failed to build URL: {}", e)))?;

        // Redact key from logs to prevent credential exposure
        tracing::debug!("Places API URL: {}?key=[REDACTED]&{:?}", endpoint, params);

        let response = self.client.get(url).send().await.map_err(|e| {
            AppError::ExternalApi(format!("Places API request failed: {}", e))
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::error!("Places API returned error {}: {}", status, error_text);
            return Err(AppError::ExternalApi(format!(
                "Places API returned status {}: {}",
                status, error_text
            )));
        }

        let body = response.text().await.map_err(|e| {
            AppError::MalformedResponse(format!("Failed to read places response: {}", e))
        })?;
        if body.trim().is_empty() {
            return Err(AppError::MalformedResponse("empty response body".to_string()));
        }

        let page: NearbySearchResponse = serde_json::from_str(&body).map_err(|e| {
            AppError::MalformedResponse(format!("Failed to parse places response: {}", e))
        })?;

        if !page.is_success() {
            tracing::warn!(
                "Places API status {}: {}",
                page.status,
                page.error_message.as_deref().unwrap_or("")
            );
            return Err(AppError::UpstreamSearch {
                status: page.status,
                message: page.error_message,
            });
        }

        Ok(page)
    }
}

/// Keeps the places without a real website and shapes them into new leads.
pub fn places_to_leads(places: Vec<PlaceResult>, website_match: WebsiteMatch) -> Vec<Lead> {
    places
        .into_iter()
        .filter(|place| !is_real_website(place.website.as_deref(), website_match))
        .map(place_to_lead)
        .collect()
}

fn place_to_lead(place: PlaceResult) -> Lead {
    let location = place.geometry.map(|g| g.location);
    Lead {
        id: None,
        place_id: place.place_id,
        name: place.name,
        category: place.types.into_iter().next(),
        address: place.vicinity.unwrap_or_default(),
        city: String::new(),
        phone: None,
        website: place.website,
        has_website: false,
        email: None,
        latitude: location.map(|l| l.lat),
        longitude: location.map(|l| l.lng),
        rating: place.rating,
        status: LeadStatus::New,
        created_at: None,
    }
}
