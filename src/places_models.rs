use serde::{Deserialize, Serialize};

/// Provider status for a successful search with hits.
pub const STATUS_OK: &str = "OK";
/// Provider status for a successful search without hits.
pub const STATUS_ZERO_RESULTS: &str = "ZERO_RESULTS";

/// Body of a nearby-search response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearbySearchResponse {
    pub status: String,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub results: Vec<PlaceResult>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

impl NearbySearchResponse {
    pub fn is_success(&self) -> bool {
        self.status == STATUS_OK || self.status == STATUS_ZERO_RESULTS
    }
}

/// One place in a nearby-search result list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceResult {
    pub place_id: String,
    pub name: String,
    #[serde(default)]
    pub vicinity: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub geometry: Option<Geometry>,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub rating: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Geometry {
    pub location: LatLng,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_sparse_place() {
        let body = serde_json::json!({
            "status": "OK",
            "results": [
                {"place_id": "abc", "name": "Joe's Plumbing"}
            ]
        });
        let parsed: NearbySearchResponse = serde_json::from_value(body).unwrap();
        assert!(parsed.is_success());
        assert_eq!(parsed.results.len(), 1);
        let place = &parsed.results[0];
        assert!(place.vicinity.is_none());
        assert!(place.geometry.is_none());
        assert!(place.types.is_empty());
    }

    #[test]
    fn zero_results_without_results_field() {
        let parsed: NearbySearchResponse =
            serde_json::from_str(r#"{"status":"ZERO_RESULTS"}"#).unwrap();
        assert!(parsed.is_success());
        assert!(parsed.results.is_empty());
    }

    #[test]
    fn missing_status_is_rejected() {
        assert!(serde_json::from_str::<NearbySearchResponse>(r#"{"results":[]}"#).is_err());
        assert!(serde_json::from_str::<NearbySearchResponse>("null").is_err());
    }
}
