use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

// ============ Database Models ============

/// Outreach stage of a lead.
///
/// The collector only ever writes `New`; later stages are advanced outside this service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    #[default]
    New,
    Emailed,
    Responded,
    SiteBuilt,
    Closed,
}

impl LeadStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeadStatus::New => "new",
            LeadStatus::Emailed => "emailed",
            LeadStatus::Responded => "responded",
            LeadStatus::SiteBuilt => "site_built",
            LeadStatus::Closed => "closed",
        }
    }
}

impl fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeadStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(LeadStatus::New),
            "emailed" => Ok(LeadStatus::Emailed),
            "responded" => Ok(LeadStatus::Responded),
            "site_built" => Ok(LeadStatus::SiteBuilt),
            "closed" => Ok(LeadStatus::Closed),
            other => Err(format!("unknown lead status: {}", other)),
        }
    }
}

impl TryFrom<String> for LeadStatus {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A business that surfaced in a places search without a real website.
///
/// Stored in `business_leads`, keyed by `place_id`.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Lead {
    /// Store-assigned row id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    /// External place identifier; the upsert conflict key.
    pub place_id: String,
    pub name: String,
    /// First classification tag returned by the search.
    pub category: Option<String>,
    pub address: String,
    /// Never derived from the address by the collector.
    pub city: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub has_website: bool,
    pub email: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub rating: Option<f64>,
    #[sqlx(try_from = "String")]
    pub status: LeadStatus,
    /// Assigned by the store on first insert.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

// ============ Search Inputs ============

/// A WGS84 coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    /// `"lat,lng"` as expected by the places `location` parameter.
    pub fn to_query_value(&self) -> String {
        format!("{},{}", self.lat, self.lng)
    }
}

// ============ API Response Models ============

/// Aggregate website coverage over all stored leads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadStats {
    pub total_leads: usize,
    pub without_website: usize,
    pub with_website: usize,
    /// Share of leads without a website, e.g. `"30.00%"`, or `"0%"` when there are none.
    pub conversion_rate: String,
}

impl LeadStats {
    pub fn from_flags(flags: &[bool]) -> Self {
        let total_leads = flags.len();
        let without_website = flags.iter().filter(|has| !**has).count();
        let conversion_rate = if total_leads > 0 {
            format!(
                "{:.2}%",
                without_website as f64 / total_leads as f64 * 100.0
            )
        } else {
            "0%".to_string()
        };

        Self {
            total_leads,
            without_website,
            with_website: total_leads - without_website,
            conversion_rate,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LeadsResponse {
    pub success: bool,
    pub count: usize,
    pub leads: Vec<Lead>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatsResponse {
    pub success: bool,
    pub stats: LeadStats,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub service: String,
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_on_empty_store() {
        let stats = LeadStats::from_flags(&[]);
        assert_eq!(stats.total_leads, 0);
        assert_eq!(stats.without_website, 0);
        assert_eq!(stats.with_website, 0);
        assert_eq!(stats.conversion_rate, "0%");
    }

    #[test]
    fn stats_three_of_ten_without_website() {
        let mut flags = vec![true; 7];
        flags.extend([false; 3]);
        let stats = LeadStats::from_flags(&flags);
        assert_eq!(stats.total_leads, 10);
        assert_eq!(stats.without_website, 3);
        assert_eq!(stats.with_website, 7);
        assert_eq!(stats.conversion_rate, "30.00%");
    }

    #[test]
    fn stats_rounds_to_two_decimals() {
        let stats = LeadStats::from_flags(&[false, true, true]);
        assert_eq!(stats.conversion_rate, "33.33%");
        let stats = LeadStats::from_flags(&[false, false, true]);
        assert_eq!(stats.conversion_rate, "66.67%");
    }

    #[test]
    fn status_round_trips_through_text() {
        for status in [
            LeadStatus::New,
            LeadStatus::Emailed,
            LeadStatus::Responded,
            LeadStatus::SiteBuilt,
            LeadStatus::Closed,
        ] {
            assert_eq!(status.as_str().parse::<LeadStatus>().unwrap(), status);
        }
        assert!("archived".parse::<LeadStatus>().is_err());
        assert_eq!(
            serde_json::to_value(LeadStatus::SiteBuilt).unwrap(),
            serde_json::json!("site_built")
        );
    }

    #[test]
    fn geo_point_query_value() {
        let p = GeoPoint {
            lat: 49.2827,
            lng: -123.1207,
        };
        assert_eq!(p.to_query_value(), "49.2827,-123.1207");
    }
}
