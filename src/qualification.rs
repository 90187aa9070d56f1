//! Decides whether a listed website is a genuine business site or just a
//! social-media profile.

use serde::Deserialize;
use std::str::FromStr;
use url::Url;

/// Domains whose pages do not count as a business having its own website.
pub const SOCIAL_MEDIA_DOMAINS: [&str; 5] = [
    "facebook.com",
    "instagram.com",
    "tiktok.com",
    "twitter.com",
    "linkedin.com",
];

/// How a website value is compared against [`SOCIAL_MEDIA_DOMAINS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WebsiteMatch {
    /// Blocked when the raw text contains a blocklisted domain anywhere.
    ///
    /// `https://notfacebook.company` is therefore treated as social media.
    #[default]
    Substring,
    /// Blocked only when the URL host is a blocklisted domain or one of its subdomains.
    Host,
}

impl FromStr for WebsiteMatch {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "substring" => Ok(WebsiteMatch::Substring),
            "host" => Ok(WebsiteMatch::Host),
            other => Err(format!(
                "WEBSITE_MATCH must be 'substring' or 'host', got '{}'",
                other
            )),
        }
    }
}

/// Returns true when `website` is present and not a social-media profile.
pub fn has_real_website(website: Option<&str>) -> bool {
    is_real_website(website, WebsiteMatch::Substring)
}

pub fn is_real_website(website: Option<&str>, mode: WebsiteMatch) -> bool {
    let Some(site) = website.map(str::trim).filter(|s| !s.is_empty()) else {
        return false;
    };

    match mode {
        WebsiteMatch::Substring => !contains_blocked_domain(site),
        WebsiteMatch::Host => match host_of(site) {
            Some(host) => !SOCIAL_MEDIA_DOMAINS
                .iter()
                .any(|domain| host == *domain || host.ends_with(&format!(".{}", domain))),
            None => !contains_blocked_domain(site),
        },
    }
}

fn contains_blocked_domain(site: &str) -> bool {
    SOCIAL_MEDIA_DOMAINS
        .iter()
        .any(|domain| site.contains(domain))
}

fn host_of(site: &str) -> Option<String> {
    let parsed = if site.contains("://") {
        Url::parse(site)
    } else {
        Url::parse(&format!("http://{}", site))
    };

    parsed
        .ok()
        .and_then(|url| url.host_str().map(|h| h.trim_end_matches('.').to_ascii_lowercase()))
        .filter(|h| !h.is_empty())
}
