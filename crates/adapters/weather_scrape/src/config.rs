//! Weather scraper configuration.

use serde::Deserialize;

/// Desktop Chrome user agent; the results page only renders the weather
/// card for browser-looking clients.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Configuration for the search-page weather scraper.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ScrapeConfig {
    /// Search URL prefix; the encoded query is appended verbatim.
    pub search_url: String,
    /// `User-Agent` header sent with the request.
    pub user_agent: String,
    /// Request timeout in seconds. `None` keeps the HTTP client default.
    pub timeout_secs: Option<u64>,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            search_url: "https://www.google.co.in/search?q=".to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: None,
        }
    }
}
