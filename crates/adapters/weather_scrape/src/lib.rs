//! # homedash-adapter-weather-scrape
//!
//! Weather source that reads current conditions off a search-engine results
//! page.
//!
//! ## How it works
//!
//! 1. Build the query `current weather of <city> <state> <pincode>` (inner
//!    spaces stripped from each part, then percent-encoded).
//! 2. Issue a single GET with a desktop-browser `User-Agent`.
//! 3. Parse the weather card by its element ids (see [`parser`]).
//!
//! There is no retry and no caching. The response status is not inspected:
//! a consent page or captcha simply lacks the expected elements and fails
//! as a markup error.
//!
//! ## Dependency rule
//!
//! Same as other adapters: depends on `homedash-app` and `homedash-domain`.

mod config;
mod error;
pub mod parser;
pub mod query;

pub use config::{DEFAULT_USER_AGENT, ScrapeConfig};
pub use error::ScrapeError;

use std::future::Future;
use std::time::Duration;

use homedash_app::ports::WeatherSource;
use homedash_domain::weather::{Location, Units, WeatherError, WeatherReport};

/// [`WeatherSource`] backed by a search-engine results page.
pub struct SearchPageWeather {
    client: reqwest::Client,
    config: ScrapeConfig,
}

impl SearchPageWeather {
    /// Create a scraper with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Client`] if the HTTP client cannot be built
    /// (e.g. the TLS backend fails to initialise).
    pub fn new(config: ScrapeConfig) -> Result<Self, ScrapeError> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.as_str());
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().map_err(ScrapeError::Client)?;
        Ok(Self { client, config })
    }

    async fn scrape(&self, location: &Location, units: Units) -> Result<WeatherReport, ScrapeError> {
        let url = query::search_url(&self.config.search_url, location);
        tracing::debug!(%url, ?units, "requesting weather card");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        let html = response.text().await?;
        tracing::debug!(%status, bytes = html.len(), "received results page");

        parser::parse_report(&html, units)
    }
}

impl WeatherSource for SearchPageWeather {
    fn fetch(
        &self,
        location: &Location,
        units: Units,
    ) -> impl Future<Output = Result<WeatherReport, WeatherError>> + Send {
        async move {
            self.scrape(location, units)
                .await
                .map_err(ScrapeError::into_domain)
        }
    }
}
