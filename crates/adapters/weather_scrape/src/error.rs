//! Weather scraper error types.

use homedash_domain::weather::{WeatherError, WeatherErrorKind};

/// Errors specific to the weather scraper.
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    /// The HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// Sending the request or reading the body failed.
    #[error("weather request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The page has no element with the expected id.
    #[error("element `{id}` not found in search results")]
    MissingElement {
        /// The `id` attribute that was looked up.
        id: String,
    },

    /// An element selector could not be compiled.
    #[error("invalid selector `{selector}`: {reason}")]
    Selector {
        /// The selector source.
        selector: String,
        /// Parser message.
        reason: String,
    },
}

impl ScrapeError {
    /// Convert into a [`WeatherError`] for propagation across the port
    /// boundary, keeping this error's message.
    #[must_use]
    pub fn into_domain(self) -> WeatherError {
        let kind = match self {
            Self::Client(_) | Self::Request(_) => WeatherErrorKind::Network,
            Self::MissingElement { .. } | Self::Selector { .. } => WeatherErrorKind::Markup,
        };
        WeatherError::new(kind, self.to_string())
    }
}

impl From<ScrapeError> for WeatherError {
    fn from(err: ScrapeError) -> Self {
        err.into_domain()
    }
}
