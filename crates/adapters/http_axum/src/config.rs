//! HTTP adapter options.

use std::path::PathBuf;

use serde::Deserialize;

/// Session cookie attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieConfig {
    /// Cookie name holding the session id.
    pub name: String,
    /// Add the `Secure` attribute (HTTPS-only deployments).
    pub secure: bool,
    /// `Max-Age` in seconds; `None` makes it a browser-session cookie.
    pub max_age_secs: Option<u64>,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            name: "homedash_session".to_string(),
            secure: false,
            max_age_secs: None,
        }
    }
}

/// How `/get_weather` answers when the lookup fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegradedStatus {
    /// HTTP 200 with the success envelope and a degraded report.
    #[default]
    Ok,
    /// HTTP 502 with an error envelope.
    BadGateway,
}

/// Options for the HTTP adapter, assembled by the binary from its config.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HttpConfig {
    pub cookie: CookieConfig,
    /// Put `/get_weather` behind the login like `/`.
    pub weather_requires_login: bool,
    pub degraded_status: DegradedStatus,
    /// Directory served under `/static`; `None` disables static files.
    pub static_dir: Option<PathBuf>,
}
