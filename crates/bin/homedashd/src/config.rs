//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `homedash.toml` in the working directory, or at the path given
//! by `HOMEDASH_CONFIG`. Every field has a default so the file is optional.
//! Environment variables take precedence over file values; the dashboard
//! ones use the upper-case names the page script reads (`TOKEN`, `PINS`,
//! `WEBSOCK_PORT`, …).

use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::TimeDelta;
use serde::Deserialize;

use homedash_adapter_http_axum::config::{CookieConfig, DegradedStatus, HttpConfig};
use homedash_adapter_weather_scrape::ScrapeConfig;
use homedash_app::services::weather_service::WeatherSettings;
use homedash_app::session_store::DEFAULT_CAPACITY;
use homedash_domain::dashboard::DashboardSettings;
use homedash_domain::token::AccessToken;
use homedash_domain::weather::{Location, SENTINEL_CITY, Units};

const DEFAULT_CONFIG_PATH: &str = "homedash.toml";
const DEFAULT_SECRET_KEY: &str = "change-me";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Values handed to the dashboard page.
    pub dashboard: DashboardSettings,
    /// Login session settings.
    pub session: SessionConfig,
    /// Weather endpoint and scraper settings.
    pub weather: WeatherConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
    /// Verbose logging by default.
    pub debug: bool,
    /// Legacy signing secret. Sessions are server side, so it only matters
    /// for the startup warning.
    pub secret_key: String,
    /// Directory served under `/static`; empty disables it.
    pub static_dir: PathBuf,
}

/// Session configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub cookie_name: String,
    /// Mark the cookie `Secure`.
    pub secure_cookie: bool,
    /// Lifetime of a login in seconds; `0` keeps sessions until logout.
    pub max_age_secs: u64,
    /// Logins kept in memory before the oldest is dropped.
    pub max_sessions: usize,
}

/// Weather endpoint configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    pub units: Units,
    /// City value replaced by [`fallback`](Self::fallback).
    pub sentinel_city: String,
    pub fallback: Location,
    /// Put `/get_weather` behind the login.
    pub require_login: bool,
    /// Status of the response when the lookup fails.
    pub degraded_status: DegradedStatus,
    #[serde(flatten)]
    pub scraper: ScrapeConfig,
}

/// Logging configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax). Derived from `server.debug`
    /// when unset.
    pub filter: Option<String>,
}

impl Config {
    /// Load configuration from the file (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, an
    /// environment value does not parse, or validation fails.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(|key| std::env::var(key).ok())
    }

    /// Same as [`load`](Self::load), reading variables through `var`.
    fn load_with<F>(var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let path = var("HOMEDASH_CONFIG").unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
        let mut config = Self::from_file(Path::new(&path))?;
        config.apply_env_overrides(&var)?;
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self, var: &dyn Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        let server = &mut self.server;
        set_string(var, "HOST", &mut server.host);
        set_parsed(var, "PORT", &mut server.port)?;
        set_bool(var, "DEBUG", &mut server.debug);
        set_string(var, "SECRET_KEY", &mut server.secret_key);

        let dashboard = &mut self.dashboard;
        set_string(var, "WEBSOCK_BROKER_ADDRESS", &mut dashboard.websock_broker_address);
        set_string(var, "WEBSOCKET_BASEPATH", &mut dashboard.websocket_basepath);
        set_parsed(var, "WEBSOCK_PORT", &mut dashboard.websock_port)?;
        set_bool(var, "WEBSOCK_USE_SSL", &mut dashboard.websock_use_ssl);
        set_bool(var, "USE_WSS", &mut dashboard.use_wss);
        set_parsed(var, "QOS", &mut dashboard.qos)?;
        set_parsed(
            var,
            "WEBSOCKET_RECONNECT_TIMEOUT",
            &mut dashboard.websocket_reconnect_timeout,
        )?;
        set_bool(var, "USE_CREDS", &mut dashboard.use_creds);
        set_bool(var, "CLEAN_SESSION", &mut dashboard.clean_session);
        set_bool(var, "RETAINED", &mut dashboard.retained);
        if let Some(user) = var("MQTT_USER").or_else(|| var("USER")) {
            dashboard.mqtt_user = user;
        }
        if let Some(pass) = var("MQTT_PASS").or_else(|| var("PASS")) {
            dashboard.mqtt_pass = pass;
        }
        set_string(var, "TOKEN", &mut dashboard.token);
        set_string(var, "USER_NAME", &mut dashboard.user_name);
        set_list(var, "PINS", &mut dashboard.pins);
        set_list(var, "SWITCH_NAME", &mut dashboard.switch_name);
        set_string(var, "WALL_URL", &mut dashboard.wall_url);

        if let Some(filter) = var("RUST_LOG").or_else(|| var("HOMEDASH_LOG")) {
            self.logging.filter = Some(filter);
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.dashboard.qos > 2 {
            return Err(ConfigError::Validation(format!(
                "QOS must be 0, 1 or 2, got {}",
                self.dashboard.qos
            )));
        }
        if self.session.max_sessions == 0 {
            return Err(ConfigError::Validation(
                "session.max_sessions must be non-zero".to_string(),
            ));
        }
        self.access_token()?;
        self.session_max_age()?;
        Ok(())
    }

    /// Startup warnings for settings left at insecure defaults.
    #[must_use]
    pub fn warnings(&self) -> Vec<&'static str> {
        let mut warnings = Vec::new();
        if self.dashboard.token == DashboardSettings::default().token {
            warnings.push("TOKEN is the default value; anyone can log in");
        }
        if self.server.secret_key == DEFAULT_SECRET_KEY {
            warnings.push("SECRET_KEY is the default value");
        }
        warnings
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Tracing filter directive.
    #[must_use]
    pub fn log_filter(&self) -> String {
        if let Some(filter) = &self.logging.filter {
            return filter.clone();
        }
        let level = if self.server.debug { "debug" } else { "info" };
        format!("homedashd={level},homedash={level},tower_http=debug")
    }

    /// The login token.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] when the token is empty.
    pub fn access_token(&self) -> Result<AccessToken, ConfigError> {
        AccessToken::new(self.dashboard.token.as_str())
            .map_err(|err| ConfigError::Validation(err.to_string()))
    }

    /// How long a login lasts, `None` for no expiry.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] when the value does not fit a
    /// duration.
    pub fn session_max_age(&self) -> Result<Option<TimeDelta>, ConfigError> {
        match self.session.max_age_secs {
            0 => Ok(None),
            secs => i64::try_from(secs)
                .ok()
                .and_then(TimeDelta::try_seconds)
                .map(Some)
                .ok_or_else(|| {
                    ConfigError::Validation(format!("session max age {secs}s is out of range"))
                }),
        }
    }

    /// Options for the HTTP adapter.
    #[must_use]
    pub fn http_config(&self) -> HttpConfig {
        let static_dir = &self.server.static_dir;
        HttpConfig {
            cookie: CookieConfig {
                name: self.session.cookie_name.clone(),
                secure: self.session.secure_cookie,
                max_age_secs: (self.session.max_age_secs > 0).then_some(self.session.max_age_secs),
            },
            weather_requires_login: self.weather.require_login,
            degraded_status: self.weather.degraded_status,
            static_dir: (!static_dir.as_os_str().is_empty()).then(|| static_dir.clone()),
        }
    }

    /// Lookup policy for the weather service.
    #[must_use]
    pub fn weather_settings(&self) -> WeatherSettings {
        WeatherSettings {
            units: self.weather.units,
            sentinel_city: self.weather.sentinel_city.clone(),
            fallback: self.weather.fallback.clone(),
        }
    }
}

fn set_string(var: &dyn Fn(&str) -> Option<String>, key: &str, target: &mut String) {
    if let Some(value) = var(key) {
        *target = value;
    }
}

/// Only a case-insensitive `true` is true.
fn set_bool(var: &dyn Fn(&str) -> Option<String>, key: &str, target: &mut bool) {
    if let Some(value) = var(key) {
        *target = value.eq_ignore_ascii_case("true");
    }
}

fn set_parsed<T>(
    var: &dyn Fn(&str) -> Option<String>,
    key: &str,
    target: &mut T,
) -> Result<(), ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    if let Some(value) = var(key) {
        *target = value.trim().parse().map_err(|err| {
            ConfigError::Validation(format!("{key}: invalid value `{value}` ({err})"))
        })?;
    }
    Ok(())
}

/// Comma-separated, items trimmed, empty items dropped.
fn set_list(var: &dyn Fn(&str) -> Option<String>, key: &str, target: &mut Vec<String>) {
    if let Some(value) = var(key) {
        *target = value
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(String::from)
            .collect();
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            debug: true,
            secret_key: DEFAULT_SECRET_KEY.to_string(),
            static_dir: PathBuf::from("static"),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: CookieConfig::default().name,
            secure_cookie: false,
            max_age_secs: 7 * 24 * 60 * 60,
            max_sessions: DEFAULT_CAPACITY,
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            units: Units::default(),
            sentinel_city: SENTINEL_CITY.to_string(),
            fallback: Location::default(),
            require_login: false,
            degraded_status: DegradedStatus::default(),
            scraper: ScrapeConfig::default(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
