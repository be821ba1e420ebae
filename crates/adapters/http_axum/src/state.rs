//! Shared application state for axum handlers.

use std::sync::Arc;

use homedash_app::ports::{SessionStore, WeatherSource};
use homedash_app::services::session_gate::SessionGate;
use homedash_app::services::weather_service::WeatherService;
use homedash_domain::dashboard::DashboardSettings;

use crate::config::HttpConfig;

/// Application state shared across all axum handlers.
///
/// Generic over the session store and weather source to avoid dynamic
/// dispatch. `Clone` is implemented manually so the underlying types
/// themselves do not need to be `Clone`; only the `Arc` wrappers are cloned.
/// Everything but the session store is read-only after startup.
pub struct AppState<S, W> {
    /// Login / logout use-cases.
    pub session_gate: Arc<SessionGate<S>>,
    /// Weather lookup use-case.
    pub weather_service: Arc<WeatherService<W>>,
    /// Values rendered into the dashboard page.
    pub dashboard: Arc<DashboardSettings>,
    /// Adapter options (cookie attributes, weather policy, static files).
    pub config: Arc<HttpConfig>,
}

impl<S, W> Clone for AppState<S, W> {
    fn clone(&self) -> Self {
        Self {
            session_gate: Arc::clone(&self.session_gate),
            weather_service: Arc::clone(&self.weather_service),
            dashboard: Arc::clone(&self.dashboard),
            config: Arc::clone(&self.config),
        }
    }
}

impl<S, W> AppState<S, W>
where
    S: SessionStore + Send + Sync + 'static,
    W: WeatherSource + Send + Sync + 'static,
{
    /// Create a new application state from service instances.
    pub fn new(
        session_gate: SessionGate<S>,
        weather_service: WeatherService<W>,
        dashboard: DashboardSettings,
        config: HttpConfig,
    ) -> Self {
        Self {
            session_gate: Arc::new(session_gate),
            weather_service: Arc::new(weather_service),
            dashboard: Arc::new(dashboard),
            config: Arc::new(config),
        }
    }
}
