//! Dashboard page: the switch controls.

use askama::Template;
use axum::extract::State;
use axum::response::{Html, IntoResponse, Response};

use homedash_app::ports::{SessionStore, WeatherSource};
use homedash_domain::dashboard::{DashboardSettings, Switch};

use super::DashboardError;
use crate::state::AppState;

/// A switch as rendered in the page.
pub struct SwitchView {
    /// Element id of the checkbox; the page script derives the pin from it.
    pub element_id: String,
    pub pin: String,
    pub label: String,
}

impl From<Switch> for SwitchView {
    fn from(switch: Switch) -> Self {
        // `D3` → `switch3`; pins without a one-letter prefix fall back to the position.
        let suffix = switch
            .pin
            .get(1..)
            .filter(|rest| !rest.is_empty())
            .map_or_else(|| switch.index.to_string(), str::to_string);
        Self {
            element_id: format!("switch{suffix}"),
            pin: switch.pin,
            label: switch.label,
        }
    }
}

/// Dashboard page template.
#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    user_name: String,
    wall_url: Option<String>,
    switches: Vec<SwitchView>,
    /// Settings as JSON, safe to embed in a `<script>` element.
    config_json: String,
}

impl DashboardTemplate {
    fn new(settings: &DashboardSettings) -> Result<Self, DashboardError> {
        let config_json = serde_json::to_string(settings)?.replace('<', "\\u003c");
        Ok(Self {
            user_name: settings.user_name.clone(),
            wall_url: settings
                .has_wallpaper()
                .then(|| settings.wall_url.clone()),
            switches: settings.switches().into_iter().map(SwitchView::from).collect(),
            config_json,
        })
    }
}

impl IntoResponse for DashboardTemplate {
    fn into_response(self) -> Response {
        Html(self.to_string()).into_response()
    }
}

/// `GET /`: the dashboard. Only reachable through the login gate.
pub async fn index<S, W>(
    State(state): State<AppState<S, W>>,
) -> Result<DashboardTemplate, DashboardError>
where
    S: SessionStore + Send + Sync + 'static,
    W: WeatherSource + Send + Sync + 'static,
{
    DashboardTemplate::new(&state.dashboard)
}
