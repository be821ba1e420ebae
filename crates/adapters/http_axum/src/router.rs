//! Axum router assembly.
//!
//! Every route is declared once in [`route_table`] together with its access
//! policy; [`build`] turns the table into a [`Router`], attaching the login
//! guard each policy calls for.

use axum::Router;
use axum::middleware;
use axum::routing::{MethodRouter, get};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use homedash_app::ports::{SessionStore, WeatherSource};

use crate::api::weather;
use crate::config::HttpConfig;
use crate::dashboard::{home, login};
use crate::session::{require_api_login, require_page_login};
use crate::state::AppState;

/// Who may reach a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Anyone.
    Public,
    /// Logged-in sessions; anonymous requests are redirected to `/login/`.
    Page,
    /// Logged-in sessions; anonymous requests get a 401 JSON error.
    Api,
}

/// One row of the route table.
pub struct RouteSpec<S, W> {
    pub path: &'static str,
    pub handler: MethodRouter<AppState<S, W>>,
    pub access: Access,
}

/// All application routes, static files excepted.
pub fn route_table<S, W>(config: &HttpConfig) -> Vec<RouteSpec<S, W>>
where
    S: SessionStore + Send + Sync + 'static,
    W: WeatherSource + Send + Sync + 'static,
{
    let weather_access = if config.weather_requires_login {
        Access::Api
    } else {
        Access::Public
    };

    vec![
        RouteSpec {
            path: "/",
            handler: get(home::index::<S, W>),
            access: Access::Page,
        },
        RouteSpec {
            path: "/login/",
            handler: get(login::form::<S, W>).post(login::submit::<S, W>),
            access: Access::Public,
        },
        RouteSpec {
            path: "/logout/",
            handler: get(login::logout::<S, W>),
            access: Access::Public,
        },
        RouteSpec {
            path: "/get_weather",
            handler: get(weather::get_weather::<S, W>).post(weather::post_weather::<S, W>),
            access: weather_access,
        },
        RouteSpec {
            path: "/health",
            handler: get(health_check),
            access: Access::Public,
        },
    ]
}

/// Build the top-level axum [`Router`].
///
/// Includes a [`TraceLayer`] that logs each HTTP request/response at the
/// `DEBUG` level using the `tracing` ecosystem.
pub fn build<S, W>(state: AppState<S, W>) -> Router
where
    S: SessionStore + Send + Sync + 'static,
    W: WeatherSource + Send + Sync + 'static,
{
    let mut router = Router::new();
    for route in route_table::<S, W>(&state.config) {
        let handler = match route.access {
            Access::Public => route.handler,
            Access::Page => route.handler.route_layer(middleware::from_fn_with_state(
                state.clone(),
                require_page_login::<S, W>,
            )),
            Access::Api => route.handler.route_layer(middleware::from_fn_with_state(
                state.clone(),
                require_api_login::<S, W>,
            )),
        };
        router = router.route(route.path, handler);
    }

    if let Some(dir) = &state.config.static_dir {
        router = router.nest_service("/static", ServeDir::new(dir));
    }

    router.layer(TraceLayer::new_for_http()).with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
