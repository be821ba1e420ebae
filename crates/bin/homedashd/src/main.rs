//! # homedashd: homedash daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Load configuration (config file, env vars)
//! - Install the `tracing` subscriber
//! - Construct the session store and the weather scraper (adapters)
//! - Construct application services, injecting adapters via port traits
//! - Build the axum router, injecting application services
//! - Bind to a TCP port and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer: no domain logic belongs here.

mod config;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use homedash_adapter_http_axum::router;
use homedash_adapter_http_axum::state::AppState;
use homedash_adapter_weather_scrape::SearchPageWeather;
use homedash_app::services::session_gate::SessionGate;
use homedash_app::services::weather_service::WeatherService;
use homedash_app::session_store::InMemorySessionStore;

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(config.log_filter()))
        .init();
    for warning in config.warnings() {
        tracing::warn!("{warning}");
    }

    // Session store
    let session_store = match config.session_max_age()? {
        Some(max_age) => InMemorySessionStore::with_max_age(max_age),
        None => InMemorySessionStore::new(),
    }
    .with_capacity(config.session.max_sessions);

    // Weather source
    let weather_source = SearchPageWeather::new(config.weather.scraper.clone())
        .context("failed to build the weather client")?;

    // Services
    let session_gate = SessionGate::new(session_store, config.access_token()?);
    let weather_service = WeatherService::new(weather_source, config.weather_settings());

    // HTTP
    let state = AppState::new(
        session_gate,
        weather_service,
        config.dashboard.clone(),
        config.http_config(),
    );
    let app = router::build(state);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    tracing::info!(%bind_addr, debug = config.server.debug, "homedashd listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("homedashd stopped");
    Ok(())
}

/// Resolves on Ctrl-C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
    tracing::info!("shutdown signal received");
}
