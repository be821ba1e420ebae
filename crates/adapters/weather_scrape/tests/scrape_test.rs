//! Scraper tests against a local HTTP server serving captured markup.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use axum::Router;
use axum::extract::{RawQuery, State};
use axum::http::HeaderMap;
use axum::routing::get;
use homedash_adapter_weather_scrape::{DEFAULT_USER_AGENT, ScrapeConfig, SearchPageWeather};
use homedash_app::ports::WeatherSource;
use homedash_domain::weather::{Location, Units, WeatherErrorKind};

const WEATHER_CARD: &str = include_str!("fixtures/weather_card.html");

#[derive(Clone, Default)]
struct Seen {
    requests: Arc<Mutex<Vec<(Option<String>, Option<String>)>>>,
}

/// Serve `body` at `/search`, recording the query string and user agent.
async fn serve(body: &'static str) -> (String, Seen) {
    let seen = Seen::default();
    let app = Router::new()
        .route(
            "/search",
            get(
                move |State(seen): State<Seen>, RawQuery(query): RawQuery, headers: HeaderMap| async move {
                    let agent = headers
                        .get("user-agent")
                        .and_then(|value| value.to_str().ok())
                        .map(String::from);
                    seen.requests.lock().unwrap().push((query, agent));
                    axum::response::Html(body)
                },
            ),
        )
        .with_state(seen.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}/search?q="), seen)
}

/// Serve a `/search` endpoint that answers only after `delay`.
async fn serve_slow(delay: Duration) -> String {
    let app = Router::new().route(
        "/search",
        get(move || async move {
            tokio::time::sleep(delay).await;
            axum::response::Html(WEATHER_CARD)
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}/search?q=")
}

fn scraper(search_url: String) -> SearchPageWeather {
    SearchPageWeather::new(ScrapeConfig {
        search_url,
        ..ScrapeConfig::default()
    })
    .unwrap()
}

#[tokio::test]
async fn should_scrape_weather_card() {
    let (url, seen) = serve(WEATHER_CARD).await;

    let report = scraper(url)
        .fetch(
            &Location::new("Paris", "Ile-de-France", "75000"),
            Units::Metric,
        )
        .await
        .unwrap();

    assert_eq!(report.tmp, "21°C");
    assert_eq!(report.dc, " Partly cloudy ");
    assert!(report.img_src.is_some());

    let requests = seen.requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0].0.as_deref(),
        Some("q=current%20weather%20of%20Paris%20Ile-de-France%2075000")
    );
    assert_eq!(requests[0].1.as_deref(), Some(DEFAULT_USER_AGENT));
}

#[tokio::test]
async fn should_report_markup_error_for_unexpected_page() {
    let (url, seen) = serve("<html><body>Before you continue</body></html>").await;

    let err = scraper(url)
        .fetch(&Location::default(), Units::Imperial)
        .await
        .unwrap_err();

    assert_eq!(err.kind, WeatherErrorKind::Markup);
    assert_eq!(err.message, "element `wob_tm` not found in search results");
    assert_eq!(seen.requests.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_give_up_on_slow_upstream_after_timeout() {
    let url = serve_slow(Duration::from_secs(10)).await;
    let scraper = SearchPageWeather::new(ScrapeConfig {
        search_url: url,
        timeout_secs: Some(1),
        ..ScrapeConfig::default()
    })
    .unwrap();

    let started = Instant::now();
    let err = scraper
        .fetch(&Location::default(), Units::Metric)
        .await
        .unwrap_err();

    assert_eq!(err.kind, WeatherErrorKind::Network);
    assert!(started.elapsed() < Duration::from_secs(5));
}
