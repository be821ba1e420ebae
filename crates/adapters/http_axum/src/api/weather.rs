//! Weather lookup endpoint.

use axum::Json;
use axum::body::Bytes;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use homedash_app::ports::{SessionStore, WeatherSource};
use homedash_domain::error::HomedashError;
use homedash_domain::weather::{DegradedReport, LocationQuery, WeatherReport};

use crate::config::DegradedStatus;
use crate::error::ApiError;
use crate::state::AppState;

/// Report carried by a successful response.
#[derive(Serialize)]
#[serde(untagged)]
pub enum WeatherData {
    Report(WeatherReport),
    /// Sentinel values served when the lookup failed.
    Degraded(DegradedReport),
}

/// Body of `/get_weather` responses.
#[derive(Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum WeatherResponse {
    Success { weather_data: WeatherData },
}

impl IntoResponse for WeatherResponse {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// `GET /get_weather?city=…&state=…&pincode=…`
///
/// # Errors
///
/// Returns 400 when a location field is missing or the query string does
/// not deserialize, or 502 when the lookup
/// fails and degraded reports are disabled.
pub async fn get_weather<S, W>(
    State(state): State<AppState<S, W>>,
    query: Result<Query<LocationQuery>, QueryRejection>,
) -> Result<WeatherResponse, ApiError>
where
    S: SessionStore + Send + Sync + 'static,
    W: WeatherSource + Send + Sync + 'static,
{
    let Query(query) = query?;
    lookup(&state, query).await
}

/// `POST /get_weather` with an optional JSON body.
///
/// Fields present in the body take priority over the query string. An empty
/// body is treated as `{}`.
///
/// # Errors
///
/// Same as [`get_weather`], plus 400 for a body that is not a JSON object.
pub async fn post_weather<S, W>(
    State(state): State<AppState<S, W>>,
    query: Result<Query<LocationQuery>, QueryRejection>,
    body: Bytes,
) -> Result<WeatherResponse, ApiError>
where
    S: SessionStore + Send + Sync + 'static,
    W: WeatherSource + Send + Sync + 'static,
{
    let Query(query) = query?;
    let submitted = parse_body(&body)?;
    lookup(&state, submitted.or(query)).await
}

fn parse_body(body: &[u8]) -> Result<LocationQuery, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(LocationQuery::default());
    }
    serde_json::from_slice(body).map_err(ApiError::InvalidBody)
}

async fn lookup<S, W>(
    state: &AppState<S, W>,
    query: LocationQuery,
) -> Result<WeatherResponse, ApiError>
where
    S: SessionStore + Send + Sync + 'static,
    W: WeatherSource + Send + Sync + 'static,
{
    let weather_data = match state.weather_service.lookup(query).await {
        Ok(report) => WeatherData::Report(report),
        Err(HomedashError::Weather(err)) => match state.config.degraded_status {
            DegradedStatus::Ok => WeatherData::Degraded(DegradedReport::from(&err)),
            DegradedStatus::BadGateway => return Err(ApiError::Upstream(err)),
        },
        Err(err) => return Err(err.into()),
    };
    Ok(WeatherResponse::Success { weather_data })
}
