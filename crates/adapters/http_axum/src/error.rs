//! HTTP error response mapping for the JSON endpoints.

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use homedash_domain::error::HomedashError;
use homedash_domain::weather::WeatherError;

/// JSON error body: `{"status": "error", "message": …}`.
#[derive(Serialize)]
struct ErrorBody {
    status: &'static str,
    message: String,
}

/// Converts failures into an HTTP response with appropriate status code.
#[derive(Debug)]
pub enum ApiError {
    /// A domain error from an application service.
    Domain(HomedashError),
    /// The query string could not be deserialized.
    InvalidQuery(QueryRejection),
    /// The POST body was not valid JSON.
    InvalidBody(serde_json::Error),
    /// The weather lookup failed and the degraded report is disabled.
    Upstream(WeatherError),
    /// The endpoint requires a logged-in session.
    Unauthorized,
}

impl From<HomedashError> for ApiError {
    fn from(err: HomedashError) -> Self {
        Self::Domain(err)
    }
}

impl From<QueryRejection> for ApiError {
    fn from(err: QueryRejection) -> Self {
        Self::InvalidQuery(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Domain(HomedashError::Validation(err)) => {
                (StatusCode::BAD_REQUEST, err.to_string())
            }
            Self::Domain(HomedashError::Weather(err)) | Self::Upstream(err) => {
                (StatusCode::BAD_GATEWAY, err.to_string())
            }
            Self::Domain(HomedashError::Storage(err)) => {
                tracing::error!(error = %err, "storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
            Self::InvalidQuery(err) => (StatusCode::BAD_REQUEST, err.body_text()),
            Self::InvalidBody(err) => (StatusCode::BAD_REQUEST, format!("invalid JSON body: {err}")),
            Self::Unauthorized => (StatusCode::UNAUTHORIZED, "login required".to_string()),
        };

        (
            status,
            Json(ErrorBody {
                status: "error",
                message,
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use homedash_domain::error::ValidationError;
    use homedash_domain::weather::WeatherErrorKind;

    #[test]
    fn should_map_validation_to_bad_request() {
        let err = ApiError::from(HomedashError::from(ValidationError::MissingLocationFields(
            vec!["city"],
        )));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn should_map_upstream_to_bad_gateway() {
        let err = ApiError::Upstream(WeatherError::new(WeatherErrorKind::Markup, "gone"));
        assert_eq!(err.into_response().status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn should_map_storage_to_internal_error() {
        let err = ApiError::from(HomedashError::Storage("disk full".into()));
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn should_map_unauthorized() {
        assert_eq!(
            ApiError::Unauthorized.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
    }
}
