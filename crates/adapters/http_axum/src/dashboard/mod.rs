//! Server-side rendered HTML pages: the dashboard and the login form.

pub mod home;
pub mod login;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use homedash_domain::error::HomedashError;

/// Failures while serving a page. Always rendered as a bare 500.
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    /// An application service failed (e.g. the session store).
    #[error("service error")]
    Service(#[from] HomedashError),

    /// The settings could not be encoded for the page script.
    #[error("failed to encode dashboard settings")]
    Encode(#[from] serde_json::Error),
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, source = ?std::error::Error::source(&self), "page failed");
        (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
    }
}
