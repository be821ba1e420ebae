//! Login and logout.

use askama::Template;
use axum::extract::rejection::FormRejection;
use axum::extract::{Form, State};
use axum::http::header::SET_COOKIE;
use axum::response::{Html, IntoResponse, Redirect, Response};
use serde::Deserialize;

use homedash_app::ports::{SessionStore, WeatherSource};
use homedash_app::services::session_gate::LoginOutcome;

use super::DashboardError;
use crate::session::{self, SessionCookie};
use crate::state::AppState;

/// Message shown when the submitted token does not match.
pub const INVALID_TOKEN: &str = "Invalid token";

/// Login form template.
#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    error: Option<&'static str>,
}

impl IntoResponse for LoginTemplate {
    fn into_response(self) -> Response {
        Html(self.to_string()).into_response()
    }
}

/// Form data posted by the login page.
#[derive(Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub token: String,
}

/// `GET /login/`: the login form, or back to `/` when already logged in.
pub async fn form<S, W>(
    State(state): State<AppState<S, W>>,
    cookie: SessionCookie,
) -> Result<Response, DashboardError>
where
    S: SessionStore + Send + Sync + 'static,
    W: WeatherSource + Send + Sync + 'static,
{
    if state.session_gate.is_logged_in(cookie.id()).await? {
        return Ok(Redirect::to("/").into_response());
    }
    Ok(LoginTemplate { error: None }.into_response())
}

/// `POST /login/`: check the token (PRG on success).
///
/// A body that is not a urlencoded form counts as a missing token.
pub async fn submit<S, W>(
    State(state): State<AppState<S, W>>,
    cookie: SessionCookie,
    form: Result<Form<LoginForm>, FormRejection>,
) -> Result<Response, DashboardError>
where
    S: SessionStore + Send + Sync + 'static,
    W: WeatherSource + Send + Sync + 'static,
{
    let form = match form {
        Ok(Form(form)) => form,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "unreadable login form");
            LoginForm::default()
        }
    };
    match state.session_gate.login(cookie.id(), &form.token).await? {
        LoginOutcome::Authenticated(session) => Ok((
            [(SET_COOKIE, session::set_cookie(&state.config.cookie, session.id))],
            Redirect::to("/"),
        )
            .into_response()),
        LoginOutcome::Rejected => Ok(LoginTemplate {
            error: Some(INVALID_TOKEN),
        }
        .into_response()),
    }
}

/// `GET /logout/`: drop the session and go back to the login form.
pub async fn logout<S, W>(
    State(state): State<AppState<S, W>>,
    cookie: SessionCookie,
) -> Result<Response, DashboardError>
where
    S: SessionStore + Send + Sync + 'static,
    W: WeatherSource + Send + Sync + 'static,
{
    state.session_gate.logout(cookie.id()).await?;
    Ok((
        [(SET_COOKIE, session::clear_cookie(&state.config.cookie))],
        Redirect::to("/login/"),
    )
        .into_response())
}
