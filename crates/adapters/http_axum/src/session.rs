//! Session cookie handling and the login gate middleware.

use axum::extract::{FromRequestParts, Request, State};
use axum::http::header::COOKIE;
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};

use homedash_app::ports::{SessionStore, WeatherSource};
use homedash_domain::id::SessionId;

use crate::config::CookieConfig;
use crate::dashboard::DashboardError;
use crate::error::ApiError;
use crate::state::AppState;

/// Session id read from the request cookie, if any.
///
/// A cookie that is absent or does not hold a valid id yields `None`;
/// extraction never fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionCookie(pub Option<SessionId>);

impl SessionCookie {
    #[must_use]
    pub fn id(self) -> Option<SessionId> {
        self.0
    }
}

impl<S, W> FromRequestParts<AppState<S, W>> for SessionCookie
where
    S: Send + Sync,
    W: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<S, W>,
    ) -> Result<Self, Self::Rejection> {
        let name = state.config.cookie.name.as_str();
        let id = parts
            .headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .find_map(|header| cookie_value(header, name))
            .and_then(|value| value.parse().ok());
        Ok(Self(id))
    }
}

/// Find the value of cookie `name` in a `Cookie` header.
fn cookie_value<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name).then_some(value)
    })
}

/// `Set-Cookie` value handing `id` to the browser.
#[must_use]
pub fn set_cookie(config: &CookieConfig, id: SessionId) -> String {
    let mut cookie = format!("{}={id}; Path=/; HttpOnly; SameSite=Lax", config.name);
    if let Some(max_age) = config.max_age_secs {
        cookie.push_str(&format!("; Max-Age={max_age}"));
    }
    if config.secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// `Set-Cookie` value removing the session cookie.
#[must_use]
pub fn clear_cookie(config: &CookieConfig) -> String {
    let mut cookie = format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", config.name);
    if config.secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Middleware for pages: anonymous requests are redirected to `/login/`.
///
/// # Errors
///
/// Returns [`DashboardError`] if the session store fails.
pub async fn require_page_login<S, W>(
    State(state): State<AppState<S, W>>,
    cookie: SessionCookie,
    request: Request,
    next: Next,
) -> Result<Response, DashboardError>
where
    S: SessionStore + Send + Sync + 'static,
    W: WeatherSource + Send + Sync + 'static,
{
    if state.session_gate.is_logged_in(cookie.id()).await? {
        Ok(next.run(request).await)
    } else {
        Ok(Redirect::to("/login/").into_response())
    }
}

/// Middleware for JSON endpoints: anonymous requests get a 401 error body.
///
/// # Errors
///
/// Returns [`ApiError::Unauthorized`] for anonymous sessions, or a storage
/// error if the session store fails.
pub async fn require_api_login<S, W>(
    State(state): State<AppState<S, W>>,
    cookie: SessionCookie,
    request: Request,
    next: Next,
) -> Result<Response, ApiError>
where
    S: SessionStore + Send + Sync + 'static,
    W: WeatherSource + Send + Sync + 'static,
{
    if state.session_gate.is_logged_in(cookie.id()).await? {
        Ok(next.run(request).await)
    } else {
        Err(ApiError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_find_cookie_among_others() {
        let header = "theme=dark; homedash_session=abc; lang=en";
        assert_eq!(cookie_value(header, "homedash_session"), Some("abc"));
    }

    #[test]
    fn should_not_match_cookie_name_prefix() {
        let header = "homedash_session_old=abc";
        assert_eq!(cookie_value(header, "homedash_session"), None);
    }

    #[test]
    fn should_build_default_set_cookie() {
        let id = SessionId::new();
        let cookie = set_cookie(&CookieConfig::default(), id);
        assert_eq!(
            cookie,
            format!("homedash_session={id}; Path=/; HttpOnly; SameSite=Lax")
        );
    }

    #[test]
    fn should_add_max_age_and_secure() {
        let config = CookieConfig {
            name: "sid".into(),
            secure: true,
            max_age_secs: Some(60),
        };
        let cookie = set_cookie(&config, SessionId::new());
        assert!(cookie.starts_with("sid="));
        assert!(cookie.ends_with("; Max-Age=60; Secure"));
    }

    #[test]
    fn should_expire_cookie_on_clear() {
        let cookie = clear_cookie(&CookieConfig::default());
        assert_eq!(
            cookie,
            "homedash_session=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0"
        );
    }
}
