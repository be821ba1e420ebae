//! Session gate: use-cases for logging in and out with the shared token.

use homedash_domain::error::HomedashError;
use homedash_domain::id::SessionId;
use homedash_domain::session::{Session, SessionState};
use homedash_domain::token::AccessToken;

use crate::ports::SessionStore;

/// Result of a login attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// The token matched; the caller must hand the new session id to the client.
    Authenticated(Session),
    /// The token did not match; nothing was changed.
    Rejected,
}

/// Application service guarding the dashboard behind the access token.
///
/// Transitions:
/// - anonymous → authenticated, only through [`login`](Self::login) with the
///   exact token
/// - authenticated → anonymous, through [`logout`](Self::logout) or store expiry
pub struct SessionGate<S> {
    store: S,
    token: AccessToken,
}

impl<S: SessionStore> SessionGate<S> {
    /// Create a new gate backed by the given store.
    pub fn new(store: S, token: AccessToken) -> Self {
        Self { store, token }
    }

    /// Current state of the session identified by `id`.
    ///
    /// `None`, unknown and expired ids are all anonymous.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the store.
    pub async fn state(&self, id: Option<SessionId>) -> Result<SessionState, HomedashError> {
        let Some(id) = id else {
            return Ok(SessionState::Anonymous);
        };
        Ok(self
            .store
            .load(id)
            .await?
            .map_or(SessionState::Anonymous, |session| session.state))
    }

    /// Whether the session identified by `id` is authenticated.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the store.
    pub async fn is_logged_in(&self, id: Option<SessionId>) -> Result<bool, HomedashError> {
        Ok(self.state(id).await? == SessionState::Authenticated)
    }

    /// Attempt to log in with `submitted`.
    ///
    /// On success the previous session (if any) is discarded and a fresh
    /// authenticated session is stored and returned.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the store.
    #[tracing::instrument(skip(self, submitted))]
    pub async fn login(
        &self,
        current: Option<SessionId>,
        submitted: &str,
    ) -> Result<LoginOutcome, HomedashError> {
        if !self.token.matches(submitted) {
            tracing::info!("login rejected: invalid token");
            return Ok(LoginOutcome::Rejected);
        }

        if let Some(previous) = current {
            self.store.remove(previous).await?;
        }
        let session = Session::authenticated();
        self.store.save(session.clone()).await?;
        tracing::info!(session_id = %session.id, "login accepted");
        Ok(LoginOutcome::Authenticated(session))
    }

    /// Log out the session identified by `id`.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the store.
    #[tracing::instrument(skip(self))]
    pub async fn logout(&self, id: Option<SessionId>) -> Result<(), HomedashError> {
        if let Some(id) = id {
            self.store.remove(id).await?;
        }
        Ok(())
    }
}
