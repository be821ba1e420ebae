//! Session: per-browser login state.
//!
//! A session is either [`SessionState::Anonymous`] or
//! [`SessionState::Authenticated`]. Only authenticated sessions are ever
//! stored; a missing record means anonymous.

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

use crate::id::SessionId;
use crate::time::{Timestamp, now};

/// Login state of a browser session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// No valid token has been submitted (initial state).
    #[default]
    Anonymous,
    /// The configured token was submitted.
    Authenticated,
}

/// A stored session record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    pub state: SessionState,
    pub authenticated_at: Option<Timestamp>,
}

impl Session {
    /// A fresh anonymous session.
    #[must_use]
    pub fn anonymous() -> Self {
        Self {
            id: SessionId::new(),
            state: SessionState::Anonymous,
            authenticated_at: None,
        }
    }

    /// A fresh authenticated session with a newly generated id.
    #[must_use]
    pub fn authenticated() -> Self {
        Self {
            id: SessionId::new(),
            state: SessionState::Authenticated,
            authenticated_at: Some(now()),
        }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.state == SessionState::Authenticated
    }

    /// Whether the session is older than `max_age` at instant `at`.
    ///
    /// Anonymous sessions never expire.
    #[must_use]
    pub fn is_expired(&self, max_age: TimeDelta, at: Timestamp) -> bool {
        self.authenticated_at
            .is_some_and(|since| at.signed_duration_since(since) > max_age)
    }
}
