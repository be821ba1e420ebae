//! In-process session store backed by a `HashMap` behind a tokio [`RwLock`].

use std::collections::HashMap;
use std::future::Future;

use chrono::TimeDelta;
use tokio::sync::RwLock;

use homedash_domain::error::HomedashError;
use homedash_domain::id::SessionId;
use homedash_domain::session::Session;
use homedash_domain::time::{self, Timestamp};

use crate::ports::SessionStore;

/// Records kept before the oldest login is evicted.
pub const DEFAULT_CAPACITY: usize = 1024;

/// Session store that lives in process memory.
///
/// Sessions do not survive a restart. When a maximum age is set, records
/// older than that are treated as absent and evicted on access; saving a
/// session also sweeps every expired record. Saving into a full store
/// evicts the oldest logins first, with or without a maximum age.
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<SessionId, Session>>,
    max_age: Option<TimeDelta>,
    capacity: usize,
}

impl InMemorySessionStore {
    /// Create a store whose sessions never expire.
    #[must_use]
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            max_age: None,
            capacity: DEFAULT_CAPACITY,
        }
    }

    /// Create a store that expires sessions `max_age` after login.
    #[must_use]
    pub fn with_max_age(max_age: TimeDelta) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            max_age: Some(max_age),
            capacity: DEFAULT_CAPACITY,
        }
    }

    /// Hold at most `capacity` records (at least one).
    #[must_use]
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity.max(1);
        self
    }

    /// Number of records currently held, expired ones included.
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    fn is_expired(&self, session: &Session, at: Timestamp) -> bool {
        self.max_age
            .is_some_and(|max_age| session.is_expired(max_age, at))
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore for InMemorySessionStore {
    fn load(
        &self,
        id: SessionId,
    ) -> impl Future<Output = Result<Option<Session>, HomedashError>> + Send {
        async move {
            let now = time::now();
            let mut sessions = self.sessions.write().await;
            let expired = sessions
                .get(&id)
                .is_some_and(|session| self.is_expired(session, now));
            if expired {
                sessions.remove(&id);
                tracing::debug!(session_id = %id, "session expired");
                return Ok(None);
            }
            Ok(sessions.get(&id).cloned())
        }
    }

    fn save(&self, session: Session) -> impl Future<Output = Result<(), HomedashError>> + Send {
        async move {
            let now = time::now();
            let mut sessions = self.sessions.write().await;
            sessions.retain(|_, existing| !self.is_expired(existing, now));
            while sessions.len() >= self.capacity && !sessions.contains_key(&session.id) {
                let oldest = sessions
                    .values()
                    .min_by_key(|existing| existing.authenticated_at)
                    .map(|existing| existing.id);
                let Some(oldest) = oldest else { break };
                sessions.remove(&oldest);
                tracing::debug!(session_id = %oldest, "session evicted, store full");
            }
            sessions.insert(session.id, session);
            Ok(())
        }
    }

    fn remove(&self, id: SessionId) -> impl Future<Output = Result<(), HomedashError>> + Send {
        async move {
            self.sessions.write().await.remove(&id);
            Ok(())
        }
    }
}
