//! Session store port: persistence of session records.

use std::future::Future;

use homedash_domain::error::HomedashError;
use homedash_domain::id::SessionId;
use homedash_domain::session::Session;

/// Keeps session records between requests.
///
/// A missing record is equivalent to an anonymous session, so stores only
/// need to hold authenticated ones.
pub trait SessionStore {
    /// Look up a session by id.
    ///
    /// Stores that expire sessions return `None` for expired records.
    fn load(
        &self,
        id: SessionId,
    ) -> impl Future<Output = Result<Option<Session>, HomedashError>> + Send;

    /// Insert or replace a session record.
    fn save(&self, session: Session) -> impl Future<Output = Result<(), HomedashError>> + Send;

    /// Remove a session record. Removing an unknown id is not an error.
    fn remove(&self, id: SessionId) -> impl Future<Output = Result<(), HomedashError>> + Send;
}

impl<T: SessionStore + Send + Sync> SessionStore for std::sync::Arc<T> {
    fn load(
        &self,
        id: SessionId,
    ) -> impl Future<Output = Result<Option<Session>, HomedashError>> + Send {
        (**self).load(id)
    }

    fn save(&self, session: Session) -> impl Future<Output = Result<(), HomedashError>> + Send {
        (**self).save(session)
    }

    fn remove(&self, id: SessionId) -> impl Future<Output = Result<(), HomedashError>> + Send {
        (**self).remove(id)
    }
}
