//! The shared access token: the single login credential.

use std::fmt;

use crate::error::ValidationError;

/// Shared secret compared against the `token` submitted by the login form.
///
/// The comparison is plain string equality. There is no hashing and no
/// constant-time comparison; the token is also handed to the dashboard page
/// as the MQTT topic prefix, so it is not a secret from logged-in users.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wrap a configured token.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyToken`] for an empty string, which
    /// would otherwise let an empty form submission log in.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::EmptyToken);
        }
        Ok(Self(value))
    }

    /// Whether `candidate` is exactly this token.
    #[must_use]
    pub fn matches(&self, candidate: &str) -> bool {
        self.0 == candidate
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(***)")
    }
}
