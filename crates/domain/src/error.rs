//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`HomedashError`] via `#[from]`.

use crate::weather::WeatherError;

/// Top-level error crossing port boundaries.
#[derive(Debug, thiserror::Error)]
pub enum HomedashError {
    /// Input failed a domain invariant.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// The weather source could not produce a report.
    #[error("weather lookup failed")]
    Weather(#[from] WeatherError),

    /// A backing store failed.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Domain invariant violations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// One or more location fields were absent or blank.
    #[error("missing required parameters: {}", .0.join(", "))]
    MissingLocationFields(Vec<&'static str>),

    /// The configured access token is empty.
    #[error("access token must not be empty")]
    EmptyToken,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weather::WeatherErrorKind;

    #[test]
    fn should_list_missing_location_fields() {
        let err = ValidationError::MissingLocationFields(vec!["city", "pincode"]);
        assert_eq!(err.to_string(), "missing required parameters: city, pincode");
    }

    #[test]
    fn should_wrap_validation_error() {
        let err: HomedashError = ValidationError::EmptyToken.into();
        assert!(matches!(err, HomedashError::Validation(_)));
    }

    #[test]
    fn should_wrap_weather_error() {
        let err: HomedashError = WeatherError::new(WeatherErrorKind::Network, "timed out").into();
        assert!(matches!(err, HomedashError::Weather(_)));
    }
}
