//! Weather service: resolve a location query and look up current conditions.

use homedash_domain::error::{HomedashError, ValidationError};
use homedash_domain::weather::{Location, LocationQuery, SENTINEL_CITY, Units, WeatherReport};

use crate::ports::WeatherSource;

/// Lookup policy for [`WeatherService`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherSettings {
    /// Markup convention and temperature unit.
    pub units: Units,
    /// City value that triggers the fallback location.
    pub sentinel_city: String,
    /// Location used instead of the query when the city is the sentinel.
    pub fallback: Location,
}

impl Default for WeatherSettings {
    fn default() -> Self {
        Self {
            units: Units::default(),
            sentinel_city: SENTINEL_CITY.to_string(),
            fallback: Location::default(),
        }
    }
}

/// Application service for weather lookups.
pub struct WeatherService<W> {
    source: W,
    settings: WeatherSettings,
}

impl<W: WeatherSource> WeatherService<W> {
    /// Create a new service backed by the given source.
    pub fn new(source: W, settings: WeatherSettings) -> Self {
        Self { source, settings }
    }

    /// Validate `query` and apply the sentinel-city fallback.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingLocationFields`] when a field is
    /// absent or blank.
    pub fn resolve(&self, query: LocationQuery) -> Result<Location, ValidationError> {
        query.resolve(&self.settings.sentinel_city, &self.settings.fallback)
    }

    /// Look up current conditions for `query`.
    ///
    /// Makes exactly one call to the source; failures are not retried.
    ///
    /// # Errors
    ///
    /// Returns [`HomedashError::Validation`] for an incomplete query, or
    /// [`HomedashError::Weather`] when the source fails.
    #[tracing::instrument(skip(self))]
    pub async fn lookup(&self, query: LocationQuery) -> Result<WeatherReport, HomedashError> {
        let location = self.resolve(query)?;
        self.source
            .fetch(&location, self.settings.units)
            .await
            .map_err(|err| {
                tracing::warn!(kind = ?err.kind, error = %err, city = %location.city, "weather lookup failed");
                HomedashError::from(err)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use homedash_domain::weather::{WeatherError, WeatherErrorKind};
    use std::future::Future;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingSource {
        calls: Mutex<Vec<(Location, Units)>>,
    }

    impl WeatherSource for RecordingSource {
        fn fetch(
            &self,
            location: &Location,
            units: Units,
        ) -> impl Future<Output = Result<WeatherReport, WeatherError>> + Send {
            self.calls.lock().unwrap().push((location.clone(), units));
            async {
                Ok(WeatherReport {
                    tmp: "18°C".into(),
                    ppt: "5%".into(),
                    hm: "70%".into(),
                    ws: "11 km/h".into(),
                    dc: "Cloudy".into(),
                    img_src: None,
                })
            }
        }
    }

    struct FailingSource;

    impl WeatherSource for FailingSource {
        fn fetch(
            &self,
            _location: &Location,
            _units: Units,
        ) -> impl Future<Output = Result<WeatherReport, WeatherError>> + Send {
            async { Err(WeatherError::new(WeatherErrorKind::Network, "connection refused")) }
        }
    }

    fn query(city: &str, state: &str, pincode: &str) -> LocationQuery {
        LocationQuery {
            city: Some(city.into()),
            state: Some(state.into()),
            pincode: Some(pincode.into()),
        }
    }

    #[tokio::test]
    async fn should_fetch_submitted_location() {
        let service = WeatherService::new(RecordingSource::default(), WeatherSettings::default());
        let report = service
            .lookup(query("Paris", "Ile-de-France", "75000"))
            .await
            .unwrap();
        assert_eq!(report.tmp, "18°C");

        let calls = service.source.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, Location::new("Paris", "Ile-de-France", "75000"));
        assert_eq!(calls[0].1, Units::Metric);
    }

    #[tokio::test]
    async fn should_fetch_fallback_for_sentinel_city() {
        let service = WeatherService::new(RecordingSource::default(), WeatherSettings::default());
        service.lookup(query("Unknown City", "x", "y")).await.unwrap();

        let calls = service.source.calls.lock().unwrap();
        assert_eq!(
            calls[0].0,
            Location::new("Kuthera", "Himachal Pradesh", "177020")
        );
    }

    #[tokio::test]
    async fn should_use_configured_units_and_fallback() {
        let settings = WeatherSettings {
            units: Units::Imperial,
            sentinel_city: "Nowhere".into(),
            fallback: Location::new("Austin", "Texas", "73301"),
        };
        let service = WeatherService::new(RecordingSource::default(), settings);
        service.lookup(query("Nowhere", "a", "b")).await.unwrap();

        let calls = service.source.calls.lock().unwrap();
        assert_eq!(calls[0].0.city, "Austin");
        assert_eq!(calls[0].1, Units::Imperial);
    }

    #[tokio::test]
    async fn should_not_call_source_for_incomplete_query() {
        let service = WeatherService::new(RecordingSource::default(), WeatherSettings::default());
        let err = service.lookup(LocationQuery::default()).await.unwrap_err();
        assert!(matches!(err, HomedashError::Validation(_)));
        assert!(service.source.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_surface_source_failure() {
        let service = WeatherService::new(FailingSource, WeatherSettings::default());
        let err = service
            .lookup(query("Paris", "Ile-de-France", "75000"))
            .await
            .unwrap_err();
        let HomedashError::Weather(err) = err else {
            panic!("expected a weather error");
        };
        assert_eq!(err.kind, WeatherErrorKind::Network);
        assert_eq!(err.to_string(), "connection refused");
    }
}
