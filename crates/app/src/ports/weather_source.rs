//! Weather source port: where current conditions come from.

use std::future::Future;

use homedash_domain::weather::{Location, Units, WeatherError, WeatherReport};

/// Produces a [`WeatherReport`] for a location.
///
/// Implementations make a single attempt: no retry, no caching.
pub trait WeatherSource {
    fn fetch(
        &self,
        location: &Location,
        units: Units,
    ) -> impl Future<Output = Result<WeatherReport, WeatherError>> + Send;
}
