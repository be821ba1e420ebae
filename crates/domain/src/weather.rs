//! Weather lookup: locations, reports and the degraded fallback.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// City value the page sends when reverse geocoding found nothing.
pub const SENTINEL_CITY: &str = "Unknown City";

/// A fully specified location to look up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub city: String,
    pub state: String,
    pub pincode: String,
}

impl Location {
    #[must_use]
    pub fn new(
        city: impl Into<String>,
        state: impl Into<String>,
        pincode: impl Into<String>,
    ) -> Self {
        Self {
            city: city.into(),
            state: state.into(),
            pincode: pincode.into(),
        }
    }
}

impl Default for Location {
    /// The fixed location substituted for [`SENTINEL_CITY`].
    fn default() -> Self {
        Self::new("Kuthera", "Himachal Pradesh", "177020")
    }
}

/// Location fields as received from a request, each possibly absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LocationQuery {
    pub city: Option<String>,
    pub state: Option<String>,
    pub pincode: Option<String>,
}

impl LocationQuery {
    /// Fill fields missing from `self` with the ones from `other`.
    #[must_use]
    pub fn or(self, other: Self) -> Self {
        Self {
            city: self.city.or(other.city),
            state: self.state.or(other.state),
            pincode: self.pincode.or(other.pincode),
        }
    }

    /// Turn the query into a [`Location`].
    ///
    /// When the city equals `sentinel_city`, `fallback` is returned instead
    /// of the submitted triple.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingLocationFields`] naming every field
    /// that is absent or blank.
    pub fn resolve(self, sentinel_city: &str, fallback: &Location) -> Result<Location, ValidationError> {
        let city = present(self.city);
        let state = present(self.state);
        let pincode = present(self.pincode);

        let (Some(city), Some(state), Some(pincode)) = (&city, &state, &pincode) else {
            let missing = [("city", &city), ("state", &state), ("pincode", &pincode)]
                .into_iter()
                .filter(|(_, value)| value.is_none())
                .map(|(name, _)| name)
                .collect();
            return Err(ValidationError::MissingLocationFields(missing));
        };

        if city == sentinel_city {
            return Ok(fallback.clone());
        }
        Ok(Location::new(city.as_str(), state.as_str(), pincode.as_str()))
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Which markup convention and temperature unit to scrape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Units {
    /// Celsius; temperature and wind speed read from the `wob_t` prefixed ids.
    #[default]
    Metric,
    /// Fahrenheit; temperature and wind speed read from the `wob_` prefixed ids.
    Imperial,
}

impl Units {
    /// Prefix of the temperature (`…tm`) and wind speed (`…ws`) element ids.
    #[must_use]
    pub fn element_prefix(self) -> &'static str {
        match self {
            Self::Metric => "wob_t",
            Self::Imperial => "wob_",
        }
    }

    /// Suffix appended to the scraped temperature.
    #[must_use]
    pub fn temperature_suffix(self) -> &'static str {
        match self {
            Self::Metric => "°C",
            Self::Imperial => "°F",
        }
    }
}

/// Current conditions, as displayed by the dashboard.
///
/// Field names are the short keys the page reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherReport {
    /// Temperature including its unit suffix (e.g. `21°C`).
    pub tmp: String,
    /// Precipitation (e.g. `10%`).
    pub ppt: String,
    /// Humidity (e.g. `64%`).
    pub hm: String,
    /// Wind speed (e.g. `8 km/h`).
    pub ws: String,
    /// Short description (e.g. `Partly cloudy`).
    pub dc: String,
    /// Absolute URL of the condition icon, when the page had one.
    pub img_src: Option<String>,
}

/// Broad class of a weather lookup failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherErrorKind {
    /// The request could not be sent or the body could not be read.
    Network,
    /// The page came back but an expected element was missing.
    Markup,
}

/// A failed weather lookup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct WeatherError {
    pub kind: WeatherErrorKind,
    pub message: String,
}

impl WeatherError {
    #[must_use]
    pub fn new(kind: WeatherErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Sentinel for humidity, wind speed and description in a degraded report.
pub const NIL: &str = "NIL";

/// The report served in place of a real one when a lookup fails.
///
/// `tmp` carries the error text so the page shows why there is no reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DegradedReport {
    pub tmp: String,
    pub ppt: u8,
    pub hm: &'static str,
    pub ws: &'static str,
    pub dc: &'static str,
    pub img_src: &'static str,
}

impl From<&WeatherError> for DegradedReport {
    fn from(err: &WeatherError) -> Self {
        Self {
            tmp: err.to_string(),
            ppt: 0,
            hm: NIL,
            ws: NIL,
            dc: NIL,
            img_src: "",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(city: Option<&str>, state: Option<&str>, pincode: Option<&str>) -> LocationQuery {
        LocationQuery {
            city: city.map(String::from),
            state: state.map(String::from),
            pincode: pincode.map(String::from),
        }
    }

    #[test]
    fn should_resolve_complete_query() {
        let location = query(Some("Paris"), Some("Ile-de-France"), Some("75000"))
            .resolve(SENTINEL_CITY, &Location::default())
            .unwrap();
        assert_eq!(location, Location::new("Paris", "Ile-de-France", "75000"));
    }

    #[test]
    fn should_substitute_fallback_for_sentinel_city() {
        let location = query(Some("Unknown City"), Some("x"), Some("y"))
            .resolve(SENTINEL_CITY, &Location::default())
            .unwrap();
        assert_eq!(location.city, "Kuthera");
        assert_eq!(location.state, "Himachal Pradesh");
        assert_eq!(location.pincode, "177020");
    }

    #[test]
    fn should_name_missing_fields() {
        let err = query(Some("Paris"), None, Some("  "))
            .resolve(SENTINEL_CITY, &Location::default())
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingLocationFields(vec!["state", "pincode"])
        );
    }

    #[test]
    fn should_reject_empty_query() {
        let err = LocationQuery::default()
            .resolve(SENTINEL_CITY, &Location::default())
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingLocationFields(vec!["city", "state", "pincode"])
        );
    }

    #[test]
    fn should_prefer_own_fields_when_merging() {
        let merged = query(Some("Lyon"), None, None).or(query(Some("Paris"), Some("ARA"), None));
        assert_eq!(merged, query(Some("Lyon"), Some("ARA"), None));
    }

    #[test]
    fn should_select_ids_and_suffix_per_units() {
        assert_eq!(Units::Metric.element_prefix(), "wob_t");
        assert_eq!(Units::Metric.temperature_suffix(), "°C");
        assert_eq!(Units::Imperial.element_prefix(), "wob_");
        assert_eq!(Units::Imperial.temperature_suffix(), "°F");
    }

    #[test]
    fn should_build_degraded_report_from_error() {
        let err = WeatherError::new(WeatherErrorKind::Markup, "element `wob_ttm` not found");
        let degraded = DegradedReport::from(&err);
        assert_eq!(degraded.tmp, "element `wob_ttm` not found");
        assert_eq!(degraded.ppt, 0);
        assert_eq!(degraded.hm, "NIL");
        assert_eq!(degraded.ws, "NIL");
        assert_eq!(degraded.dc, "NIL");
        assert_eq!(degraded.img_src, "");
    }

    #[test]
    fn should_serialize_report_with_null_icon() {
        let report = WeatherReport {
            tmp: "21°C".into(),
            ppt: "0%".into(),
            hm: "50%".into(),
            ws: "5 km/h".into(),
            dc: "Sunny".into(),
            img_src: None,
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["tmp"], "21°C");
        assert!(json["img_src"].is_null());
    }
}
