//! Search query construction.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use homedash_domain::weather::Location;

const QUERY_PREFIX: &str = "current weather of";

/// Everything but the RFC 3986 unreserved characters.
const QUERY_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Build the search phrase for `location`.
///
/// Each part has its inner spaces removed, so `Himachal Pradesh` becomes
/// `HimachalPradesh`.
#[must_use]
pub fn search_phrase(location: &Location) -> String {
    [&location.city, &location.state, &location.pincode]
        .into_iter()
        .fold(QUERY_PREFIX.to_string(), |mut phrase, part| {
            phrase.push(' ');
            phrase.extend(part.chars().filter(|c| *c != ' '));
            phrase
        })
}

/// Full request URL: `search_url` followed by the percent-encoded phrase.
#[must_use]
pub fn search_url(search_url: &str, location: &Location) -> String {
    format!(
        "{search_url}{}",
        utf8_percent_encode(&search_phrase(location), QUERY_ENCODE_SET)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_strip_spaces_inside_parts() {
        let location = Location::new("New Delhi", "Delhi", "110 001");
        assert_eq!(
            search_phrase(&location),
            "current weather of NewDelhi Delhi 110001"
        );
    }

    #[test]
    fn should_percent_encode_phrase() {
        let location = Location::new("Kuthera", "Himachal Pradesh", "177020");
        assert_eq!(
            search_url("https://www.google.co.in/search?q=", &location),
            "https://www.google.co.in/search?q=current%20weather%20of%20Kuthera%20HimachalPradesh%20177020"
        );
    }

    #[test]
    fn should_encode_reserved_characters() {
        let location = Location::new("Saint-Étienne", "A&B", "42000");
        let url = search_url("http://search.test/?q=", &location);
        assert!(url.ends_with("Saint-%C3%89tienne%20A%26B%2042000"));
    }
}
