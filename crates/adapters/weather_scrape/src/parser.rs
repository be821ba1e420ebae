//! Results-page parser.
//!
//! Pure functions over the HTML text: no network needed. The weather card
//! is located purely by element ids (`wob_*`); any markup change on the
//! search engine's side surfaces as [`ScrapeError::MissingElement`].

use scraper::{ElementRef, Html, Selector};

use homedash_domain::weather::{Units, WeatherReport};

use crate::error::ScrapeError;

const PRECIPITATION_ID: &str = "wob_pp";
const HUMIDITY_ID: &str = "wob_hm";
const DESCRIPTION_ID: &str = "wob_dc";
const ICON_ID: &str = "wob_tci";

/// Extract the current conditions from a results page.
///
/// Element text is returned as found, surrounding whitespace included.
///
/// `units` selects the temperature/wind-speed element ids and the unit
/// suffix appended to the temperature. The icon is optional; every other
/// field is required.
///
/// # Errors
///
/// Returns [`ScrapeError::MissingElement`] for the first required element
/// that is absent.
pub fn parse_report(html: &str, units: Units) -> Result<WeatherReport, ScrapeError> {
    let document = Html::parse_document(html);
    let prefix = units.element_prefix();

    let temperature = span_text(&document, &format!("{prefix}tm"))?;
    let ppt = span_text(&document, PRECIPITATION_ID)?;
    let hm = span_text(&document, HUMIDITY_ID)?;
    let ws = span_text(&document, &format!("{prefix}ws"))?;
    let dc = span_text(&document, DESCRIPTION_ID)?;
    let img_src = find_by_id(&document, "img", ICON_ID)?
        .and_then(|img| img.value().attr("src"))
        .map(|src| format!("https:{src}"));

    Ok(WeatherReport {
        tmp: format!("{temperature}{}", units.temperature_suffix()),
        ppt,
        hm,
        ws,
        dc,
        img_src,
    })
}

fn span_text(document: &Html, id: &str) -> Result<String, ScrapeError> {
    let element = find_by_id(document, "span", id)?.ok_or_else(|| ScrapeError::MissingElement {
        id: id.to_string(),
    })?;
    Ok(element.text().collect())
}

fn find_by_id<'a>(
    document: &'a Html,
    tag: &str,
    id: &str,
) -> Result<Option<ElementRef<'a>>, ScrapeError> {
    let source = format!("{tag}#{id}");
    let selector = Selector::parse(&source).map_err(|err| ScrapeError::Selector {
        reason: err.to_string(),
        selector: source.clone(),
    })?;
    Ok(document.select(&selector).next())
}
