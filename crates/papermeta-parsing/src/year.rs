use once_cell::sync::Lazy;
use regex::Regex;

use crate::cascade::{Matcher, first_match};

static LABELLED_YEAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:Año|Fecha de publicación|Fecha):?\s*([0-9]{4})").unwrap());

static YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(?:19|20)[0-9]{2}\b").unwrap());

static SECTION_MARKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:Abstract|Introduction|Resumen|Introducción)\b").unwrap());

/// Extract the publication year as a four-digit string.
///
/// 1. a year after `Año`, `Fecha de publicación` or `Fecha`
/// 2. the first 19xx/20xx year that appears before an abstract or
///    introduction heading
/// 3. the first 19xx/20xx year anywhere
pub fn extract_year(text: &str) -> Option<String> {
    let levels: [Matcher<'_, str, String>; 3] = [&labelled_year, &year_before_body, &first_year];
    first_match(text, &levels)
}

fn labelled_year(text: &str) -> Option<String> {
    LABELLED_YEAR_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// First year ending before the last abstract/introduction marker, i.e.
/// earlier in the text than at least one marker occurrence.
fn year_before_body(text: &str) -> Option<String> {
    let last_marker = SECTION_MARKER_RE.find_iter(text).last()?.start();
    YEAR_RE
        .find_iter(text)
        .take_while(|m| m.end() <= last_marker)
        .next()
        .map(|m| m.as_str().to_string())
}

fn first_year(text: &str) -> Option<String> {
    YEAR_RE.find(text).map(|m| m.as_str().to_string())
}
