use once_cell::sync::Lazy;
use regex::Regex;

const DOI_RESOLVER: &str = "https://doi.org/";

/// Extract a bare DOI (`10.<registrant>/<suffix>`) from document text.
pub fn extract_doi(text: &str) -> Option<&str> {
    static DOI_RE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"(?i)\b10\.[0-9]{4,9}/[-._;()/:A-Z0-9]+\b").unwrap());
    DOI_RE.find(text).map(|m| m.as_str())
}

/// Extract the first `http://` or `https://` URL, up to the next whitespace.
pub fn extract_url(text: &str) -> Option<&str> {
    static URL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"https?://\S+").unwrap());
    URL_RE.find(text).map(|m| m.as_str())
}

/// Extract the document's identifying link.
///
/// A DOI anywhere in the text wins and is returned as a resolver URL
/// (`https://doi.org/<doi>`). Otherwise the first plain URL is returned
/// exactly as written, without normalization.
pub fn extract_url_doi(text: &str) -> Option<String> {
    if let Some(doi) = extract_doi(text) {
        return Some(format!("{}{}", DOI_RESOLVER, doi));
    }
    extract_url(text).map(String::from)
}
