use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::ParsingConfig;

/// Built-in venue patterns, in priority order. Group 1 is the venue name.
pub(crate) static DEFAULT_VENUE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)Proceedings of (?:the )?(.*?)[0-9]{4}",
        r"(?i)Journal of (.*?)(?:[0-9]|\(|\n?\z)",
        r"(?i)Revista (.*?)[0-9]{4}",
        r"(?i)Congreso (.*?)[0-9]{4}",
        r"(?i)Actas del (.*?)[0-9]{4}",
        r"(?i)Publicado en (.*?)[0-9]{4}",
        r"(?i)((?:IEEE|ACM|Springer) .*?(?:Conference|Journal|Symposium))",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Extract the publication venue (journal, proceedings, congress).
///
/// Patterns are tried in order and the first one whose trimmed capture is
/// non-empty wins.
pub fn extract_venue(text: &str) -> Option<String> {
    extract_venue_with_config(text, &ParsingConfig::default())
}

pub(crate) fn extract_venue_with_config(text: &str, config: &ParsingConfig) -> Option<String> {
    let patterns = config.venue_patterns.resolve(&DEFAULT_VENUE_PATTERNS);
    patterns.iter().find_map(|re| {
        let venue = re.captures(text)?.get(1)?.as_str().trim();
        (!venue.is_empty()).then(|| venue.to_string())
    })
}
