use once_cell::sync::Lazy;
use regex::Regex;

use crate::cascade::{Matcher, first_match};
use crate::config::ParsingConfig;
use crate::text_processing::{
    char_len, collapse_whitespace, first_sentence, non_blank_lines, truncate_chars,
};

/// Lines that are never titles: identifiers, links, copyright and e-mail lines.
static NOISE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^\s*(?:doi|http|©|@)").unwrap());

/// Per-line title shapes, tried in order. Each line is matched with a
/// trailing `\n` so the line-break anchored shapes can see the line end.
static LINE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        // Text preceding an author keyword
        r"(?i)^(.*?)\s+(?:by|por|authors?|autor(?:es)?)\b",
        // ALL CAPS heading
        r"^([A-ZÁÉÍÓÚÑ0-9][A-ZÁÉÍÓÚÑ0-9\s,.()-]{15,})\s*[.!?]?\s*\n",
        // Heading ending in a colon
        r"^(.+?:)\s*\n",
        // Text preceding an abstract/introduction keyword
        r"(?i)^(.*?)\s+(?:abstract|resumen|introduction|introducción)\b",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

const MAX_TITLE_CHARS: usize = 300;

/// Extract the document title.
///
/// Tries, in order:
/// 1. line-shape patterns over the first non-blank lines
/// 2. the longest of the first few non-blank lines
/// 3. the first sentence of the first paragraph
///
/// Returns `None` when every level fails; the caller substitutes the sentinel.
pub fn extract_title(text: &str) -> Option<String> {
    extract_title_with_config(text, &ParsingConfig::default())
}

pub(crate) fn extract_title_with_config(text: &str, config: &ParsingConfig) -> Option<String> {
    let by_pattern = |t: &str| title_from_line_patterns(t, config.title_scan_lines);
    let by_length = |t: &str| longest_line(t, config.title_fallback_lines);

    let levels: [Matcher<'_, str, String>; 3] =
        [&by_pattern, &by_length, &first_paragraph_sentence];
    first_match(text, &levels)
}

fn title_from_line_patterns(text: &str, scan_lines: usize) -> Option<String> {
    non_blank_lines(text)
        .into_iter()
        .take(scan_lines)
        .filter(|line| !NOISE_RE.is_match(line))
        .find_map(title_from_line)
}

fn title_from_line(line: &str) -> Option<String> {
    let terminated = format!("{}\n", line);
    LINE_PATTERNS.iter().find_map(|re| {
        let candidate = re.captures(&terminated)?.get(1)?.as_str().trim();
        is_acceptable(candidate).then(|| candidate.to_string())
    })
}

fn is_acceptable(candidate: &str) -> bool {
    let len = char_len(candidate);
    len > 10 && len < MAX_TITLE_CHARS && candidate.chars().any(char::is_alphabetic)
}

/// Longest line with 20 < length < 250 among the first `window` non-blank
/// lines. The earliest line wins ties.
fn longest_line(text: &str, window: usize) -> Option<String> {
    let mut best: Option<(&str, usize)> = None;
    for line in non_blank_lines(text).into_iter().take(window) {
        let len = char_len(line);
        if len <= 20 || len >= 250 {
            continue;
        }
        if best.is_none_or(|(_, best_len)| len > best_len) {
            best = Some((line, len));
        }
    }
    best.map(|(line, _)| line.to_string())
}

fn first_paragraph_sentence(text: &str) -> Option<String> {
    let paragraph = text.split("\n\n").next().unwrap_or_default();
    let collapsed = collapse_whitespace(paragraph);
    let sentence = first_sentence(collapsed.trim()).trim();
    if sentence.is_empty() {
        return None;
    }
    Some(truncate_chars(sentence, MAX_TITLE_CHARS).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_before_author_keyword() {
        let text = "Deep Networks for Crop Yield Prediction by Ana Pérez\nAbstract\n";
        assert_eq!(
            extract_title(text).as_deref(),
            Some("Deep Networks for Crop Yield Prediction")
        );
    }

    #[test]
    fn test_all_caps_heading() {
        let text = "\n\nA SURVEY OF GRAPH NEURAL NETWORKS.\nsome body text\n";
        assert_eq!(
            extract_title(text).as_deref(),
            Some("A SURVEY OF GRAPH NEURAL NETWORKS.")
        );
    }

    #[test]
    fn test_colon_heading() {
        let text = "Learning to Rank Scientific Claims:\nA Benchmark\n";
        assert_eq!(
            extract_title(text).as_deref(),
            Some("Learning to Rank Scientific Claims:")
        );
    }

    #[test]
    fn test_title_before_abstract_keyword() {
        let text = "Sparse Attention in Practice Abstract We study attention.\n";
        assert_eq!(
            extract_title(text).as_deref(),
            Some("Sparse Attention in Practice")
        );
    }

    #[test]
    fn test_noise_lines_skipped() {
        let text = "doi: 10.1000/abc WRITTEN BY SOMEONE\nhttps://example.org by the lab\nQuantum Error Correction Codes by R. Feyn\n";
        assert_eq!(
            extract_title(text).as_deref(),
            Some("Quantum Error Correction Codes")
        );
    }

    #[test]
    fn test_short_candidate_rejected() {
        // "Short" is too short for the keyword pattern, so the longest-line
        // fallback picks the second line.
        let text = "Short by X\nA reasonably long descriptive line here\n";
        assert_eq!(
            extract_title(text).as_deref(),
            Some("A reasonably long descriptive line here")
        );
    }

    #[test]
    fn test_longest_line_first_wins_ties() {
        assert_eq!(
            longest_line("aaaaaaaaaaaaaaaaaaaaaa\nbbbbbbbbbbbbbbbbbbbbbb\n", 10).as_deref(),
            Some("aaaaaaaaaaaaaaaaaaaaaa")
        );
        assert_eq!(longest_line("tiny\nlines\n", 10), None);
    }

    #[test]
    fn test_longest_line_window() {
        let text = "one\ntwo\nthree\nA line that is definitely long enough\n";
        assert_eq!(longest_line(text, 3), None);
        assert!(longest_line(text, 4).is_some());
    }

    #[test]
    fn test_paragraph_fallback_is_deterministic() {
        let text = "By John Doe\nSome Title Here\nAbstract\n...";
        let first = extract_title(text);
        assert_eq!(first, extract_title(text));
        assert_eq!(
            first.as_deref(),
            Some("By John Doe Some Title Here Abstract ...")
        );
    }

    #[test]
    fn test_paragraph_fallback_first_sentence() {
        let text = "tiny. second\n\nother";
        assert_eq!(extract_title(text).as_deref(), Some("tiny."));
    }

    #[test]
    fn test_paragraph_fallback_truncated() {
        let text = "x".repeat(400);
        let title = extract_title(&text).unwrap();
        assert_eq!(char_len(&title), 300);
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(extract_title(""), None);
        assert_eq!(extract_title("   \n\n  "), None);
    }
}
