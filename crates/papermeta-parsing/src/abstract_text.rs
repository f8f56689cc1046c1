use once_cell::sync::Lazy;
use regex::Regex;

use crate::cascade::first_capture;
use crate::text_processing::collapse_whitespace;

/// Heading-delimited abstract patterns, in priority order. Each heading must
/// sit on its own line; group 1 runs lazily to the first terminator.
static ABSTRACT_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)Resumen\n([\s\S]+?)(?:Introducción|Palabras clave|§|\n\n)",
        r"(?i)Abstract\n([\s\S]+?)(?:Introducción|Palabras clave|§|\n\n)",
        r"(?i)Introducción\n([\s\S]+?)(?:1\. |§|\n\n)",
        r"(?i)Summary\n([\s\S]+?)1\. ",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Extract the abstract paragraph, whitespace collapsed and trimmed.
pub fn extract_abstract(text: &str) -> Option<String> {
    let raw = first_capture(&ABSTRACT_PATTERNS, text)?;
    Some(collapse_whitespace(raw).trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_abstract_until_blank_line() {
        let text = "Title\nAbstract\nWe study   things\nin detail.\n\n1. Introduction\n";
        assert_eq!(
            extract_abstract(text).as_deref(),
            Some("We study things in detail.")
        );
    }

    #[test]
    fn test_spanish_abstract_before_keywords() {
        let text = "Resumen\nEste trabajo analiza datos.\nPalabras clave: datos";
        assert_eq!(
            extract_abstract(text).as_deref(),
            Some("Este trabajo analiza datos.")
        );
    }

    #[test]
    fn test_resumen_preferred_over_abstract() {
        let text = "Abstract\nEnglish text.\n\nResumen\nTexto en español.\n\n";
        assert_eq!(extract_abstract(text).as_deref(), Some("Texto en español."));
    }

    #[test]
    fn test_case_insensitive_heading() {
        let text = "ABSTRACT\nShouted heading body.§ rest";
        assert_eq!(extract_abstract(text).as_deref(), Some("Shouted heading body."));
    }

    #[test]
    fn test_introduccion_section() {
        let text = "Introducción\nEl problema es difícil. 1. Antecedentes";
        assert_eq!(
            extract_abstract(text).as_deref(),
            Some("El problema es difícil.")
        );
    }

    #[test]
    fn test_summary_needs_numbered_section() {
        assert_eq!(
            extract_abstract("Summary\nShort summary here. 1. Methods").as_deref(),
            Some("Short summary here.")
        );
        assert_eq!(extract_abstract("Summary\nNo numbered section"), None);
    }

    #[test]
    fn test_heading_must_end_line() {
        assert_eq!(extract_abstract("Abstract: inline text\n\n"), None);
    }
}
