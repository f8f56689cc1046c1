use once_cell::sync::Lazy;
use regex::Regex;

use papermeta_core::{EntityLabel, EntitySpan};

use crate::config::ParsingConfig;

/// Byline patterns, tried in order, all case-insensitive. Group 1 is the
/// whole name list.
static BYLINE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        // English byline: "by Jane Smith, John Doe and Ana Ruiz"
        r"(?i)\bby\s+((?:[A-ZÁÉÍÓÚÑ][a-záéíóúñ]+ [A-ZÁÉÍÓÚÑ][a-záéíóúñ]+(?:, | and )?)+)",
        // Spanish byline: "por Ana Ruiz y Luis Gómez"
        r"(?i)\bpor\s+((?:[A-ZÁÉÍÓÚÑ][a-záéíóúñ]+ [A-ZÁÉÍÓÚÑ][a-záéíóúñ]+(?:, | y )?)+)",
        // Comma-joined names followed by an Abstract line or a Resumen heading
        r"(?i)([A-ZÁÉÍÓÚÑ][a-záéíóúñ]+(?:, [A-ZÁÉÍÓÚÑ][a-záéíóúñ]+)+)(?:\nabstract|resumen)",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

static NAME_SEPARATOR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i), |; | and | y ").unwrap());

/// Extract author names.
///
/// Byline patterns are tried first; when none matches, PERSON entities from
/// `entities` are used in order of appearance, capped at six. Returns an
/// empty vector when both fail.
pub fn extract_authors(text: &str, entities: &[EntitySpan]) -> Vec<String> {
    extract_authors_with_config(text, entities, &ParsingConfig::default())
}

pub(crate) fn extract_authors_with_config(
    text: &str,
    entities: &[EntitySpan],
    config: &ParsingConfig,
) -> Vec<String> {
    if let Some(names) = authors_from_byline(text) {
        return names;
    }
    authors_from_entities(entities, config.max_ner_authors)
}

fn authors_from_byline(text: &str) -> Option<Vec<String>> {
    BYLINE_PATTERNS.iter().find_map(|re| {
        let list = re.captures(text)?.get(1)?.as_str();
        let names = split_names(list);
        (!names.is_empty()).then_some(names)
    })
}

/// Split a captured name list on `", "`, `"; "`, `" and "` and `" y "`.
pub(crate) fn split_names(list: &str) -> Vec<String> {
    NAME_SEPARATOR_RE
        .split(list)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(String::from)
        .collect()
}

fn authors_from_entities(entities: &[EntitySpan], cap: usize) -> Vec<String> {
    entities
        .iter()
        .filter(|e| e.label == EntityLabel::Person)
        .map(|e| e.text.trim())
        .filter(|name| !name.is_empty())
        .take(cap)
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person(text: &str) -> EntitySpan {
        EntitySpan::new(text, EntityLabel::Person, 0, text.len())
    }

    #[test]
    fn test_english_byline() {
        let authors = extract_authors("By John Doe and Jane Smith\n", &[]);
        assert_eq!(authors, vec!["John Doe", "Jane Smith"]);
    }

    #[test]
    fn test_english_byline_commas() {
        let text = "A Study\nby Alice Brown, Bob Green and Carol White\nAbstract\n";
        assert_eq!(
            extract_authors(text, &[]),
            vec!["Alice Brown", "Bob Green", "Carol White"]
        );
    }

    #[test]
    fn test_spanish_byline() {
        let text = "Un estudio por Ana Ruiz y Luis Gómez\nResumen\n";
        assert_eq!(extract_authors(text, &[]), vec!["Ana Ruiz", "Luis Gómez"]);
    }

    #[test]
    fn test_names_above_abstract() {
        let text = "Title line\nGarcía, Pérez, Chen\nAbstract\nBody";
        assert_eq!(extract_authors(text, &[]), vec!["García", "Pérez", "Chen"]);
    }

    #[test]
    fn test_names_above_abstract_need_a_comma() {
        let text = "Title line\nChen\nAbstract\nBody";
        assert!(extract_authors(text, &[]).is_empty());
    }

    #[test]
    fn test_lowercase_byline() {
        let authors = extract_authors("by john doe and jane smith\n", &[]);
        assert_eq!(authors, vec!["john doe", "jane smith"]);
    }

    #[test]
    fn test_uppercase_spanish_byline() {
        let authors = extract_authors("POR ANA RUIZ Y LUIS GÓMEZ\n", &[]);
        assert_eq!(authors, vec!["ANA RUIZ", "LUIS GÓMEZ"]);
    }

    #[test]
    fn test_names_before_resumen_without_newline() {
        let text = "Título\nGarcía, Pérez Resumen\nGarcía, PérezResumen del trabajo";
        assert_eq!(extract_authors(text, &[]), vec!["García", "Pérez"]);
    }

    #[test]
    fn test_names_before_lowercase_abstract_line() {
        let text = "Title line\ngarcía, pérez\nabstract\nBody";
        assert_eq!(extract_authors(text, &[]), vec!["garcía", "pérez"]);
    }

    #[test]
    fn test_entity_fallback_capped() {
        let entities: Vec<EntitySpan> = (0..10)
            .map(|i| person(&format!("Person Number{}", i)))
            .collect();
        let authors = extract_authors("no byline here", &entities);
        assert_eq!(authors.len(), 6);
        assert_eq!(authors[0], "Person Number0");
    }

    #[test]
    fn test_entity_fallback_ignores_other_labels() {
        let entities = vec![
            EntitySpan::new("Spain", EntityLabel::Gpe, 0, 5),
            person("Ada Lovelace"),
        ];
        assert_eq!(extract_authors("text", &entities), vec!["Ada Lovelace"]);
    }

    #[test]
    fn test_custom_cap() {
        let config = crate::ParsingConfigBuilder::new()
            .max_ner_authors(2)
            .build()
            .unwrap();
        let entities = vec![person("A B"), person("C D"), person("E F")];
        let authors = extract_authors_with_config("", &entities, &config);
        assert_eq!(authors, vec!["A B", "C D"]);
    }

    #[test]
    fn test_nothing_found() {
        assert!(extract_authors("plain text", &[]).is_empty());
    }

    #[test]
    fn test_split_names() {
        assert_eq!(
            split_names("A B; C D and E F y G H, "),
            vec!["A B", "C D", "E F", "G H"]
        );
    }
}
