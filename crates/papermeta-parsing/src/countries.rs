use std::collections::BTreeSet;

use papermeta_core::{CountryRegistry, EntityLabel, EntitySpan};

/// Canonical names of the countries mentioned as GPE entities.
///
/// Each GPE span is resolved against `registry` (canonical names, then
/// aliases, both case-insensitive). Unresolvable spans such as cities are
/// dropped. The result is de-duplicated and sorted; empty when nothing
/// resolves.
pub fn extract_countries(entities: &[EntitySpan], registry: &CountryRegistry) -> Vec<String> {
    let found: BTreeSet<&str> = entities
        .iter()
        .filter(|e| e.label == EntityLabel::Gpe)
        .filter_map(|e| registry.resolve(&e.text))
        .collect();

    found.into_iter().map(String::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use papermeta_core::CountryRecord;

    fn gpe(text: &str) -> EntitySpan {
        EntitySpan::new(text, EntityLabel::Gpe, 0, text.len())
    }

    fn registry() -> CountryRegistry {
        CountryRegistry::from_records(vec![
            CountryRecord::named("United States", &["USA", "U.S."]),
            CountryRecord::named("Spain", &["España"]),
            CountryRecord::named("Argentina", &[]),
        ])
    }

    #[test]
    fn test_resolves_aliases_and_sorts() {
        let entities = vec![gpe("USA"), gpe("españa"), gpe("United States"), gpe("Argentina")];
        assert_eq!(
            extract_countries(&entities, &registry()),
            vec!["Argentina", "Spain", "United States"]
        );
    }

    #[test]
    fn test_unknown_places_dropped() {
        let entities = vec![gpe("Madrid"), gpe("Gondor")];
        assert!(extract_countries(&entities, &registry()).is_empty());
    }

    #[test]
    fn test_only_gpe_entities_count() {
        let entities = vec![EntitySpan::new("Spain", EntityLabel::Person, 0, 5)];
        assert!(extract_countries(&entities, &registry()).is_empty());
    }

    #[test]
    fn test_no_partial_matching() {
        let entities = vec![gpe("United"), gpe("States of America")];
        assert!(extract_countries(&entities, &registry()).is_empty());
    }
}
