use std::collections::HashMap;

use serde::Deserialize;
use thiserror::Error;

/// ISO 3166-1 country list with colloquial and Spanish aliases.
const ISO_3166_JSON: &str = include_str!("../data/countries.json");

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("invalid country data: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("country registry is empty")]
    Empty,
}

/// A country with its canonical name and every string that also names it.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct CountryRecord {
    /// Canonical (ISO short) name, e.g. `United States`.
    pub name: String,
    #[serde(default)]
    pub alpha_2: String,
    #[serde(default)]
    pub alpha_3: String,
    #[serde(default)]
    pub official_name: Option<String>,
    #[serde(default)]
    pub common_name: Option<String>,
    /// Colloquial and translated names (`USA`, `UK`, `España`, ...).
    #[serde(default)]
    pub aliases: Vec<String>,
}

impl CountryRecord {
    /// A record with only a canonical name and free-form aliases.
    pub fn named(name: &str, aliases: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            alpha_2: String::new(),
            alpha_3: String::new(),
            official_name: None,
            common_name: None,
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// Every alternative spelling, including ISO codes.
    pub fn all_aliases(&self) -> impl Iterator<Item = &str> {
        [self.alpha_2.as_str(), self.alpha_3.as_str()]
            .into_iter()
            .chain(self.official_name.as_deref())
            .chain(self.common_name.as_deref())
            .chain(self.aliases.iter().map(String::as_str))
            .filter(|a| !a.is_empty())
    }

    /// Names suitable for spotting the country in running text. ISO codes
    /// are left out: most of them collide with ordinary words (`AND`, `CAN`).
    pub fn textual_names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str())
            .chain(self.official_name.as_deref())
            .chain(self.common_name.as_deref())
            .chain(self.aliases.iter().map(String::as_str))
            .filter(|a| !a.is_empty())
    }
}

/// Read-only lookup table from country names and aliases to canonical names.
///
/// Built once at start-up and shared (behind an `Arc`) by every request.
#[derive(Debug, Clone)]
pub struct CountryRegistry {
    records: Vec<CountryRecord>,
    by_name: HashMap<String, usize>,
    by_alias: HashMap<String, usize>,
}

impl CountryRegistry {
    /// The embedded ISO 3166-1 registry.
    pub fn iso3166() -> Result<Self, RegistryError> {
        let records: Vec<CountryRecord> = serde_json::from_str(ISO_3166_JSON)?;
        if records.is_empty() {
            return Err(RegistryError::Empty);
        }
        tracing::debug!(countries = records.len(), "loaded country registry");
        Ok(Self::from_records(records))
    }

    /// Build a registry from arbitrary records. When two records share a
    /// name or alias, the earlier record wins.
    pub fn from_records(records: Vec<CountryRecord>) -> Self {
        let mut by_name = HashMap::new();
        let mut by_alias = HashMap::new();
        for (idx, record) in records.iter().enumerate() {
            by_name.entry(normalize_key(&record.name)).or_insert(idx);
            for alias in record.all_aliases() {
                by_alias.entry(normalize_key(alias)).or_insert(idx);
            }
        }
        Self {
            records,
            by_name,
            by_alias,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[CountryRecord] {
        &self.records
    }

    /// Case-insensitive match against canonical names only.
    pub fn lookup_canonical(&self, name: &str) -> Option<&CountryRecord> {
        self.by_name
            .get(&normalize_key(name))
            .map(|&idx| &self.records[idx])
    }

    /// Case-insensitive match against alias sets only.
    pub fn lookup_alias(&self, name: &str) -> Option<&CountryRecord> {
        self.by_alias
            .get(&normalize_key(name))
            .map(|&idx| &self.records[idx])
    }

    /// Resolve a raw location string to its canonical country name:
    /// canonical names first, then aliases. No partial or fuzzy matching.
    pub fn resolve(&self, name: &str) -> Option<&str> {
        self.lookup_canonical(name)
            .or_else(|| self.lookup_alias(name))
            .map(|r| r.name.as_str())
    }
}

fn normalize_key(s: &str) -> String {
    s.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iso_registry_loads_all_countries() {
        let registry = CountryRegistry::iso3166().unwrap();
        assert_eq!(registry.len(), 249);
    }

    #[test]
    fn resolves_canonical_case_insensitively() {
        let registry = CountryRegistry::iso3166().unwrap();
        assert_eq!(registry.resolve("germany"), Some("Germany"));
        assert_eq!(registry.resolve("FRANCE"), Some("France"));
    }

    #[test]
    fn resolves_aliases_to_canonical() {
        let registry = CountryRegistry::iso3166().unwrap();
        assert_eq!(registry.resolve("USA"), Some("United States"));
        assert_eq!(registry.resolve("usa"), Some("United States"));
        assert_eq!(registry.resolve("UK"), Some("United Kingdom"));
        assert_eq!(registry.resolve("España"), Some("Spain"));
        assert_eq!(registry.resolve("South Korea"), Some("Korea, Republic of"));
        assert_eq!(registry.resolve("Czech Republic"), Some("Czechia"));
    }

    #[test]
    fn unknown_names_do_not_resolve() {
        let registry = CountryRegistry::iso3166().unwrap();
        assert_eq!(registry.resolve("Gondor"), None);
        assert_eq!(registry.resolve("Madrid"), None);
        assert_eq!(registry.resolve("United"), None);
    }

    #[test]
    fn canonical_lookup_ignores_aliases() {
        let registry = CountryRegistry::iso3166().unwrap();
        assert!(registry.lookup_canonical("USA").is_none());
        assert!(registry.lookup_alias("USA").is_some());
    }

    #[test]
    fn synthetic_registry_first_record_wins() {
        let registry = CountryRegistry::from_records(vec![
            CountryRecord::named("Atlantis", &["Sunken"]),
            CountryRecord::named("Lemuria", &["Sunken", "Mu"]),
        ]);
        assert_eq!(registry.resolve("sunken"), Some("Atlantis"));
        assert_eq!(registry.resolve("MU"), Some("Lemuria"));
    }

    #[test]
    fn textual_names_skip_iso_codes() {
        let registry = CountryRegistry::iso3166().unwrap();
        let us = registry.lookup_canonical("United States").unwrap();
        let names: Vec<&str> = us.textual_names().collect();
        assert!(names.contains(&"USA"));
        assert!(!names.contains(&"US"));
        assert!(names.contains(&"United States of America"));
    }
}
