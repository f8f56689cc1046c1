use regex::Regex;

use papermeta_core::config_file::ExtractionConfig;

use crate::ParsingError;

/// Controls how a list of patterns/values is overridden from its defaults.
#[derive(Debug, Clone, Default)]
pub enum ListOverride<T> {
    /// Use the built-in defaults.
    #[default]
    Default,
    /// Completely replace the defaults with these values.
    Replace(Vec<T>),
    /// Append these values to the defaults.
    Extend(Vec<T>),
}

impl<T: Clone> ListOverride<T> {
    /// Resolve this override against the given defaults.
    pub fn resolve(&self, defaults: &[T]) -> Vec<T> {
        match self {
            ListOverride::Default => defaults.to_vec(),
            ListOverride::Replace(v) => v.clone(),
            ListOverride::Extend(v) => {
                let mut result = defaults.to_vec();
                result.extend(v.iter().cloned());
                result
            }
        }
    }
}

/// Tunable thresholds and pattern lists for the field extractors.
///
/// The defaults reproduce the documented behavior of every extractor. Use
/// [`ParsingConfigBuilder`] to construct a customized config.
#[derive(Debug, Clone)]
pub struct ParsingConfig {
    // ── title.rs ──
    /// Non-blank lines scanned by the title pattern families (default: 15).
    pub(crate) title_scan_lines: usize,
    /// Non-blank lines considered by the longest-line fallback (default: 10).
    pub(crate) title_fallback_lines: usize,

    // ── authors.rs ──
    /// Maximum PERSON entities used when no byline pattern matches (default: 6).
    pub(crate) max_ner_authors: usize,

    // ── venue.rs ──
    /// Venue patterns; capture group 1 is the venue name.
    pub(crate) venue_patterns: ListOverride<Regex>,
}

impl Default for ParsingConfig {
    fn default() -> Self {
        Self {
            title_scan_lines: 15,
            title_fallback_lines: 10,
            max_ner_authors: 6,
            venue_patterns: ListOverride::Default,
        }
    }
}

impl ParsingConfig {
    pub fn title_scan_lines(&self) -> usize {
        self.title_scan_lines
    }

    pub fn title_fallback_lines(&self) -> usize {
        self.title_fallback_lines
    }

    pub fn max_ner_authors(&self) -> usize {
        self.max_ner_authors
    }
}

/// Builder for [`ParsingConfig`].
///
/// Accepts string patterns that are compiled to `Regex` in [`build()`](Self::build).
#[derive(Debug, Clone, Default)]
pub struct ParsingConfigBuilder {
    title_scan_lines: Option<usize>,
    title_fallback_lines: Option<usize>,
    max_ner_authors: Option<usize>,
    venue_patterns: ListOverrideBuilder,
}

/// Helper for building `ListOverride<Regex>` from string patterns.
#[derive(Debug, Clone, Default)]
enum ListOverrideBuilder {
    #[default]
    Default,
    Replace(Vec<String>),
    Extend(Vec<String>),
}

impl ParsingConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a builder from the `[extraction]` table of a config file.
    pub fn from_extraction_config(config: &ExtractionConfig) -> Self {
        Self {
            title_scan_lines: config.title_scan_lines,
            title_fallback_lines: config.title_fallback_lines,
            max_ner_authors: config.max_ner_authors,
            venue_patterns: ListOverrideBuilder::Default,
        }
    }

    pub fn title_scan_lines(mut self, n: usize) -> Self {
        self.title_scan_lines = Some(n);
        self
    }

    pub fn title_fallback_lines(mut self, n: usize) -> Self {
        self.title_fallback_lines = Some(n);
        self
    }

    pub fn max_ner_authors(mut self, n: usize) -> Self {
        self.max_ner_authors = Some(n);
        self
    }

    // ── Venue patterns ──

    pub fn set_venue_patterns(mut self, patterns: Vec<String>) -> Self {
        self.venue_patterns = ListOverrideBuilder::Replace(patterns);
        self
    }

    pub fn add_venue_pattern(mut self, pattern: String) -> Self {
        match &mut self.venue_patterns {
            ListOverrideBuilder::Extend(v) => v.push(pattern),
            _ => self.venue_patterns = ListOverrideBuilder::Extend(vec![pattern]),
        }
        self
    }

    /// Validate thresholds, compile patterns and produce a [`ParsingConfig`].
    pub fn build(self) -> Result<ParsingConfig, ParsingError> {
        let defaults = ParsingConfig::default();

        let positive = |name: &str, value: Option<usize>, default: usize| match value {
            Some(0) => Err(ParsingError::InvalidConfig(format!(
                "{} must be greater than zero",
                name
            ))),
            Some(v) => Ok(v),
            None => Ok(default),
        };

        let compile_all = |patterns: Vec<String>| -> Result<Vec<Regex>, ParsingError> {
            patterns
                .iter()
                .map(|p| {
                    let re = Regex::new(p)?;
                    if re.captures_len() < 2 {
                        return Err(ParsingError::InvalidConfig(format!(
                            "venue pattern `{}` has no capture group",
                            p
                        )));
                    }
                    Ok(re)
                })
                .collect()
        };

        let venue_patterns = match self.venue_patterns {
            ListOverrideBuilder::Default => ListOverride::Default,
            ListOverrideBuilder::Replace(p) => ListOverride::Replace(compile_all(p)?),
            ListOverrideBuilder::Extend(p) => ListOverride::Extend(compile_all(p)?),
        };

        Ok(ParsingConfig {
            title_scan_lines: positive(
                "title_scan_lines",
                self.title_scan_lines,
                defaults.title_scan_lines,
            )?,
            title_fallback_lines: positive(
                "title_fallback_lines",
                self.title_fallback_lines,
                defaults.title_fallback_lines,
            )?,
            max_ner_authors: positive(
                "max_ner_authors",
                self.max_ner_authors,
                defaults.max_ner_authors,
            )?,
            venue_patterns,
        })
    }
}
