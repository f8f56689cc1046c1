use std::path::Path;

use papermeta_core::{
    ABSTRACT_NOT_FOUND, AUTHORS_NOT_FOUND, COUNTRIES_NOT_FOUND, CountryRegistry,
    EntityRecognizer, MetadataRecord, PUBLICATION_NOT_FOUND, PdfBackend, TITLE_NOT_FOUND,
    URL_DOI_NOT_FOUND, YEAR_NOT_FOUND,
};

use crate::config::ParsingConfig;
use crate::{ParsingError, abstract_text, authors, countries, identifiers, title, venue, year};

/// A configurable metadata extraction pipeline.
///
/// Holds a [`ParsingConfig`] and exposes each pipeline step as a method.
/// The default constructor uses built-in defaults; use
/// [`MetadataExtractor::with_config`] to supply custom thresholds and venue
/// patterns.
pub struct MetadataExtractor {
    config: ParsingConfig,
}

impl Default for MetadataExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl MetadataExtractor {
    /// Create an extractor with default configuration.
    pub fn new() -> Self {
        Self {
            config: ParsingConfig::default(),
        }
    }

    /// Create an extractor with a custom configuration.
    pub fn with_config(config: ParsingConfig) -> Self {
        Self { config }
    }

    /// Get a reference to the current config.
    pub fn config(&self) -> &ParsingConfig {
        &self.config
    }

    /// Extract raw text from a PDF file (step 1).
    pub fn extract_text(&self, path: &Path, backend: &dyn PdfBackend) -> Result<String, ParsingError> {
        Ok(backend.extract_text(path)?)
    }

    /// Run every field extractor over already-extracted text (steps 2-3).
    ///
    /// Entity recognition runs exactly once; its spans feed both the
    /// country extractor and the author fallback. Never fails: fields with
    /// no result hold their sentinel.
    pub fn extract_from_text(
        &self,
        text: &str,
        recognizer: &dyn EntityRecognizer,
        registry: &CountryRegistry,
    ) -> MetadataRecord {
        let entities = recognizer.recognize(text);
        tracing::debug!(chars = text.len(), entities = entities.len(), "recognized entities");

        let title = title::extract_title_with_config(text, &self.config)
            .unwrap_or_else(|| TITLE_NOT_FOUND.to_string());

        let mut authors = authors::extract_authors_with_config(text, &entities, &self.config);
        if authors.is_empty() {
            authors.push(AUTHORS_NOT_FOUND.to_string());
        }

        let year = year::extract_year(text).unwrap_or_else(|| YEAR_NOT_FOUND.to_string());

        let mut countries = countries::extract_countries(&entities, registry);
        if countries.is_empty() {
            countries.push(COUNTRIES_NOT_FOUND.to_string());
        }

        let publication_name = venue::extract_venue_with_config(text, &self.config)
            .unwrap_or_else(|| PUBLICATION_NOT_FOUND.to_string());

        let url_doi =
            identifiers::extract_url_doi(text).unwrap_or_else(|| URL_DOI_NOT_FOUND.to_string());

        let abstract_text = abstract_text::extract_abstract(text)
            .unwrap_or_else(|| ABSTRACT_NOT_FOUND.to_string());

        MetadataRecord {
            title,
            authors,
            year,
            countries,
            publication_name,
            url_doi,
            abstract_text,
        }
    }

    /// Run the full pipeline on a PDF file.
    pub fn extract_metadata(
        &self,
        path: &Path,
        backend: &dyn PdfBackend,
        recognizer: &dyn EntityRecognizer,
        registry: &CountryRegistry,
    ) -> Result<MetadataRecord, ParsingError> {
        let text = self.extract_text(path, backend)?;
        tracing::debug!(path = %path.display(), chars = text.len(), "extracted document text");
        Ok(self.extract_from_text(&text, recognizer, registry))
    }
}
