use std::path::Path;

use thiserror::Error;

pub mod abstract_text;
pub mod authors;
pub mod cascade;
pub mod config;
pub mod countries;
pub mod extractor;
pub mod identifiers;
pub mod text_processing;
pub mod title;
pub mod venue;
pub mod year;

pub use config::{ListOverride, ParsingConfig, ParsingConfigBuilder};
pub use extractor::MetadataExtractor;
// Re-export domain types from core (canonical definitions live there)
pub use papermeta_core::{
    BackendError, CountryRegistry, EntityRecognizer, EntitySpan, MetadataRecord, PdfBackend,
};

#[derive(Error, Debug)]
pub enum ParsingError {
    #[error("backend error: {0}")]
    Backend(#[from] BackendError),
    #[error("invalid parsing config: {0}")]
    InvalidConfig(String),
    #[error("invalid pattern: {0}")]
    Regex(#[from] regex::Error),
}

/// Extract bibliographic metadata from a PDF file.
///
/// Pipeline:
/// 1. Extract text from the PDF via `backend`
/// 2. Recognize entities once via `recognizer`
/// 3. Run the title, author, year, country, venue, URL/DOI and abstract
///    extractors, substituting sentinels for missing fields
pub fn extract_metadata(
    pdf_path: &Path,
    backend: &dyn PdfBackend,
    recognizer: &dyn EntityRecognizer,
    registry: &CountryRegistry,
) -> Result<MetadataRecord, ParsingError> {
    MetadataExtractor::new().extract_metadata(pdf_path, backend, recognizer, registry)
}
