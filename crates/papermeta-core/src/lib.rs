use serde::Serialize;

pub mod backend;
pub mod config_file;
pub mod countries;
pub mod ner;

// Re-export for convenience
pub use backend::{BackendError, PdfBackend};
pub use countries::{CountryRecord, CountryRegistry, RegistryError};
pub use ner::{EntityLabel, EntityRecognizer, EntitySpan};

pub const TITLE_NOT_FOUND: &str = "Título no encontrado";
pub const AUTHORS_NOT_FOUND: &str = "Autores no encontrados";
pub const YEAR_NOT_FOUND: &str = "Year not found";
pub const COUNTRIES_NOT_FOUND: &str = "No countries found";
pub const PUBLICATION_NOT_FOUND: &str = "Publicación no encontrada";
pub const URL_DOI_NOT_FOUND: &str = "URL/DOI no encontrado";
pub const ABSTRACT_NOT_FOUND: &str = "Abstract/Resumen no encontrado";

/// Bibliographic metadata extracted from a single document.
///
/// Every field is always populated: when an extractor has no confident
/// result it stores the matching `*_NOT_FOUND` sentinel instead. `authors`
/// and `countries` always hold at least one element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetadataRecord {
    pub title: String,
    pub authors: Vec<String>,
    pub year: String,
    pub countries: Vec<String>,
    pub publication_name: String,
    pub url_doi: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
}

impl MetadataRecord {
    /// A record where every field holds its sentinel.
    pub fn not_found() -> Self {
        Self {
            title: TITLE_NOT_FOUND.to_string(),
            authors: vec![AUTHORS_NOT_FOUND.to_string()],
            year: YEAR_NOT_FOUND.to_string(),
            countries: vec![COUNTRIES_NOT_FOUND.to_string()],
            publication_name: PUBLICATION_NOT_FOUND.to_string(),
            url_doi: URL_DOI_NOT_FOUND.to_string(),
            abstract_text: ABSTRACT_NOT_FOUND.to_string(),
        }
    }
}
