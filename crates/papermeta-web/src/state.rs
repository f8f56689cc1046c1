use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;

use papermeta_core::config_file::ExtractionConfig;
use papermeta_core::{CountryRegistry, EntityRecognizer, PdfBackend};
use papermeta_ner::GazetteerRecognizer;
use papermeta_parsing::{MetadataExtractor, ParsingConfigBuilder};
use papermeta_pdf::PdfExtractBackend;

use crate::config::ServerSettings;

/// Shared application state accessible from all handlers.
///
/// Everything here is built once at start-up and only read by requests.
pub struct AppState {
    pub backend: Arc<dyn PdfBackend>,
    pub recognizer: Arc<dyn EntityRecognizer>,
    pub registry: Arc<CountryRegistry>,
    pub extractor: Arc<MetadataExtractor>,
    pub upload_dir: PathBuf,
    pub max_upload_bytes: usize,
}

impl AppState {
    /// Build the production state: pdf-extract backend, the ISO 3166-1
    /// registry and a gazetteer recognizer over it. Creates the upload
    /// directory if it does not exist.
    pub fn build(settings: &ServerSettings, extraction: &ExtractionConfig) -> anyhow::Result<Self> {
        let registry = CountryRegistry::iso3166().context("failed to load country registry")?;
        let recognizer =
            GazetteerRecognizer::new(&registry).context("failed to build entity recognizer")?;
        let parsing = ParsingConfigBuilder::from_extraction_config(extraction)
            .build()
            .context("invalid [extraction] settings")?;
        let backend = PdfExtractBackend::new()
            .with_ligature_expansion(extraction.expand_ligatures.unwrap_or(true));

        std::fs::create_dir_all(&settings.upload_dir).with_context(|| {
            format!(
                "failed to create upload directory {}",
                settings.upload_dir.display()
            )
        })?;

        tracing::info!(
            countries = registry.len(),
            places = recognizer.place_count(),
            upload_dir = %settings.upload_dir.display(),
            "application state ready"
        );

        Ok(Self {
            backend: Arc::new(backend),
            recognizer: Arc::new(recognizer),
            registry: Arc::new(registry),
            extractor: Arc::new(MetadataExtractor::with_config(parsing)),
            upload_dir: settings.upload_dir.clone(),
            max_upload_bytes: settings.max_upload_bytes(),
        })
    }
}
