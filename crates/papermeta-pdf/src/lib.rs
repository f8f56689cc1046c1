use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use pdf_extract::OutputError;

use papermeta_core::{BackendError, PdfBackend};

/// pdf-extract based implementation of [`PdfBackend`].
///
/// Pages are extracted individually and concatenated in page order with no
/// separator. The parsed document is owned by the extraction call and
/// dropped before it returns, on success and on every error path.
///
/// pdf-extract panics on some malformed inputs; those panics are caught and
/// reported as [`BackendError::ExtractionError`].
pub struct PdfExtractBackend {
    /// Expand typographic ligatures (ﬁ → fi) so that word-level patterns
    /// match. Default `true`.
    expand_ligatures: bool,
}

impl Default for PdfExtractBackend {
    fn default() -> Self {
        Self {
            expand_ligatures: true,
        }
    }
}

impl PdfExtractBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable ligature expansion.
    pub fn with_ligature_expansion(mut self, enabled: bool) -> Self {
        self.expand_ligatures = enabled;
        self
    }
}

impl PdfBackend for PdfExtractBackend {
    fn extract_text(&self, path: &Path) -> Result<String, BackendError> {
        if !path.is_file() {
            return Err(BackendError::OpenError(format!(
                "file not found: {}",
                path.display()
            )));
        }

        let pages = panic::catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_by_pages(path)
        }))
        .map_err(|payload| BackendError::ExtractionError(panic_message(payload.as_ref())))?
        .map_err(map_output_error)?;

        tracing::debug!(path = %path.display(), pages = pages.len(), "extracted page text");

        let text = pages.concat();
        if self.expand_ligatures {
            Ok(expand_ligatures(&text))
        } else {
            Ok(text)
        }
    }
}

fn map_output_error(err: OutputError) -> BackendError {
    match err {
        OutputError::PdfError(e) => BackendError::OpenError(e.to_string()),
        OutputError::IoError(e) => BackendError::Io(e),
        OutputError::FormatError(e) => BackendError::ExtractionError(e.to_string()),
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("PDF parser panicked: {}", s)
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("PDF parser panicked: {}", s)
    } else {
        "PDF parser panicked".to_string()
    }
}

/// Expand common typographic ligatures found in PDFs.
pub fn expand_ligatures(text: &str) -> String {
    text.replace('\u{FB00}', "ff")
        .replace('\u{FB01}', "fi")
        .replace('\u{FB02}', "fl")
        .replace('\u{FB03}', "ffi")
        .replace('\u{FB04}', "ffl")
        .replace(['\u{FB05}', '\u{FB06}'], "st")
}
