use axum::body::Bytes;
use axum::extract::Multipart;
use thiserror::Error;

/// Name of the multipart field carrying the document.
pub const PDF_FIELD: &str = "pdf";

/// An uploaded PDF with its original filename.
pub struct UploadedPdf {
    pub filename: String,
    pub data: Bytes,
}

/// Client-side upload problems; all map to 400.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("No PDF file uploaded")]
    Missing,
    #[error("Invalid file type")]
    InvalidType,
    #[error("Failed to read upload: {0}")]
    Malformed(String),
}

/// Read the first `pdf` file part from a multipart upload.
///
/// A `pdf` part without a filename is a plain form value, not a file, and
/// is skipped like any other field. The filename is checked before the
/// field body is read, so a file with the wrong extension is rejected
/// without being buffered.
pub async fn read_pdf_field(mut multipart: Multipart) -> Result<UploadedPdf, UploadError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| UploadError::Malformed(e.body_text()))?
    {
        let filename = if field.name() == Some(PDF_FIELD) {
            field.file_name().map(str::to_string)
        } else {
            None
        };
        let Some(filename) = filename else {
            // Ignore unknown fields and plain form values
            let _ = field.bytes().await;
            continue;
        };
        if !has_pdf_extension(&filename) {
            return Err(UploadError::InvalidType);
        }

        let data = field
            .bytes()
            .await
            .map_err(|e| UploadError::Malformed(e.body_text()))?;
        return Ok(UploadedPdf { filename, data });
    }

    Err(UploadError::Missing)
}

/// Case-insensitive `.pdf` suffix check.
pub fn has_pdf_extension(filename: &str) -> bool {
    filename.to_lowercase().ends_with(".pdf")
}
