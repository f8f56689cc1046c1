use std::io::Write;
use std::sync::Arc;
use std::time::Instant;

use axum::Json;
use axum::body::Bytes;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};

use papermeta_core::MetadataRecord;

use crate::models::ApiError;
use crate::state::AppState;
use crate::upload::{self, UploadError};

/// `POST /analyze`: extract metadata from one uploaded PDF.
///
/// A request that is not `multipart/form-data` carries no file, so it is
/// answered like a form without a `pdf` part.
pub async fn analyze(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<MetadataRecord>, ApiError> {
    let multipart = multipart.map_err(|rejection| {
        tracing::info!(error = %rejection.body_text(), "request is not a multipart upload");
        UploadError::Missing
    })?;

    let upload = upload::read_pdf_field(multipart).await.inspect_err(|e| {
        tracing::info!(error = %e, "rejected upload");
    })?;

    let filename = upload.filename;
    let bytes = upload.data.len();
    let started = Instant::now();

    // PDF parsing is CPU-bound and synchronous
    let task_state = Arc::clone(&state);
    let record = tokio::task::spawn_blocking(move || process_upload(&task_state, upload.data))
        .await
        .map_err(|e| ApiError::Extraction(format!("extraction task failed: {}", e)))?
        .inspect_err(|e| {
            tracing::info!(filename = %filename, error = %e.message(), "extraction failed");
        })?;

    tracing::info!(
        filename = %filename,
        bytes,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "analyzed document"
    );
    Ok(Json(record))
}

/// Write the upload to a uniquely named temp file in the upload directory,
/// run the pipeline on it and remove the file.
///
/// The temp file is removed on every path: explicitly after extraction, or
/// by its destructor when this function returns early or unwinds.
fn process_upload(state: &AppState, data: Bytes) -> Result<MetadataRecord, ApiError> {
    let mut temp = tempfile::Builder::new()
        .prefix("upload-")
        .suffix(".pdf")
        .tempfile_in(&state.upload_dir)
        .map_err(|e| ApiError::Extraction(format!("failed to create temp file: {}", e)))?;
    temp.write_all(&data)
        .and_then(|_| temp.flush())
        .map_err(|e| ApiError::Extraction(format!("failed to write temp file: {}", e)))?;

    let result = state
        .extractor
        .extract_metadata(
            temp.path(),
            state.backend.as_ref(),
            state.recognizer.as_ref(),
            &state.registry,
        )
        .map_err(|e| ApiError::Extraction(e.to_string()));

    let path = temp.path().to_path_buf();
    if let Err(e) = temp.close() {
        tracing::warn!(path = %path.display(), error = %e, "failed to remove temp file");
    }

    result
}
