//! Upload validation and loading
//!
//! Mirrors what the backend enforces: PDF documents only, at most 16 MiB.

use std::path::Path;

const MAX_SIZE_BYTES: u64 = 16 * 1024 * 1024;

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("Please upload a PDF file only.")]
    NotAPdf,

    #[error("File size ({0:.1}MB) exceeds the maximum limit of 16MB.")]
    TooLarge(f64),

    #[error("Failed to read document: {0}")]
    Io(#[from] std::io::Error),
}

/// A document accepted for analysis.
#[derive(Debug, Clone)]
pub struct DocumentUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Validate an upload candidate before any bytes leave the machine.
pub fn validate_upload(file_name: &str, len: u64) -> Result<(), UploadError> {
    let is_pdf = Path::new(file_name)
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false);

    if !is_pdf {
        return Err(UploadError::NotAPdf);
    }

    if len > MAX_SIZE_BYTES {
        let size_mb = len as f64 / (1024.0 * 1024.0);
        return Err(UploadError::TooLarge(size_mb));
    }

    Ok(())
}

impl DocumentUpload {
    /// Read and validate a document from disk.
    pub fn from_path(path: &Path) -> Result<Self, UploadError> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let metadata = std::fs::metadata(path)?;
        validate_upload(&file_name, metadata.len())?;

        let bytes = std::fs::read(path)?;
        tracing::debug!(file = %file_name, size = bytes.len(), "Loaded document for analysis");

        Ok(Self { file_name, bytes })
    }
}
