use thiserror::Error;

/// Top-level error type for the docsift service.
#[derive(Debug, Error)]
pub enum DocsiftError {
    #[error("OCR engine unavailable: {0}")]
    OcrUnavailable(String),

    #[error("OCR failed: {0}")]
    Ocr(String),

    #[error("text extraction failed ({kind}): {message}")]
    Extraction { kind: String, message: String },

    #[error("upload error: {0}")]
    Upload(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
