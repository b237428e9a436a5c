use serde::{Deserialize, Serialize};

use crate::types::DocumentType;

/// Round to two decimal places, the precision every score is reported at.
///
/// Exact ties round half to even on the stored binary value, so `0.625`
/// becomes `0.62` while `0.675` (stored just above the tie) becomes `0.68`.
pub fn round2(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}

/// Why an image was (or was not) considered readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityReason {
    Ok,
    LowOcrConfidence,
    TooLittleText,
    OcrProcessingError,
    NotImage,
}

/// OCR quality verdict attached to every classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadabilityReport {
    pub readable: bool,
    /// Mean word confidence in `0.0..=1.0`; `None` for non-image uploads.
    pub ocr_confidence: Option<f64>,
    /// Alphanumeric characters recognised; `None` for non-image uploads.
    pub text_length: Option<usize>,
    pub quality_reason: QualityReason,
}

impl ReadabilityReport {
    /// Report used for uploads that never go through OCR.
    pub fn not_image() -> Self {
        Self {
            readable: true,
            ocr_confidence: None,
            text_length: None,
            quality_reason: QualityReason::NotImage,
        }
    }

    /// Report used when the OCR engine could not process the image.
    pub fn processing_error() -> Self {
        Self {
            readable: false,
            ocr_confidence: Some(0.0),
            text_length: Some(0),
            quality_reason: QualityReason::OcrProcessingError,
        }
    }
}

/// Outcome of keyword scoring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub document_type: DocumentType,
    pub confidence: f64,
}

/// JSON body returned by `POST /classify`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifyResponse {
    pub document_type: DocumentType,
    pub confidence: f64,
    #[serde(flatten)]
    pub readability: ReadabilityReport,
}

impl ClassifyResponse {
    pub fn new(classification: Classification, readability: ReadabilityReport) -> Self {
        Self {
            document_type: classification.document_type,
            confidence: round2(classification.confidence),
            readability,
        }
    }
}
