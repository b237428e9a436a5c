//! Classification pipeline: readability check, text extraction and keyword
//! scoring for one staged upload.

use docsift_core::{Classification, ClassifyResponse, DocumentType, FileKind, ReadabilityReport};
use docsift_logging::redacted_preview;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::classifier::KeywordClassifier;
use crate::doc_parse::extract_text;
use crate::ocr::OcrEngine;
use crate::readability;

/// Confidence reported when the upload yielded no text.
pub const EMPTY_TEXT_CONFIDENCE: f64 = 0.50;

const PREVIEW_CHARS: usize = 120;

#[derive(Clone)]
pub struct DocumentClassifier {
    engine: Arc<dyn OcrEngine>,
    classifier: KeywordClassifier,
}

impl DocumentClassifier {
    pub fn new(engine: Arc<dyn OcrEngine>, classifier: KeywordClassifier) -> Self {
        Self { engine, classifier }
    }

    /// Classify the file at `path`, treating it as having `extension`
    /// (lowercased, with the dot).
    ///
    /// Image uploads get a readability verdict; everything else reports
    /// `not_image`. Extraction problems never surface as errors: they leave
    /// the text empty, which classifies as `others`.
    #[instrument(skip(self, path), fields(path = %path.display()))]
    pub async fn classify_path(&self, path: &Path, extension: &str) -> ClassifyResponse {
        let kind = FileKind::from_extension(extension);

        let (readability, ocr_text) = if kind.is_image() {
            readability::measure(self.engine.as_ref(), path).await
        } else {
            (ReadabilityReport::not_image(), None)
        };

        let text = match ocr_text {
            Some(text) => text.to_lowercase(),
            None => extract_text(self.engine.as_ref(), path, kind).await,
        };

        let classification = if text.trim().is_empty() {
            Classification {
                document_type: DocumentType::Others,
                confidence: EMPTY_TEXT_CONFIDENCE,
            }
        } else {
            debug!(%kind, chars = text.len(), preview = %redacted_preview(&text, PREVIEW_CHARS), "Extracted text");
            self.classifier.classify(&text)
        };

        ClassifyResponse::new(classification, readability)
    }
}
