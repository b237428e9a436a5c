//! Image readability check.
//!
//! Grades an image upload by the OCR engine's mean word confidence and by how
//! much alphanumeric text it yields, so callers can ask the user for a better
//! scan instead of trusting a classification made from noise.

use docsift_core::{round2, DocsiftError, QualityReason, ReadabilityReport};
use std::path::Path;
use tracing::warn;

use crate::ocr::OcrEngine;

/// Below this normalised mean confidence the image is rejected.
pub const MIN_OCR_CONFIDENCE: f64 = 0.45;

/// Below this many alphanumeric characters the image is rejected.
pub const MIN_TEXT_LENGTH: usize = 25;

/// Grade a measured confidence / text length pair.
pub fn assess(ocr_confidence: f64, text_length: usize) -> ReadabilityReport {
    let (readable, quality_reason) = if ocr_confidence < MIN_OCR_CONFIDENCE {
        (false, QualityReason::LowOcrConfidence)
    } else if text_length < MIN_TEXT_LENGTH {
        (false, QualityReason::TooLittleText)
    } else {
        (true, QualityReason::Ok)
    };

    ReadabilityReport {
        readable,
        ocr_confidence: Some(ocr_confidence),
        text_length: Some(text_length),
        quality_reason,
    }
}

/// Run OCR on `image` and grade it. Never fails: OCR errors produce
/// [`ReadabilityReport::processing_error`].
pub async fn check_image_readability(engine: &dyn OcrEngine, image: &Path) -> ReadabilityReport {
    measure(engine, image).await.0
}

/// Like [`check_image_readability`], also handing back the recognised text
/// when OCR succeeded so it doesn't have to be recognised twice.
pub async fn measure(engine: &dyn OcrEngine, image: &Path) -> (ReadabilityReport, Option<String>) {
    match try_measure(engine, image).await {
        Ok((report, text)) => (report, Some(text)),
        Err(e) => {
            warn!(image = %image.display(), error = %e, "Readability check failed");
            (ReadabilityReport::processing_error(), None)
        }
    }
}

async fn try_measure(
    engine: &dyn OcrEngine,
    image: &Path,
) -> Result<(ReadabilityReport, String), DocsiftError> {
    let words = engine.image_to_data(image).await?;
    let confidences: Vec<f64> = words
        .iter()
        .filter_map(|w| w.conf)
        .filter(|c| *c >= 0.0)
        .collect();

    let mean = if confidences.is_empty() {
        0.0
    } else {
        confidences.iter().sum::<f64>() / confidences.len() as f64
    };

    let text = engine.image_to_string(image).await?;
    let text_length = text.chars().filter(|c| c.is_alphanumeric()).count();

    Ok((assess(round2(mean / 100.0), text_length), text))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::ocr::OcrWord;
    use async_trait::async_trait;

    /// Canned OCR results.
    pub(crate) struct StubOcr {
        pub text: Result<String, String>,
        pub confs: Vec<f64>,
    }

    impl StubOcr {
        pub(crate) fn new(text: &str, confs: &[f64]) -> Self {
            Self {
                text: Ok(text.to_string()),
                confs: confs.to_vec(),
            }
        }

        pub(crate) fn failing() -> Self {
            Self {
                text: Err("cannot identify image file".into()),
                confs: vec![],
            }
        }
    }

    #[async_trait]
    impl OcrEngine for StubOcr {
        async fn image_to_string(&self, _image: &Path) -> Result<String, DocsiftError> {
            self.text.clone().map_err(DocsiftError::Ocr)
        }

        async fn image_to_data(&self, _image: &Path) -> Result<Vec<OcrWord>, DocsiftError> {
            self.text.as_ref().map_err(|e| DocsiftError::Ocr(e.clone()))?;
            Ok(self
                .confs
                .iter()
                .map(|c| OcrWord {
                    level: if *c < 0.0 { 1 } else { 5 },
                    conf: Some(*c),
                    text: String::new(),
                })
                .collect())
        }
    }

    #[test]
    fn thresholds() {
        assert_eq!(assess(0.44, 100).quality_reason, QualityReason::LowOcrConfidence);
        assert_eq!(assess(0.45, 24).quality_reason, QualityReason::TooLittleText);
        let ok = assess(0.45, 25);
        assert!(ok.readable);
        assert_eq!(ok.quality_reason, QualityReason::Ok);
    }

    #[test]
    fn low_confidence_wins_over_short_text() {
        let report = assess(0.1, 0);
        assert!(!report.readable);
        assert_eq!(report.quality_reason, QualityReason::LowOcrConfidence);
    }

    #[tokio::test]
    async fn averages_non_negative_confidences() {
        let ocr = StubOcr::new("Certificate of Live Birth, Republic of the Philippines", &[-1.0, 90.0, 80.0]);
        let report = check_image_readability(&ocr, Path::new("scan.png")).await;
        assert_eq!(report.ocr_confidence, Some(0.85));
        assert_eq!(report.text_length, Some(46));
        assert!(report.readable);
    }

    #[tokio::test]
    async fn tied_confidence_rounds_half_to_even() {
        let ocr = StubOcr::new("Home Development Mutual Fund membership record", &[60.0, 65.0]);
        let report = check_image_readability(&ocr, Path::new("scan.jpg")).await;
        assert_eq!(report.ocr_confidence, Some(0.62));
        assert!(report.readable);
    }

    #[tokio::test]
    async fn no_words_means_zero_confidence() {
        let ocr = StubOcr::new("", &[-1.0]);
        let report = check_image_readability(&ocr, Path::new("blank.png")).await;
        assert_eq!(report.ocr_confidence, Some(0.0));
        assert_eq!(report.quality_reason, QualityReason::LowOcrConfidence);
    }

    #[tokio::test]
    async fn ocr_failure_is_processing_error() {
        let report = check_image_readability(&StubOcr::failing(), Path::new("bad.png")).await;
        assert_eq!(report, ReadabilityReport::processing_error());
    }
}
