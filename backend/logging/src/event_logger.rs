//! Classification Event Logger
//!
//! Structured audit events (classified or rejected uploads) written
//! through `tracing` under the `classify_events` target, so the JSON file
//! layer yields one NDJSON line per event.

use chrono::{DateTime, Utc};
use docsift_core::{ClassifyResponse, DocumentType, QualityReason};
use serde::Serialize;
use tracing::info;

use crate::redact::redact_sensitive_data;

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClassificationEvent {
    Classified {
        filename: String,
        document_type: DocumentType,
        confidence: f64,
        readable: bool,
        quality_reason: QualityReason,
    },
    Rejected {
        reason: String,
    },
}

impl ClassificationEvent {
    pub fn classified(filename: &str, response: &ClassifyResponse) -> Self {
        Self::Classified {
            filename: filename.to_string(),
            document_type: response.document_type,
            confidence: response.confidence,
            readable: response.readability.readable,
            quality_reason: response.readability.quality_reason,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EventLogEntry {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
    pub event: ClassificationEvent,
}

pub struct EventLogger;

impl EventLogger {
    /// Redacts free-text fields and emits the event.
    pub fn log_event(request_id: &str, mut event: ClassificationEvent) {
        match &mut event {
            ClassificationEvent::Classified { filename, .. } => {
                *filename = redact_sensitive_data(filename);
            }
            ClassificationEvent::Rejected { reason } => {
                *reason = redact_sensitive_data(reason);
            }
        }

        let entry = EventLogEntry {
            request_id: request_id.into(),
            timestamp: Utc::now(),
            event,
        };

        match serde_json::to_string(&entry) {
            Ok(json) => info!(target: "classify_events", event = %json, "Classification event"),
            Err(_) => info!(target: "classify_events", event = ?entry, "Classification event"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docsift_core::{Classification, ReadabilityReport};

    #[test]
    fn classified_event_serializes_tagged() {
        let response = ClassifyResponse::new(
            Classification {
                document_type: DocumentType::Resume,
                confidence: 0.8,
            },
            ReadabilityReport::not_image(),
        );
        let event = ClassificationEvent::classified("cv.pdf", &response);
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["type"], "classified");
        assert_eq!(value["document_type"], "resume");
        assert_eq!(value["quality_reason"], "not_image");
    }

    #[test]
    fn log_event_does_not_panic_without_subscriber() {
        EventLogger::log_event(
            "req-1",
            ClassificationEvent::Rejected {
                reason: "No file".into(),
            },
        );
    }
}
