//! Telemetry and structured logging components for docsift.
//!
//! Handles log redaction, console/JSON output, daily file rotation, and
//! classification audit events.

pub mod event_logger;
pub mod logger;
pub mod redact;

pub use event_logger::{ClassificationEvent, EventLogEntry, EventLogger};
pub use logger::init_logger;
pub use redact::{redact_sensitive_data, redacted_preview};
