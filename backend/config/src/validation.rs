//! Config validation: checks with user-friendly error messages.

use crate::schema::DocsiftConfig;
use thiserror::Error;

/// A config validation error with field path and message.
#[derive(Debug, Error)]
#[error("Config validation error at '{path}': {message}")]
pub struct ConfigValidationError {
    pub path: String,
    pub message: String,
}

/// A collection of validation errors found in one pass.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }
}

/// Validate the config and return a report of all errors and warnings.
pub fn validate(config: &DocsiftConfig) -> ValidationReport {
    let mut report = ValidationReport::default();
    validate_server(config, &mut report);
    validate_ocr(config, &mut report);
    validate_classifier(config, &mut report);
    report
}

fn validate_server(config: &DocsiftConfig, report: &mut ValidationReport) {
    let server = &config.server;
    if server.port == 0 {
        report.error("server.port", "port must be between 1 and 65535");
    } else if server.port < 1024 && server.port != 80 && server.port != 443 {
        report.warn(
            "server.port",
            format!("Port {} requires elevated privileges; consider using a port >= 1024", server.port),
        );
    }
    if server.bind_address.trim().is_empty() {
        report.error("server.bindAddress", "bind address cannot be empty");
    }
    if server.allowed_origins.is_empty() {
        report.warn(
            "server.allowedOrigins",
            "No CORS origins configured; browsers will be unable to call the API",
        );
    }
    if server.max_upload_bytes == 0 {
        report.error("server.maxUploadBytes", "maxUploadBytes must be > 0");
    }
}

fn validate_ocr(config: &DocsiftConfig, report: &mut ValidationReport) {
    let ocr = &config.ocr;
    if ocr.command.trim().is_empty() {
        report.error("ocr.command", "OCR command cannot be empty");
    }
    if ocr.language.trim().is_empty() {
        report.error("ocr.language", "OCR language cannot be empty");
    }
    if ocr.max_concurrency == 0 {
        report.error("ocr.maxConcurrency", "maxConcurrency must be >= 1");
    }
    if ocr.timeout_secs == 0 {
        report.error("ocr.timeoutSecs", "timeoutSecs must be >= 1");
    }
}

fn validate_classifier(config: &DocsiftConfig, report: &mut ValidationReport) {
    for (i, rule) in config.classifier.rules.iter().enumerate() {
        let path = format!("classifier.rules[{i}]");
        if rule.keywords.iter().all(|k| k.trim().is_empty()) {
            report.error(
                format!("{path}.keywords"),
                format!("Rule for '{}' has no keywords", rule.document_type),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::RuleConfig;
    use docsift_core::DocumentType;

    #[test]
    fn default_config_is_valid() {
        let report = validate(&DocsiftConfig::default());
        assert!(report.is_valid(), "errors: {:?}", report.errors);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn zero_concurrency_is_error() {
        let mut cfg = DocsiftConfig::default();
        cfg.ocr.max_concurrency = 0;
        let report = validate(&cfg);
        assert!(!report.is_valid());
        assert_eq!(report.errors[0].path, "ocr.maxConcurrency");
    }

    #[test]
    fn empty_origins_is_warning_only() {
        let mut cfg = DocsiftConfig::default();
        cfg.server.allowed_origins.clear();
        let report = validate(&cfg);
        assert!(report.is_valid());
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn rule_without_keywords_is_error() {
        let mut cfg = DocsiftConfig::default();
        cfg.classifier.rules.push(RuleConfig {
            document_type: DocumentType::Memo,
            keywords: vec!["  ".into()],
        });
        let report = validate(&cfg);
        assert!(report.errors[0].path.starts_with("classifier.rules[0]"));
    }
}
