//! `docsift-config`: service configuration for docsift.
//!
//! Provides:
//! - Typed config schema (server, OCR, logging, classifier rules)
//! - Optional YAML file named by `DOCSIFT_CONFIG`
//! - Environment overrides (`PORT`, `TESSERACT_CMD`, ...)
//! - Validation with errors and warnings

pub mod defaults;
pub mod env;
pub mod io;
pub mod schema;
pub mod validation;

pub use env::{apply_env_overrides, apply_env_overrides_with, InvalidEnvVarError};
pub use io::{load_config, CONFIG_PATH_VAR};
pub use schema::{ClassifierConfig, DocsiftConfig, LoggingConfig, OcrConfig, RuleConfig, ServerConfig};
pub use validation::{validate, ConfigValidationError, ValidationReport};

use anyhow::{bail, Context, Result};
use std::path::Path;

/// Load the YAML file (if any), apply env overrides, and validate.
///
/// This is the main entry point for loading a config at runtime. Validation
/// errors abort; warnings are handed back so they can be logged once the
/// logger (which itself depends on this config) is up.
pub async fn load_and_prepare(
    path: Option<&Path>,
) -> Result<(DocsiftConfig, Vec<ConfigValidationError>)> {
    let config = match path {
        Some(path) => load_config(path).await?,
        None => DocsiftConfig::default(),
    };

    let config = apply_env_overrides(config).context("Failed to apply env overrides")?;

    let report = validate(&config);
    if !report.is_valid() {
        let details: Vec<String> = report.errors.iter().map(ToString::to_string).collect();
        bail!("Invalid configuration:\n  {}", details.join("\n  "));
    }

    Ok((config, report.warnings))
}

/// Emit validation warnings through `tracing`.
pub fn log_warnings(warnings: &[ConfigValidationError]) {
    for warning in warnings {
        tracing::warn!(path = %warning.path, message = %warning.message, "Config warning");
    }
}
