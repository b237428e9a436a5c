//! Config file reading.

use crate::schema::DocsiftConfig;
use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;
use tracing::{debug, info};

/// Env var naming an optional YAML config file.
pub const CONFIG_PATH_VAR: &str = "DOCSIFT_CONFIG";

/// Load and parse the config from disk.
///
/// Returns `Ok(Default::default())` if the file doesn't exist.
pub async fn load_config(path: &Path) -> Result<DocsiftConfig> {
    if !path.exists() {
        debug!(path = %path.display(), "Config file does not exist; using defaults");
        return Ok(DocsiftConfig::default());
    }

    let raw = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    // An empty document deserializes to unit, not to a mapping.
    if raw.trim().is_empty() {
        return Ok(DocsiftConfig::default());
    }

    let config: DocsiftConfig = serde_yaml::from_str(&raw)
        .with_context(|| format!("Failed to parse config YAML at: {}", path.display()))?;

    info!(path = %path.display(), "Loaded config");
    Ok(config)
}
