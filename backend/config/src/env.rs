//! Environment variable overrides.
//!
//! Applied after the YAML file, so the hosting platform's `PORT` always wins
//! over whatever the file says. Empty values count as unset.

use std::collections::HashMap;
use std::str::FromStr;

use crate::schema::DocsiftConfig;

/// Error returned when an override cannot be parsed.
#[derive(Debug, thiserror::Error)]
#[error("Invalid value \"{value}\" for env var \"{var_name}\": {reason}")]
pub struct InvalidEnvVarError {
    pub var_name: String,
    pub value: String,
    pub reason: String,
}

/// Apply overrides from the process environment.
pub fn apply_env_overrides(config: DocsiftConfig) -> Result<DocsiftConfig, InvalidEnvVarError> {
    apply_env_overrides_with(config, &std::env::vars().collect())
}

/// Apply overrides from a provided map (useful for testing).
pub fn apply_env_overrides_with(
    mut config: DocsiftConfig,
    env: &HashMap<String, String>,
) -> Result<DocsiftConfig, InvalidEnvVarError> {
    let get = |name: &str| env.get(name).map(|v| v.trim()).filter(|v| !v.is_empty());

    if let Some(port) = get("PORT") {
        config.server.port = parse("PORT", port)?;
    }
    if let Some(bind) = get("DOCSIFT_BIND") {
        config.server.bind_address = bind.to_string();
    }
    if let Some(origins) = get("DOCSIFT_ALLOWED_ORIGINS") {
        config.server.allowed_origins = origins
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(String::from)
            .collect();
    }
    if let Some(limit) = get("DOCSIFT_MAX_UPLOAD_BYTES") {
        config.server.max_upload_bytes = parse("DOCSIFT_MAX_UPLOAD_BYTES", limit)?;
    }

    if let Some(cmd) = get("TESSERACT_CMD") {
        config.ocr.command = cmd.to_string();
    }
    if let Some(lang) = get("TESSERACT_LANG") {
        config.ocr.language = lang.to_string();
    }
    if let Some(n) = get("DOCSIFT_OCR_CONCURRENCY") {
        config.ocr.max_concurrency = parse("DOCSIFT_OCR_CONCURRENCY", n)?;
    }
    if let Some(secs) = get("DOCSIFT_OCR_TIMEOUT_SECS") {
        config.ocr.timeout_secs = parse("DOCSIFT_OCR_TIMEOUT_SECS", secs)?;
    }

    if let Some(level) = get("DOCSIFT_LOG_LEVEL") {
        config.logging.level = level.to_string();
    }
    if let Some(dir) = get("DOCSIFT_LOG_DIR") {
        config.logging.dir = Some(dir.to_string());
    }
    if let Some(json) = get("DOCSIFT_LOG_JSON") {
        config.logging.json = matches!(json.to_ascii_lowercase().as_str(), "1" | "true" | "yes");
    }

    Ok(config)
}

fn parse<T>(var_name: &str, value: &str) -> Result<T, InvalidEnvVarError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|e: T::Err| InvalidEnvVarError {
        var_name: var_name.to_string(),
        value: value.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn port_defaults_to_5000() {
        let cfg = apply_env_overrides_with(DocsiftConfig::default(), &HashMap::new()).unwrap();
        assert_eq!(cfg.server.port, 5000);
        assert_eq!(cfg.server.socket_addr(), "0.0.0.0:5000");
    }

    #[test]
    fn port_from_env() {
        let cfg =
            apply_env_overrides_with(DocsiftConfig::default(), &env(&[("PORT", "8080")])).unwrap();
        assert_eq!(cfg.server.socket_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn empty_port_is_ignored() {
        let cfg = apply_env_overrides_with(DocsiftConfig::default(), &env(&[("PORT", "")])).unwrap();
        assert_eq!(cfg.server.port, 5000);
    }

    #[test]
    fn invalid_port_is_error() {
        let err = apply_env_overrides_with(DocsiftConfig::default(), &env(&[("PORT", "http")]))
            .unwrap_err();
        assert_eq!(err.var_name, "PORT");
    }

    #[test]
    fn origins_split_on_commas() {
        let cfg = apply_env_overrides_with(
            DocsiftConfig::default(),
            &env(&[("DOCSIFT_ALLOWED_ORIGINS", "https://a.example, https://b.example,")]),
        )
        .unwrap();
        assert_eq!(
            cfg.server.allowed_origins,
            vec!["https://a.example".to_string(), "https://b.example".to_string()]
        );
    }

    #[test]
    fn ocr_and_logging_overrides() {
        let cfg = apply_env_overrides_with(
            DocsiftConfig::default(),
            &env(&[
                ("TESSERACT_CMD", "/usr/local/bin/tesseract"),
                ("DOCSIFT_OCR_CONCURRENCY", "2"),
                ("DOCSIFT_LOG_JSON", "true"),
                ("DOCSIFT_LOG_DIR", "/var/log/docsift"),
            ]),
        )
        .unwrap();
        assert_eq!(cfg.ocr.command, "/usr/local/bin/tesseract");
        assert_eq!(cfg.ocr.max_concurrency, 2);
        assert!(cfg.logging.json);
        assert_eq!(cfg.logging.dir.as_deref(), Some("/var/log/docsift"));
    }
}
