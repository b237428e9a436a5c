//! Optical Character Recognition (OCR)
//!
//! Bridges the system Tesseract binary to extract text and per-word
//! confidences from image uploads.

use async_trait::async_trait;
use docsift_config::OcrConfig;
use docsift_core::DocsiftError;
use std::path::Path;
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;
use tokio::process::Command;
use tokio::sync::Semaphore;
use tracing::{debug, info};

/// One row of Tesseract's TSV output.
#[derive(Debug, Clone, PartialEq)]
pub struct OcrWord {
    /// Layout level: 1 page, 2 block, 3 paragraph, 4 line, 5 word.
    pub level: u32,
    /// Confidence in `0..=100`, `-1` for non-word rows, `None` if unparseable.
    pub conf: Option<f64>,
    pub text: String,
}

/// Something that can read text out of an image file.
#[async_trait]
pub trait OcrEngine: Send + Sync {
    /// Full recognised text, in reading order.
    async fn image_to_string(&self, image: &Path) -> Result<String, DocsiftError>;

    /// Layout rows with confidences.
    async fn image_to_data(&self, image: &Path) -> Result<Vec<OcrWord>, DocsiftError>;
}

/// Parse Tesseract TSV output (`tesseract <img> stdout tsv`).
///
/// Rows with fewer than 11 columns or a non-numeric level are skipped.
pub fn parse_tsv(tsv: &str) -> Vec<OcrWord> {
    tsv.lines()
        .filter(|line| !line.starts_with("level"))
        .filter_map(|line| {
            let cols: Vec<&str> = line.split('\t').collect();
            if cols.len() < 11 {
                return None;
            }
            let level = cols[0].trim().parse().ok()?;
            Some(OcrWord {
                level,
                conf: cols[10].trim().parse().ok(),
                text: cols.get(11).map(|t| t.to_string()).unwrap_or_default(),
            })
        })
        .collect()
}

/// OCR engine backed by the `tesseract` command line tool.
#[derive(Clone)]
pub struct TesseractOcr {
    command: String,
    language: String,
    timeout: Duration,
    permits: Arc<Semaphore>,
}

impl TesseractOcr {
    pub fn new(config: &OcrConfig) -> Self {
        Self {
            command: config.command.clone(),
            language: config.language.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
            permits: Arc::new(Semaphore::new(config.max_concurrency.max(1))),
        }
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// First line of `tesseract --version`.
    pub async fn version(&self) -> Result<String, DocsiftError> {
        let output = self.exec(&["--version"]).await?;
        Ok(output.lines().next().unwrap_or_default().trim().to_string())
    }

    /// Installed language packs (`tesseract --list-langs`).
    pub async fn languages(&self) -> Result<Vec<String>, DocsiftError> {
        let output = self.exec(&["--list-langs"]).await?;
        Ok(output
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty() && !l.starts_with("List of available languages"))
            .map(String::from)
            .collect())
    }

    async fn recognize(&self, image: &Path, config_file: Option<&str>) -> Result<String, DocsiftError> {
        let image = image.to_string_lossy();
        let mut args: Vec<&str> = vec![&*image, "stdout", "-l", self.language.as_str()];
        args.extend(config_file);
        self.exec(&args).await
    }

    /// Run the binary with `args`, bounded by the concurrency limit and timeout.
    ///
    /// Older Tesseract builds print `--version`/`--list-langs` to stderr, so
    /// stderr is returned when stdout is empty.
    async fn exec(&self, args: &[&str]) -> Result<String, DocsiftError> {
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|_| DocsiftError::Ocr("OCR limiter closed".into()))?;

        debug!(command = %self.command, ?args, "Spawning OCR process");
        let mut cmd = Command::new(&self.command);
        cmd.args(args).stdin(Stdio::null()).kill_on_drop(true);

        let output = match tokio::time::timeout(self.timeout, cmd.output()).await {
            Err(_) => {
                return Err(DocsiftError::Ocr(format!(
                    "{} timed out after {}s",
                    self.command,
                    self.timeout.as_secs()
                )))
            }
            Ok(Err(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(DocsiftError::OcrUnavailable(format!(
                    "'{}' not found on PATH",
                    self.command
                )))
            }
            Ok(Err(e)) => return Err(DocsiftError::Ocr(format!("failed to spawn {}: {e}", self.command))),
            Ok(Ok(output)) => output,
        };

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !output.status.success() {
            return Err(DocsiftError::Ocr(format!(
                "{} exited with {}: {}",
                self.command,
                output.status,
                stderr.trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        if stdout.trim().is_empty() && !stderr.trim().is_empty() {
            return Ok(stderr.into_owned());
        }
        Ok(stdout.into_owned())
    }
}

#[async_trait]
impl OcrEngine for TesseractOcr {
    async fn image_to_string(&self, image: &Path) -> Result<String, DocsiftError> {
        info!("Running OCR on image file: {}", image.display());
        self.recognize(image, None).await
    }

    async fn image_to_data(&self, image: &Path) -> Result<Vec<OcrWord>, DocsiftError> {
        let tsv = self.recognize(image, Some("tsv")).await?;
        Ok(parse_tsv(&tsv))
    }
}
