//! Upload staging: persists request bytes to a temporary file so external
//! tools (the OCR engine, document parsers) can read them by path.

use bytes::Bytes;
use docsift_core::DocsiftError;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

/// An upload written to a temp file. The file is removed when this is dropped.
#[derive(Debug)]
pub struct StagedUpload {
    file: NamedTempFile,
    extension: String,
}

impl StagedUpload {
    /// Write `data` to a fresh temp file whose name ends with `extension`.
    pub fn write(data: &[u8], extension: &str) -> Result<Self, DocsiftError> {
        let mut file = tempfile::Builder::new()
            .prefix("docsift-")
            .suffix(extension)
            .tempfile()?;
        file.write_all(data)?;
        file.flush()?;
        debug!(path = %file.path().display(), bytes = data.len(), "Staged upload");
        Ok(Self {
            file,
            extension: extension.to_string(),
        })
    }

    /// [`StagedUpload::write`] off the async executor.
    pub async fn stage(data: Bytes, extension: String) -> Result<Self, DocsiftError> {
        tokio::task::spawn_blocking(move || Self::write(&data, &extension))
            .await
            .map_err(|e| DocsiftError::Upload(format!("staging task failed: {e}")))?
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_suffix_and_contents() {
        let staged = StagedUpload::write(b"hello", ".txt").unwrap();
        assert!(staged.path().to_string_lossy().ends_with(".txt"));
        assert_eq!(std::fs::read(staged.path()).unwrap(), b"hello");
        assert_eq!(staged.extension(), ".txt");
    }

    #[tokio::test]
    async fn removed_on_drop() {
        let staged = StagedUpload::stage(Bytes::from_static(b"%PDF-1.4"), ".pdf".into())
            .await
            .unwrap();
        let path = staged.path().to_path_buf();
        assert!(path.exists());
        drop(staged);
        assert!(!path.exists());
    }
}
