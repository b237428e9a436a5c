//! CLI Classify Command
//!
//! Runs the classification pipeline on a local file, without the HTTP layer.

use anyhow::{bail, Result};
use docsift_config::DocsiftConfig;
use docsift_core::ClassifyResponse;
use docsift_media::file_extension;
use std::path::Path;

use crate::build_classifier;

pub async fn run(config: &DocsiftConfig, file: &Path) -> Result<()> {
    let response = classify_file(config, file).await?;
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

async fn classify_file(config: &DocsiftConfig, file: &Path) -> Result<ClassifyResponse> {
    if !file.is_file() {
        bail!("No such file: {}", file.display());
    }
    let name = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let (classifier, _) = build_classifier(config);
    Ok(classifier.classify_path(file, &file_extension(&name)).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use docsift_core::DocumentType;
    use std::io::Write;

    #[tokio::test]
    async fn classifies_local_text_file() {
        let mut file = tempfile::Builder::new().suffix(".TXT").tempfile().unwrap();
        write!(file, "Medical Clearance: the employee is FIT TO WORK.").unwrap();

        let resp = classify_file(&DocsiftConfig::default(), file.path())
            .await
            .unwrap();
        assert_eq!(resp.document_type, DocumentType::MedicalClearance);
        assert_eq!(resp.confidence, 0.7);
    }

    #[tokio::test]
    async fn missing_file_is_error() {
        let err = classify_file(&DocsiftConfig::default(), Path::new("/nope/none.pdf"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("No such file"));
    }
}
