//! File type detection for uploads.
//!
//! Uploads are routed purely by filename extension, the way the records
//! front-end names them; there is no content sniffing.

use docsift_core::FileKind;
use std::path::Path;

/// Lowercased extension of `filename`, including the leading dot.
///
/// Only the last path component is considered, only the last dot counts, and
/// leading dots (as in `.profile`) do not start an extension. Returns an empty
/// string when there is no extension.
pub fn file_extension(filename: &str) -> String {
    let base = filename.rsplit('/').next().unwrap_or(filename);
    match base.rfind('.') {
        Some(dot) if !base[..dot].chars().all(|c| c == '.') => base[dot..].to_lowercase(),
        _ => String::new(),
    }
}

/// Extraction strategy for `filename`.
pub fn file_kind(filename: &str) -> FileKind {
    FileKind::from_extension(&file_extension(filename))
}

/// Detect MIME type by file extension.
pub fn detect_mime_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png"          => "image/png",
        "pdf"          => "application/pdf",
        "docx"         => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "txt"          => "text/plain",
        _              => "application/octet-stream",
    }
}
