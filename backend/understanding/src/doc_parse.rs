//! Document Parsing Pipeline
//!
//! Cracks open PDF, DOCX, plain-text and image uploads and returns their
//! text, lowercased, for keyword scoring.

use docsift_core::{DocsiftError, FileKind};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::io::{Cursor, Read};
use std::path::Path;
use tracing::{info, warn};

use crate::ocr::OcrEngine;

/// Opening, closing or self-closing element tag. Group 1 is the closing
/// slash, group 2 the qualified name, group 3 the self-closing slash.
static TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<(/?)([A-Za-z][\w.\-]*(?::[\w.\-]+)?)[^>]*?(/?)>").unwrap());

static ENTITY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&(#x[0-9a-fA-F]+|#[0-9]+|amp|lt|gt|quot|apos);").unwrap());

pub struct DocParser;

impl DocParser {
    /// Text of every page of a PDF, concatenated.
    pub async fn parse_pdf(file_path: &Path) -> Result<String, DocsiftError> {
        info!("Parsing PDF document: {}", file_path.display());
        let path = file_path.to_path_buf();
        run_blocking("pdf", move || {
            let bytes = std::fs::read(&path)?;
            pdf_extract::extract_text_from_mem(&bytes).map_err(|e| extraction("pdf", e))
        })
        .await
    }

    /// Body paragraphs of a DOCX, joined by single spaces.
    pub async fn parse_docx(file_path: &Path) -> Result<String, DocsiftError> {
        info!("Parsing DOCX file: {}", file_path.display());
        let path = file_path.to_path_buf();
        run_blocking("docx", move || {
            let bytes = std::fs::read(&path)?;
            let mut archive =
                zip::ZipArchive::new(Cursor::new(bytes)).map_err(|e| extraction("docx", e))?;
            let mut xml = String::new();
            archive
                .by_name("word/document.xml")
                .map_err(|e| extraction("docx", e))?
                .read_to_string(&mut xml)?;
            Ok(docx_paragraphs(&xml).join(" "))
        })
        .await
    }

    /// Plain text decoded as UTF-8; invalid byte sequences are dropped.
    pub async fn read_text(file_path: &Path) -> Result<String, DocsiftError> {
        let bytes = tokio::fs::read(file_path).await?;
        Ok(bytes.utf8_chunks().map(|chunk| chunk.valid()).collect())
    }
}

/// Extract lowercased text from `path` according to `kind`.
///
/// Never fails: extraction errors are logged and yield an empty string, which
/// the classifier treats as "nothing readable".
pub async fn extract_text(engine: &dyn OcrEngine, path: &Path, kind: FileKind) -> String {
    let result = match kind {
        FileKind::Pdf => DocParser::parse_pdf(path).await,
        FileKind::Docx => DocParser::parse_docx(path).await,
        FileKind::Image => engine.image_to_string(path).await,
        FileKind::Text => DocParser::read_text(path).await,
        FileKind::Unsupported => Ok(String::new()),
    };

    match result {
        Ok(text) => text.to_lowercase(),
        Err(e) => {
            warn!(kind = %kind, path = %path.display(), error = %e, "Text extraction error");
            String::new()
        }
    }
}

/// Paragraph texts of a WordprocessingML `document.xml`.
///
/// Only paragraphs that are direct children of `w:body` count (table cells,
/// text boxes and headers are skipped). A paragraph's text is made of the
/// runs directly inside it or inside a `w:hyperlink`: `w:t` contributes its
/// text, `w:tab`/`w:ptab` a tab, `w:noBreakHyphen` a hyphen and `w:br`/`w:cr`
/// a newline (page and column breaks contribute nothing).
pub fn docx_paragraphs(xml: &str) -> Vec<String> {
    let mut stack: Vec<&str> = Vec::new();
    let mut paragraphs = Vec::new();
    let mut current: Option<String> = None;
    let mut text_start: Option<usize> = None;

    for caps in TAG_RE.captures_iter(xml) {
        let Some(tag) = caps.get(0) else { continue };
        let closing = !caps[1].is_empty();
        let self_closing = !caps[3].is_empty();
        let Some(name) = caps.get(2).map(|m| m.as_str()) else { continue };

        if closing {
            if name == "w:t" {
                if let (Some(start), Some(paragraph)) = (text_start.take(), current.as_mut()) {
                    paragraph.push_str(&decode_entities(&xml[start..tag.start()]));
                }
            }
            if let Some(pos) = stack.iter().rposition(|open| *open == name) {
                stack.truncate(pos);
            }
            if name == "w:p" && at_body_level(&stack) {
                paragraphs.extend(current.take());
            }
            continue;
        }

        if name == "w:p" && at_body_level(&stack) {
            if self_closing {
                paragraphs.push(String::new());
            } else {
                current = Some(String::new());
            }
        } else if let Some(paragraph) = current.as_mut().filter(|_| in_paragraph_run(&stack)) {
            match name {
                "w:t" if !self_closing => text_start = Some(tag.end()),
                "w:tab" | "w:ptab" => paragraph.push('\t'),
                "w:noBreakHyphen" => paragraph.push('-'),
                "w:br" if !is_page_or_column_break(tag.as_str()) => paragraph.push('\n'),
                "w:cr" => paragraph.push('\n'),
                _ => {}
            }
        }

        if !self_closing {
            stack.push(name);
        }
    }

    paragraphs
}

fn at_body_level(stack: &[&str]) -> bool {
    matches!(stack, [_, "w:body"])
}

fn in_paragraph_run(stack: &[&str]) -> bool {
    matches!(
        stack,
        [_, "w:body", "w:p", "w:r"] | [_, "w:body", "w:p", "w:hyperlink", "w:r"]
    )
}

fn is_page_or_column_break(tag: &str) -> bool {
    tag.contains("w:type=\"page\"") || tag.contains("w:type=\"column\"")
}

fn decode_entities(text: &str) -> String {
    ENTITY_RE
        .replace_all(text, |caps: &Captures| {
            let entity = &caps[1];
            let decoded = match entity {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                _ => entity
                    .strip_prefix("#x")
                    .map(|hex| u32::from_str_radix(hex, 16))
                    .unwrap_or_else(|| entity[1..].parse())
                    .ok()
                    .and_then(char::from_u32),
            };
            decoded.map(String::from).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

fn extraction(kind: &str, err: impl std::fmt::Display) -> DocsiftError {
    DocsiftError::Extraction {
        kind: kind.to_string(),
        message: err.to_string(),
    }
}

/// Run a CPU-bound parser on the blocking pool. A panicking parser (some
/// malformed PDFs trip asserts in the PDF stack) becomes an extraction error.
async fn run_blocking<F>(kind: &str, f: F) -> Result<String, DocsiftError>
where
    F: FnOnce() -> Result<String, DocsiftError> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| extraction(kind, format!("parser aborted: {e}")))?
}
