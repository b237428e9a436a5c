//! CLI Doctor Command
//!
//! Verifies the OCR engine binary and its language data are installed, the
//! same checks the container image has to satisfy.

use anyhow::{bail, Result};
use docsift_config::DocsiftConfig;
use docsift_understanding::TesseractOcr;

/// Executes the full doctor diagnosis.
pub async fn run(config: &DocsiftConfig) -> Result<()> {
    println!("\n🔍 Running docsift doctor...\n");

    let ocr = TesseractOcr::new(&config.ocr);
    let is_ok = check_engine(&ocr).await && check_language(&ocr).await;

    println!("\nServer will bind {}", config.server.socket_addr());
    println!();
    if is_ok {
        println!("✅ All checks passed! docsift is ready to classify images.");
        Ok(())
    } else {
        println!("❌ Some checks failed! Please fix the errors above.");
        bail!("doctor checks failed");
    }
}

async fn check_engine(ocr: &TesseractOcr) -> bool {
    println!("Checking OCR engine ({}):", ocr.command());
    match ocr.version().await {
        Ok(version) => {
            println!("  🟢 {version}");
            true
        }
        Err(e) => {
            println!("  🔴 {e}");
            false
        }
    }
}

async fn check_language(ocr: &TesseractOcr) -> bool {
    println!("Checking language data ({}):", ocr.language());
    match ocr.languages().await {
        Ok(langs) if has_language(&langs, ocr.language()) => {
            println!("  🟢 '{}' installed ({} languages total)", ocr.language(), langs.len());
            true
        }
        Ok(langs) => {
            println!("  🔴 '{}' missing; installed: {}", ocr.language(), langs.join(", "));
            false
        }
        Err(e) => {
            println!("  🔴 {e}");
            false
        }
    }
}

/// `language` may combine packs, e.g. `eng+fil`; every part must be installed.
fn has_language(installed: &[String], language: &str) -> bool {
    language
        .split('+')
        .all(|lang| installed.iter().any(|l| l == lang))
}
