pub mod classifier;
pub mod doc_parse;
pub mod ocr;
pub mod pipeline;
pub mod readability;

pub use classifier::{KeywordClassifier, Rule};
pub use doc_parse::{docx_paragraphs, extract_text, DocParser};
pub use ocr::{parse_tsv, OcrEngine, OcrWord, TesseractOcr};
pub use pipeline::DocumentClassifier;
pub use readability::{assess, check_image_readability};
