pub mod error;
pub mod result;
pub mod types;

pub use error::DocsiftError;
pub use result::{round2, Classification, ClassifyResponse, QualityReason, ReadabilityReport};
pub use types::{DocumentType, FileKind};
