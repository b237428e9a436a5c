pub mod mime_detect;
pub mod upload;

pub use mime_detect::{detect_mime_type, file_extension, file_kind};
pub use upload::StagedUpload;
