//! Default values for every tunable in the service config.

/// Port used when neither `PORT` nor the config file sets one.
pub const DEFAULT_PORT: u16 = 5000;

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0";

/// Origin of the records front-end allowed to call the API from a browser.
pub const DEFAULT_ALLOWED_ORIGIN: &str = "https://e201filems.infinityfree.me";

/// 16 MiB upload limit.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

pub const DEFAULT_OCR_COMMAND: &str = "tesseract";

pub const DEFAULT_OCR_LANGUAGE: &str = "eng";

/// Max OCR child processes running at once.
pub const DEFAULT_OCR_MAX_CONCURRENCY: usize = 4;

pub const DEFAULT_OCR_TIMEOUT_SECS: u64 = 60;

pub const DEFAULT_LOG_LEVEL: &str = "info";
