//! Structured Logger
//!
//! Wraps `tracing` to provide console output (plain or JSON), optional file
//! rotation (NDJSON), and environment-based level control.

use anyhow::Result;
use docsift_config::LoggingConfig;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the global structured logger.
///
/// `RUST_LOG` takes precedence over `config.level`. A daily-rolling
/// `docsift.log.YYYY-MM-DD` is written under `config.dir` when set.
/// Calling this twice is harmless; the second call leaves the first
/// subscriber in place.
pub fn init_logger(config: &LoggingConfig) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))?;

    let file_layer = match &config.dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let appender = RollingFileAppender::new(Rotation::DAILY, dir, "docsift.log");
            Some(fmt::layer().json().with_writer(appender).with_ansi(false))
        }
        None => None,
    };

    let (json_console, plain_console) = if config.json {
        (Some(fmt::layer().json().with_writer(std::io::stdout)), None)
    } else {
        (
            None,
            Some(fmt::layer().with_writer(std::io::stdout).with_target(false)),
        )
    };

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(json_console)
        .with(plain_console)
        .with(file_layer)
        .try_init();

    Ok(())
}
