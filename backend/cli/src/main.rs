mod classify_cmd;
mod doctor_cmd;
mod status_cmd;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use docsift_config::DocsiftConfig;
use docsift_gateway::{start_server, GatewayState};
use docsift_understanding::{DocumentClassifier, KeywordClassifier, TesseractOcr};

#[derive(Parser)]
#[command(name = "docsift")]
#[command(about = "docsift: classify HR documents by their text")]
#[command(version)]
struct Cli {
    /// YAML config file
    #[arg(short, long, global = true, env = "DOCSIFT_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server (default)
    Serve {
        /// Port to bind the HTTP server to (overrides PORT)
        #[arg(short, long)]
        port: Option<u16>,
        /// Address to bind to
        #[arg(long)]
        bind: Option<String>,
    },
    /// Classify a local file and print the result as JSON
    Classify {
        file: PathBuf,
    },
    /// Check that the OCR engine and its language data are installed
    Doctor,
    /// Query a running server's health endpoint
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is the normal case in containers.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Serve {
        port: None,
        bind: None,
    });

    let (mut config, warnings) = docsift_config::load_and_prepare(cli.config.as_deref()).await?;

    // One-shot commands print to stdout; keep routine logs out of the way.
    if !matches!(command, Commands::Serve { .. }) {
        config.logging.level = "warn".to_string();
    }
    docsift_logging::init_logger(&config.logging)?;
    docsift_config::log_warnings(&warnings);

    match command {
        Commands::Serve { port, bind } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            if let Some(bind) = bind {
                config.server.bind_address = bind;
            }
            run_server(config).await?;
        }
        Commands::Classify { file } => classify_cmd::run(&config, &file).await?,
        Commands::Doctor => doctor_cmd::run(&config).await?,
        Commands::Status => status_cmd::run(config.server.port).await?,
    }

    Ok(())
}

/// Build the classification pipeline described by `config`.
pub(crate) fn build_classifier(config: &DocsiftConfig) -> (DocumentClassifier, Arc<TesseractOcr>) {
    let ocr = Arc::new(TesseractOcr::new(&config.ocr));
    let rules = KeywordClassifier::from_config(&config.classifier.rules);
    (DocumentClassifier::new(ocr.clone(), rules), ocr)
}

async fn run_server(config: DocsiftConfig) -> Result<()> {
    info!(
        port = config.server.port,
        bind = %config.server.bind_address,
        ocr = %config.ocr.command,
        language = %config.ocr.language,
        "Starting docsift"
    );

    let (classifier, ocr) = build_classifier(&config);

    // Without the engine, image uploads report `ocr_processing_error`.
    match ocr.version().await {
        Ok(version) => info!(version = %version, "OCR engine available"),
        Err(e) => warn!(error = %e, "OCR engine unavailable; image uploads will be unreadable"),
    }

    let state = GatewayState::new(classifier, config.ocr.clone());
    start_server(&config.server, state).await
}
