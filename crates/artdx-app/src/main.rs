//! artdx application binary - composition root.
//!
//! 1. Load configuration from TOML
//! 2. Initialize logging (stderr or an append-only log file)
//! 3. Build the Gemini model client
//! 4. Run a one-shot question or the interactive chat loop

mod cli;
mod repl;

use std::fs::OpenOptions;
use std::sync::{Arc, Mutex};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use artdx_chat::ArtSession;
use artdx_core::config::ArtdxConfig;
use artdx_core::{ArtdxError, Result};
use artdx_gemini::GeminiClient;

use cli::CliArgs;

fn init_logging(level: &str, log_file: Option<&str>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    match log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // Configuration is read before logging so its log settings apply.
    let config_file = args.resolve_config_path();
    let (mut config, load_error) = match ArtdxConfig::load_optional(&config_file) {
        Ok(c) => (c, None),
        Err(e) => (ArtdxConfig::default(), Some(e)),
    };

    let level = args.resolve_log_level(&config.general.log_level);
    init_logging(&level, config.general.log_file.as_deref())?;
    tracing::info!("Starting artdx v{}", env!("CARGO_PKG_VERSION"));
    match load_error {
        Some(e) => tracing::warn!(
            path = %config_file.display(),
            error = %e,
            "Failed to load config, using defaults"
        ),
        None => tracing::info!(path = %config_file.display(), "Configuration loaded"),
    }

    if let Some(model) = args.model.clone() {
        config.model.model = model;
    }

    let client = match GeminiClient::from_env(&config.model) {
        Ok(c) => c,
        Err(e @ ArtdxError::MissingCredential(_)) => {
            tracing::error!(error = %e, "No API key configured");
            eprintln!("{}", e);
            std::process::exit(2);
        }
        Err(e) => return Err(e.into()),
    };
    tracing::info!(model = client.model(), "Model client ready");

    let mut session = ArtSession::new(config.chat.clone(), Arc::new(client));

    if let Some(ref path) = args.image {
        repl::upload(&mut session, path)?;
    }

    match args.ask {
        Some(ref question) => {
            repl::ask(&mut session, question).await?;
        }
        None => repl::run(&mut session).await?,
    }

    tracing::info!("artdx shutting down");
    Ok(())
}
