//! GlowApp command-line client

mod commands;
mod config;
mod logging;
mod notifier;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use commands::Commands;
use glow_core::{FileCredentialStore, GlowSettings};
use glow_http::GlowClientBuilder;
use notifier::ConsoleNotifier;
use std::sync::Arc;
use tracing::{Level, debug, error};

#[derive(Parser)]
#[command(name = "glow")]
#[command(about = "GlowApp client for sign-up, sign-in and API requests")]
#[command(version)]
struct Cli {
    /// Set logging level
    #[arg(short = 'l', long, global = true, default_value = "warn")]
    log_level: LogLevel,

    /// Settings file (TOML, YAML or JSON)
    #[arg(short = 'c', long, global = true)]
    config: Option<std::path::PathBuf>,

    /// Data directory for preferences and logs
    #[arg(short = 'd', long, global = true)]
    data_dir: Option<std::path::PathBuf>,

    /// API base URL, overriding the settings
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Disable file logging (only log to stderr)
    #[arg(long, global = true)]
    no_file_log: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut settings = GlowSettings::load(cli.config.as_ref())?;
    if let Some(data_dir) = cli.data_dir {
        settings.data_dir = data_dir;
    }
    if let Some(base_url) = cli.base_url {
        settings.base_url = base_url;
        settings.validate()?;
    }

    logging::init_logging(cli.log_level.into(), &settings.data_dir, cli.no_file_log)?;
    debug!(?settings, "Loaded settings");

    let client = GlowClientBuilder::from_settings(&settings)
        .credential_store(Arc::new(FileCredentialStore::in_dir(&settings.data_dir)))
        .notifier(Arc::new(ConsoleNotifier::stderr()))
        .build()?;

    if let Err(e) = cli.command.execute(&client, &settings).await {
        error!("Command failed: {e}");
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }

    Ok(())
}

#[derive(Clone, Debug, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for Level {
    fn from(log_level: LogLevel) -> Self {
        match log_level {
            LogLevel::Error => Self::ERROR,
            LogLevel::Warn => Self::WARN,
            LogLevel::Info => Self::INFO,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Trace => Self::TRACE,
        }
    }
}
