//! MaidEase CLI - household services marketplace client

mod commands;
mod config;
mod logging;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use commands::{Commands, TerminalRedirect};
use maidease_client::{ClientError, FileStorage, MaidEaseClient, SessionStore};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{Level, debug, error};

#[derive(Parser)]
#[command(name = "maidease")]
#[command(about = "Book household services from the command line")]
#[command(version)]
struct Cli {
    /// API root, overrides the config file and environment
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Directory for config, session and logs
    #[arg(short = 'd', long, global = true)]
    data_dir: Option<PathBuf>,

    /// Configuration file (defaults to config.toml in the config directory)
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    /// Set logging level
    #[arg(short = 'l', long, global = true, default_value = "info")]
    log_level: LogLevel,

    /// Disable file logging (only log to stderr)
    #[arg(long, global = true)]
    no_file_log: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let dirs = config::Dirs::new(cli.data_dir.clone());
    logging::init_logging(cli.log_level.into(), &dirs.data_dir(), cli.no_file_log)?;

    let client = build_client(&cli, &dirs)?;

    match cli.command.execute(&client).await {
        Ok(()) => {
            debug!("Command completed successfully");
            Ok(())
        }
        Err(e) => {
            error!("Command failed: {e:#}");
            match e.downcast_ref::<ClientError>() {
                // The redirect hook has already told the user
                Some(client_error) if client_error.is_session_expired() => {}
                Some(client_error) => eprintln!("error: {}", client_error.user_message()),
                None => eprintln!("error: {e:#}"),
            }
            std::process::exit(1);
        }
    }
}

fn build_client(cli: &Cli, dirs: &config::Dirs) -> Result<MaidEaseClient> {
    let mut client_config =
        config::load(dirs, cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(base_url) = &cli.base_url {
        client_config.base_url = base_url.clone();
    }
    debug!(base_url = %client_config.base_url, "Using API");

    let session_file = dirs.session_file();
    let session = SessionStore::load(FileStorage::new(&session_file))
        .with_context(|| format!("Failed to load session from {}", session_file.display()))?;

    let client = MaidEaseClient::builder()
        .config(&client_config)
        .session(Arc::new(session))
        .on_session_expired(TerminalRedirect)
        .build()?;
    Ok(client)
}

#[derive(Clone, Copy, Debug, ValueEnum)]
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
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }
}
