//! Toolchain configuration inspector - Main Application Entry Point

use anyhow::{Context, Result};
use clap::Parser;
use config::{ConfigDocument, ConfigLoader};
use std::env;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod commands;

use cli::{Cli, Command};

const DEFAULT_CONFIG_PATH: &str = "toolchain.yaml";
const DEFAULT_LOG_LEVEL: &str = "info";

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode> {
    // Load .env file if it exists
    let dotenv_result = dotenv::dotenv();

    // Initialize logging
    init_logging()?;

    match dotenv_result {
        Ok(path) => debug!("Loaded environment variables from {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => warn!("Could not load .env file: {}", e),
    }

    let cli = Cli::parse();
    debug!("Starting toolchain v{}", env!("CARGO_PKG_VERSION"));

    let config_path = cli
        .config
        .clone()
        .or_else(|| env::var_os("TOOLCHAIN_CONFIG").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

    let load = || load_document(&config_path, cli.env);

    match cli.command {
        Command::Show { format } => print!("{}", commands::show(&load()?, format)?),
        Command::Network { name } => print!("{}", commands::network(&load()?, &name)?),
        Command::Compiler { name, available } => {
            print!("{}", commands::compiler(&load()?, &name, &available)?)
        }
        Command::Validate => {
            let (out, valid) = commands::validate(&load()?)?;
            print!("{}", out);
            if !valid {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Init { path, force } => commands::init(&path, force)?,
    }

    Ok(ExitCode::SUCCESS)
}

fn load_document(config_path: &Path, with_env: bool) -> Result<ConfigDocument> {
    let document = if with_env {
        ConfigLoader::load_with_env(config_path, config::loader::ENV_PREFIX)
    } else {
        ConfigLoader::load(config_path)
    }
    .with_context(|| format!("Failed to load configuration from {}", config_path.display()))?;

    info!("Configuration loaded from: {}", config_path.display());

    Ok(document)
}

/// Initialize logging based on environment variables
///
/// Logs go to stderr so command output on stdout stays machine-readable.
fn init_logging() -> Result<()> {
    let log_level = env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string());
    let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level));

    let registry = tracing_subscriber::registry().with(env_filter);

    match log_format.as_str() {
        "json" => {
            registry
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .try_init()
                .context("Failed to initialize JSON logging")?;
        }
        _ => {
            registry
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .try_init()
                .context("Failed to initialize logging")?;
        }
    }

    debug!("Logging initialized (level: {}, format: {})", log_level, log_format);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_log_level_is_info() {
        assert_eq!(DEFAULT_LOG_LEVEL, "info");
        assert!(tracing_subscriber::EnvFilter::try_new(DEFAULT_LOG_LEVEL).is_ok());
    }
}
