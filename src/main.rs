//! MFA Config command line tool
//!
//! Loads an MFA server configuration, applies overrides and reports whether
//! it is valid.

use std::path::PathBuf;

use clap::Parser;
use log::{error, info};

use mfa_config::common::init_logger;
use mfa_config::{Configuration, Result, APP_NAME, VERSION};

/// Validate an MFA server configuration document
#[derive(Parser, Debug)]
#[clap(author, version = VERSION, about, long_about = None)]
struct Args {
    /// Configuration file
    #[clap(short, long, env = "MFA_CONFIG_FILE", default_value = "/etc/mfaserver/config.json")]
    config: PathBuf,

    /// Override the configured log level (ERROR, WARNING, INFO, DEBUG)
    #[clap(long)]
    log_level: Option<String>,

    /// Override the Vault endpoint
    #[clap(long)]
    vault_endpoint: Option<String>,

    /// Log level for the loader's own diagnostics
    #[clap(long, default_value = "info")]
    diagnostics: String,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(&args.diagnostics);

    info!("Starting {} v{}", APP_NAME, VERSION);

    let mut config = match Configuration::load(&args.config) {
        Ok(config) => config,
        Err(e) => {
            error!("Configuration {} is not valid: {}", args.config.display(), e);
            return Err(e);
        }
    };

    if let Some(level) = args.log_level.as_deref() {
        config.with_log_level(level)?;
    }
    if let Some(endpoint) = args.vault_endpoint {
        config.with_vault_endpoint(endpoint);
    }

    config.log_summary();
    info!("Configuration {} is valid", args.config.display());

    Ok(())
}
