//! MFA Config: configuration bootstrap for an MFA server
//!
//! The MFA server authenticates users against an LDAP directory and keeps
//! their one-time-password secrets in Vault. Before it serves anything it
//! needs a fully validated configuration; this crate turns a JSON document
//! into one.
//!
//! # Main Features
//!
//! - Defaults for every optional field, explicit `null` clears a default
//! - Leveled loggers (ERROR < WARNING < INFO < DEBUG) writing to a file or stdout
//! - Vault endpoint with an explicit CA trust store and inline or file-based user id
//! - MFA listener TLS keypair validation
//! - `ldap://` / `ldaps://` endpoint parsing with default ports 389 / 636
//!
//! # Example
//!
//! ```no_run
//! use mfa_config::{Configuration, Result};
//!
//! fn main() -> Result<()> {
//!     let mut config = Configuration::load("/etc/mfaserver/config.json")?;
//!     config.with_log_level("DEBUG")?;
//!
//!     let vault_http = config.vault().client().http_client()?;
//!     let ldap = config.ldap().connection().expect("loaded configurations carry LDAP");
//!     config.loggers().info().log(format_args!("LDAP at {}", ldap.address()));
//!     # drop(vault_http);
//!     Ok(())
//! }
//! ```

// Public modules
pub mod common;
pub mod config;
pub mod tls;

// Re-export commonly used structures and functions for convenience
pub use common::{ConfigError, LoadStep, Result};
pub use config::{Configuration, LogLevel, Loggers};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
