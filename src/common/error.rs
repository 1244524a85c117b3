//! Error handling module
//!
//! This module defines the error types and result type aliases used while
//! bootstrapping the MFA server configuration.

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Pipeline step a load failure happened in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStep {
    /// Reading or parsing the configuration document
    Document,
    /// Opening the log destination and binding the leveled loggers
    Logging,
    /// Vault endpoint and CA trust
    VaultConnection,
    /// Resolving the Vault user id
    VaultCredential,
    /// Server-side TLS keypair
    ServerTls,
    /// LDAP endpoint and connection descriptor
    LdapConnection,
}

impl fmt::Display for LoadStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Document => write!(f, "configuration document"),
            Self::Logging => write!(f, "logging setup"),
            Self::VaultConnection => write!(f, "vault connection"),
            Self::VaultCredential => write!(f, "vault credential"),
            Self::ServerTls => write!(f, "MFA server TLS"),
            Self::LdapConnection => write!(f, "LDAP connection"),
        }
    }
}

/// MFA configuration error type
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A file could not be read, opened or written
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Malformed JSON
    #[error("could not parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Log level is missing or not one of the accepted tokens
    #[error("invalid log level '{0}', accepted values are ERROR, WARNING, INFO, DEBUG")]
    InvalidLogLevel(String),

    /// Directory endpoint could not be parsed
    #[error("invalid LDAP endpoint: {0}")]
    InvalidEndpoint(String),

    /// Structural PEM problem in a file
    #[error("not valid PEM format in {}: {reason}", .path.display())]
    InvalidPem { path: PathBuf, reason: String },

    /// Certificate and key do not load as a pair
    #[error("key pair {} / {} not valid: {source}", .cert.display(), .key.display())]
    InvalidKeyPair {
        cert: PathBuf,
        key: PathBuf,
        #[source]
        source: openssl::error::ErrorStack,
    },

    /// Empty or undecodable certificate data
    #[error("invalid certificate: {0}")]
    InvalidCertificate(String),

    /// Neither UserID nor a resolvable UserIDFile
    #[error("configuration does not define a UserID or UserIDFile to use to access Vault")]
    MissingCredential,

    /// A field required by the current settings is absent
    #[error("missing required configuration value: {0}")]
    MissingValue(&'static str),

    /// Listener socket does not resolve to a TCP address
    #[error("invalid listener socket defined for MFA server: {0}")]
    InvalidListener(String),

    /// Admin group settings are inconsistent
    #[error("invalid LDAP admin settings: {0}")]
    InvalidAdminSettings(String),

    /// OpenSSL failure while assembling TLS material
    #[error("TLS error: {0}")]
    Tls(#[from] openssl::error::ErrorStack),

    /// HTTP transport for Vault could not be built
    #[error("vault HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Failure inside one step of the load pipeline
    #[error("{step} failed: {source}")]
    Step {
        step: LoadStep,
        #[source]
        source: Box<ConfigError>,
    },
}

impl ConfigError {
    /// Wrap an error with the pipeline step it came from
    pub fn at(step: LoadStep) -> impl FnOnce(ConfigError) -> ConfigError {
        move |source| ConfigError::Step {
            step,
            source: Box::new(source),
        }
    }

    /// Strip any step wrapping and return the underlying error
    pub fn root(&self) -> &ConfigError {
        match self {
            Self::Step { source, .. } => source.root(),
            other => other,
        }
    }
}

/// Result type alias
///
/// This is a `Result` type alias that uses our custom `ConfigError`.
pub type Result<T> = std::result::Result<T, ConfigError>;
