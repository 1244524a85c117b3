//! Configuration module
//!
//! Loads the MFA server's JSON configuration document, validates every
//! externally supplied value and materializes the handles the server hands
//! to its collaborators: leveled loggers, Vault client settings, the MFA
//! listener's TLS keypair and the LDAP connection descriptor.
//!
//! # Data Flow
//! ```text
//! config file (JSON)
//!     → types.rs (defaults + document overlay)
//!     → loader.rs (validation pipeline, fail fast)
//!     → Configuration (validated)
//!     → builder.rs (with_* mutators, validate then replace)
//! ```

mod builder;
mod credential;
pub mod defaults;
mod endpoint;
mod loader;
mod logging;
mod summary;
mod types;
mod vault;

pub use self::credential::{read_user_id_file, resolve_user_id, UserIdFile};
pub use self::endpoint::{DirectoryConnection, LdapEndpoint, LdapScheme};
pub use self::logging::{LevelLogger, LogLevel, Loggers};
pub use self::types::{
    Configuration, LdapConfig, ServerConfig, TlsSettings, VaultConfig, VaultConnection,
};
pub use self::vault::{SecretAccess, VaultClientConfig, VaultLogin};
