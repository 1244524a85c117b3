//! Configuration types
//!
//! The document shape deserializes straight onto these types; fields absent
//! from the document keep their defaults, fields set to `null` become `None`.
//! Derived handles (loggers, Vault client settings, TLS and LDAP descriptors)
//! are skipped by serde and filled in by the load pipeline or the `with_*`
//! mutators.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::common::{ConfigError, Result};
use crate::config::defaults;
use crate::config::endpoint::DirectoryConnection;
use crate::config::logging::Loggers;
use crate::config::vault::{SecretAccess, VaultClientConfig, VaultLogin};
use crate::tls::ServerTls;

/// Validated MFA server configuration
///
/// Only obtainable from [`Configuration::load`] or [`Configuration::default`];
/// every later change goes through a `with_*` mutator.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Configuration {
    #[serde(rename = "Vault")]
    pub(crate) vault: VaultConfig,
    #[serde(rename = "MFAServer")]
    pub(crate) server: ServerConfig,
    #[serde(rename = "LDAP")]
    pub(crate) ldap: LdapConfig,
}

impl Configuration {
    pub fn vault(&self) -> &VaultConfig {
        &self.vault
    }

    pub fn server(&self) -> &ServerConfig {
        &self.server
    }

    pub fn ldap(&self) -> &LdapConfig {
        &self.ldap
    }

    /// Leveled sinks, shorthand for `server().loggers()`
    pub fn loggers(&self) -> &Loggers {
        &self.server.loggers
    }
}

/// `VaultConnection` block of the document
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct VaultConnection {
    #[serde(rename = "EndPoint")]
    pub endpoint: Option<String>,
    #[serde(rename = "TrustCACert")]
    pub trust_ca_cert: Option<PathBuf>,
}

/// Vault settings
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct VaultConfig {
    #[serde(rename = "VaultConnection")]
    pub(crate) connection: VaultConnection,
    #[serde(rename = "AppIDRead")]
    pub(crate) app_id_read: Option<String>,
    #[serde(rename = "AppIDWrite")]
    pub(crate) app_id_write: Option<String>,
    #[serde(rename = "UserIDFile")]
    pub(crate) user_id_file: Option<PathBuf>,
    #[serde(rename = "UserID")]
    pub(crate) user_id: Option<String>,
    #[serde(rename = "MFASecretsPath")]
    pub(crate) secrets_path: Option<String>,
    #[serde(skip)]
    pub(crate) client: VaultClientConfig,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            connection: VaultConnection::default(),
            app_id_read: None,
            app_id_write: None,
            user_id_file: None,
            user_id: None,
            secrets_path: defaults::secrets_path(),
            client: VaultClientConfig::default(),
        }
    }
}

impl VaultConfig {
    /// Connection block as written in the document (or last set)
    pub fn connection(&self) -> &VaultConnection {
        &self.connection
    }

    pub fn app_id_read(&self) -> Option<&str> {
        self.app_id_read.as_deref()
    }

    pub fn app_id_write(&self) -> Option<&str> {
        self.app_id_write.as_deref()
    }

    /// Resolved user id
    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    /// File the user id was read from, kept for provenance
    pub fn user_id_file(&self) -> Option<&Path> {
        self.user_id_file.as_deref()
    }

    /// Base path of the MFA secrets
    pub fn secrets_path(&self) -> Option<&str> {
        self.secrets_path.as_deref()
    }

    /// Derived Vault client settings
    pub fn client(&self) -> &VaultClientConfig {
        &self.client
    }

    /// Identity to log in with for `access`
    pub fn login(&self, access: SecretAccess) -> Result<VaultLogin> {
        let user_id = self
            .user_id
            .clone()
            .filter(|u| !u.is_empty())
            .ok_or(ConfigError::MissingCredential)?;
        let app_id = match access {
            SecretAccess::Read => self.app_id_read.clone(),
            SecretAccess::Write => self.app_id_write.clone(),
        };
        Ok(VaultLogin { app_id, user_id })
    }
}

/// `TLS` block of the MFA server settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TlsSettings {
    #[serde(rename = "Enabled")]
    pub enabled: bool,
    #[serde(rename = "CertificateFile")]
    pub certificate_file: Option<PathBuf>,
    #[serde(rename = "KeyFile")]
    pub key_file: Option<PathBuf>,
}

/// MFA server settings
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    #[serde(rename = "ListenerSocket")]
    pub(crate) listener_socket: Option<String>,
    #[serde(rename = "TLS")]
    pub(crate) tls: TlsSettings,
    #[serde(rename = "LogFile")]
    pub(crate) log_file: Option<PathBuf>,
    #[serde(rename = "LogLevel")]
    pub(crate) log_level: Option<String>,
    #[serde(skip)]
    pub(crate) loggers: Loggers,
    #[serde(skip)]
    pub(crate) server_tls: Option<ServerTls>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listener_socket: defaults::listener_socket(),
            tls: TlsSettings::default(),
            log_file: None,
            log_level: None,
            loggers: Loggers::discard(),
            server_tls: None,
        }
    }
}

impl ServerConfig {
    pub fn listener_socket(&self) -> Option<&str> {
        self.listener_socket.as_deref()
    }

    pub fn tls(&self) -> &TlsSettings {
        &self.tls
    }

    /// Validated keypair, present once TLS has been configured
    pub fn server_tls(&self) -> Option<&ServerTls> {
        self.server_tls.as_ref()
    }

    /// Log destination, standard output when `None`
    pub fn log_file(&self) -> Option<&Path> {
        self.log_file.as_deref()
    }

    pub fn log_level(&self) -> Option<&str> {
        self.log_level.as_deref()
    }

    pub fn loggers(&self) -> &Loggers {
        &self.loggers
    }
}

/// LDAP settings
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LdapConfig {
    #[serde(rename = "EndPoint")]
    pub(crate) endpoint: Option<String>,
    #[serde(rename = "TrustCACert")]
    pub(crate) trust_ca_cert: Option<PathBuf>,
    #[serde(rename = "UserDN")]
    pub(crate) user_dn: Option<String>,
    #[serde(rename = "AdminGroupDN")]
    pub(crate) admin_group_dn: Option<String>,
    #[serde(rename = "AdminGroupMembershipAttribute")]
    pub(crate) admin_membership_attr: Option<String>,
    #[serde(rename = "AdminGroupMemberDNFormat")]
    pub(crate) admin_member_dn_format: Option<String>,
    #[serde(skip)]
    pub(crate) connection: Option<DirectoryConnection>,
}

impl LdapConfig {
    /// Raw endpoint string
    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }

    pub fn trust_ca_cert(&self) -> Option<&Path> {
        self.trust_ca_cert.as_deref()
    }

    pub fn user_dn(&self) -> Option<&str> {
        self.user_dn.as_deref()
    }

    pub fn admin_group_dn(&self) -> Option<&str> {
        self.admin_group_dn.as_deref()
    }

    pub fn admin_membership_attr(&self) -> Option<&str> {
        self.admin_membership_attr.as_deref()
    }

    pub fn admin_member_dn_format(&self) -> Option<&str> {
        self.admin_member_dn_format.as_deref()
    }

    /// Connection descriptor built from the endpoint
    pub fn connection(&self) -> Option<&DirectoryConnection> {
        self.connection.as_ref()
    }

    /// DN of `username` as it appears in the admin group's member attribute
    pub fn admin_member_dn(&self, username: &str) -> Option<String> {
        self.admin_member_dn_format
            .as_deref()
            .map(|format| format.replace(defaults::USERNAME_PLACEHOLDER, username))
    }

    /// Bind DN for `username` when the user DN is a template
    pub fn user_bind_dn(&self, username: &str) -> Option<String> {
        self.user_dn
            .as_deref()
            .map(|dn| dn.replace(defaults::USERNAME_PLACEHOLDER, username))
    }
}
