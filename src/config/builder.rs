//! Configuration mutators
//!
//! Each `with_*` call validates the new value first and only then replaces
//! the affected fields, so a failed call leaves the configuration exactly as
//! it was. Mutators take `&mut self`; callers sharing a configuration across
//! threads must wrap it in their own lock.

use std::net::ToSocketAddrs;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::common::{ConfigError, Result};
use crate::config::credential::read_user_id_file;
use crate::config::defaults::USERNAME_PLACEHOLDER;
use crate::config::endpoint::DirectoryConnection;
use crate::config::logging::LogLevel;
use crate::config::types::Configuration;
use crate::config::vault::VaultClientConfig;
use crate::tls::{ServerTls, TrustStore};

impl Configuration {
    /// Use `user_id` as the Vault user id
    pub fn with_vault_user_id(&mut self, user_id: impl Into<String>) -> &mut Self {
        self.vault.user_id = Some(user_id.into());
        self.vault.user_id_file = None;
        self
    }

    /// Read the Vault user id from an indirection file
    pub fn with_vault_user_id_file(&mut self, path: impl Into<PathBuf>) -> Result<&mut Self> {
        let path = path.into();
        let user_id = read_user_id_file(&path)?;
        self.vault.user_id = Some(user_id);
        self.vault.user_id_file = Some(path);
        Ok(self)
    }

    pub fn with_vault_app_id_read(&mut self, app_id: impl Into<String>) -> &mut Self {
        self.vault.app_id_read = Some(app_id.into());
        self
    }

    pub fn with_vault_app_id_write(&mut self, app_id: impl Into<String>) -> &mut Self {
        self.vault.app_id_write = Some(app_id.into());
        self
    }

    /// Point the Vault client at `endpoint`
    pub fn with_vault_endpoint(&mut self, endpoint: impl Into<String>) -> &mut Self {
        let endpoint = endpoint.into();
        self.vault.connection.endpoint = Some(endpoint.clone());
        self.vault.client.set_address(endpoint);
        self
    }

    pub fn with_vault_secrets_path(&mut self, path: impl Into<String>) -> &mut Self {
        self.vault.secrets_path = Some(path.into());
        self
    }

    /// Replace the derived Vault client settings wholesale
    ///
    /// The connection block follows the new client's address and trust source.
    pub fn with_vault_client_config(&mut self, client: VaultClientConfig) -> &mut Self {
        self.vault.connection.endpoint = Some(client.address().to_string());
        self.vault.connection.trust_ca_cert =
            client.trust().and_then(TrustStore::source).map(Path::to_path_buf);
        self.vault.client = client;
        self
    }

    /// Trust only the given DER encoded CA certificate for Vault
    pub fn with_vault_ca_cert(&mut self, der: &[u8]) -> Result<&mut Self> {
        let trust = TrustStore::from_der(der)?;
        self.vault.client.set_trust(trust);
        self.vault.connection.trust_ca_cert = None;
        Ok(self)
    }

    /// Trust only the CA certificate in `path` for Vault
    pub fn with_vault_ca_file(&mut self, path: impl Into<PathBuf>) -> Result<&mut Self> {
        let path = path.into();
        let trust = TrustStore::from_pem_file(&path)?;
        self.vault.client.set_trust(trust);
        self.vault.connection.trust_ca_cert = Some(path);
        Ok(self)
    }

    /// Listen on `socket`, which must resolve as a TCP address
    pub fn with_listener_socket(&mut self, socket: impl Into<String>) -> Result<&mut Self> {
        let socket = socket.into();
        let resolves = socket
            .to_socket_addrs()
            .map(|mut addrs| addrs.next().is_some())
            .unwrap_or(false);
        if !resolves {
            return Err(ConfigError::InvalidListener(socket));
        }
        self.server.listener_socket = Some(socket);
        Ok(self)
    }

    /// Enable TLS on the MFA listener with a validated keypair
    pub fn with_server_tls(
        &mut self,
        cert: impl Into<PathBuf>,
        key: impl Into<PathBuf>,
    ) -> Result<&mut Self> {
        let cert = cert.into();
        let key = key.into();
        let server_tls = ServerTls::validate(&cert, &key)?;

        self.server.tls.enabled = true;
        self.server.tls.certificate_file = Some(cert);
        self.server.tls.key_file = Some(key);
        self.server.server_tls = Some(server_tls);
        Ok(self)
    }

    /// Change the log level and rebind the leveled loggers
    pub fn with_log_level(&mut self, level: &str) -> Result<&mut Self> {
        let parsed: LogLevel = level.parse()?;
        let previous = self.server.log_level.replace(parsed.to_string());

        match self.build_loggers() {
            Ok(loggers) => {
                self.server.loggers = loggers;
                info!("Log level set to {}", parsed);
                Ok(self)
            }
            Err(e) => {
                self.server.log_level = previous;
                Err(e)
            }
        }
    }

    /// Change the log destination and rebind the leveled loggers
    ///
    /// The current log level must already be set.
    pub fn with_log_file(&mut self, path: impl Into<PathBuf>) -> Result<&mut Self> {
        let previous = self.server.log_file.replace(path.into());

        match self.build_loggers() {
            Ok(loggers) => {
                self.server.loggers = loggers;
                Ok(self)
            }
            Err(e) => {
                self.server.log_file = previous;
                Err(e)
            }
        }
    }

    /// Replace the LDAP endpoint, CA trust and user DN
    ///
    /// `ca` is only read for `ldaps` endpoints.
    pub fn with_ldap_connection(
        &mut self,
        endpoint: impl Into<String>,
        ca: Option<PathBuf>,
        user_dn: impl Into<String>,
    ) -> Result<&mut Self> {
        let endpoint = endpoint.into();
        let connection = DirectoryConnection::new(&endpoint, ca.as_deref())?;
        debug!("LDAP endpoint set to {}", endpoint);

        self.ldap.endpoint = Some(endpoint);
        self.ldap.trust_ca_cert = ca;
        self.ldap.user_dn = Some(user_dn.into());
        self.ldap.connection = Some(connection);
        Ok(self)
    }

    /// Set the admin group used for authorization checks
    ///
    /// `member_dn_format` must contain `{username}`.
    pub fn with_ldap_admin_settings(
        &mut self,
        group_dn: impl Into<String>,
        membership_attr: impl Into<String>,
        member_dn_format: impl Into<String>,
    ) -> Result<&mut Self> {
        let group_dn = group_dn.into();
        let membership_attr = membership_attr.into();
        let member_dn_format = member_dn_format.into();
        check_admin_settings(&group_dn, &membership_attr, &member_dn_format)?;

        self.ldap.admin_group_dn = Some(group_dn);
        self.ldap.admin_membership_attr = Some(membership_attr);
        self.ldap.admin_member_dn_format = Some(member_dn_format);
        Ok(self)
    }
}

/// Check an admin group triple; the member DN format must contain `{username}`
pub(crate) fn check_admin_settings(
    group_dn: &str,
    membership_attr: &str,
    member_dn_format: &str,
) -> Result<()> {
    if !member_dn_format.contains(USERNAME_PLACEHOLDER) {
        return Err(ConfigError::InvalidAdminSettings(format!(
            "member DN format '{}' does not contain {}",
            member_dn_format, USERNAME_PLACEHOLDER
        )));
    }
    if group_dn.is_empty() || membership_attr.is_empty() {
        return Err(ConfigError::InvalidAdminSettings(
            "admin group DN and membership attribute must not be empty".to_string(),
        ));
    }
    Ok(())
}
