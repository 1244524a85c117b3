//! Configuration loading pipeline
//!
//! ```text
//! defaults
//!     → JSON document overlay
//!     → leveled loggers
//!     → Vault address and CA trust
//!     → Vault user id
//!     → MFA server TLS (only when enabled)
//!     → LDAP connection descriptor and admin group settings
//! ```
//!
//! The first failing step aborts the load; its error is wrapped with the step
//! name.

use std::path::Path;

use log::{debug, info, warn};

use crate::common::{read_json, ConfigError, LoadStep, Result};
use crate::config::builder::check_admin_settings;
use crate::config::credential::resolve_user_id;
use crate::config::endpoint::DirectoryConnection;
use crate::config::logging::{LogLevel, Loggers};
use crate::config::types::Configuration;
use crate::tls::TrustStore;

impl Configuration {
    /// Load, validate and materialize the configuration at `path`
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading MFA configuration from {}", path.display());

        let mut config: Configuration =
            read_json(path).map_err(ConfigError::at(LoadStep::Document))?;
        debug!("Parsed configuration document {}", path.display());

        config
            .configure_logging()
            .map_err(ConfigError::at(LoadStep::Logging))?;
        config
            .configure_vault_connection()
            .map_err(ConfigError::at(LoadStep::VaultConnection))?;
        config
            .configure_vault_credential()
            .map_err(ConfigError::at(LoadStep::VaultCredential))?;
        if config.server.tls.enabled {
            config
                .configure_server_tls()
                .map_err(ConfigError::at(LoadStep::ServerTls))?;
        }
        config
            .configure_ldap()
            .map_err(ConfigError::at(LoadStep::LdapConnection))?;

        info!("MFA configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Build the leveled loggers from the current log file and level
    pub(crate) fn build_loggers(&self) -> Result<Loggers> {
        let level: LogLevel = self
            .server
            .log_level
            .as_deref()
            .ok_or_else(|| ConfigError::InvalidLogLevel(String::new()))?
            .parse()?;
        Loggers::open(self.server.log_file.as_deref(), level)
    }

    fn configure_logging(&mut self) -> Result<()> {
        self.server.loggers = self.build_loggers()?;
        Ok(())
    }

    fn configure_vault_connection(&mut self) -> Result<()> {
        match self.vault.connection.endpoint.clone() {
            Some(endpoint) => self.vault.client.set_address(endpoint),
            None => warn!(
                "No Vault endpoint configured, using {}",
                self.vault.client.address()
            ),
        }

        if let Some(ca) = self.vault.connection.trust_ca_cert.clone() {
            let trust = TrustStore::from_pem_file(&ca)?;
            self.vault.client.set_trust(trust);
        }
        Ok(())
    }

    fn configure_vault_credential(&mut self) -> Result<()> {
        let user_id = resolve_user_id(
            self.vault.user_id.as_deref(),
            self.vault.user_id_file.as_deref(),
        )?;
        self.vault.user_id = Some(user_id);
        Ok(())
    }

    fn configure_server_tls(&mut self) -> Result<()> {
        let cert = self
            .server
            .tls
            .certificate_file
            .clone()
            .ok_or(ConfigError::MissingValue("MFAServer.TLS.CertificateFile"))?;
        let key = self
            .server
            .tls
            .key_file
            .clone()
            .ok_or(ConfigError::MissingValue("MFAServer.TLS.KeyFile"))?;
        self.with_server_tls(cert, key)?;
        Ok(())
    }

    fn configure_ldap(&mut self) -> Result<()> {
        let endpoint = self
            .ldap
            .endpoint
            .as_deref()
            .ok_or(ConfigError::MissingValue("LDAP.EndPoint"))?;
        let connection = DirectoryConnection::new(endpoint, self.ldap.trust_ca_cert.as_deref())?;

        let ldap = &self.ldap;
        let admin = [
            &ldap.admin_group_dn,
            &ldap.admin_membership_attr,
            &ldap.admin_member_dn_format,
        ];
        if admin.iter().any(|field| field.is_some()) {
            check_admin_settings(
                ldap.admin_group_dn.as_deref().unwrap_or_default(),
                ldap.admin_membership_attr.as_deref().unwrap_or_default(),
                ldap.admin_member_dn_format.as_deref().unwrap_or_default(),
            )?;
        }

        self.ldap.connection = Some(connection);
        Ok(())
    }
}
