//! Derived Vault client settings

use std::time::Duration;

use log::debug;

use crate::common::{ConfigError, Result};
use crate::config::defaults;
use crate::tls::TrustStore;

/// Connection parameters handed to the Vault client
#[derive(Debug, Clone)]
pub struct VaultClientConfig {
    address: String,
    trust: Option<TrustStore>,
    timeout: Duration,
}

impl Default for VaultClientConfig {
    fn default() -> Self {
        Self {
            address: defaults::vault_address(),
            trust: None,
            timeout: Duration::from_secs(60),
        }
    }
}

impl VaultClientConfig {
    /// Client configuration for `address` with no explicit trust
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            ..Self::default()
        }
    }

    /// Vault REST endpoint
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Explicit CA trust, `None` means the system roots apply
    pub fn trust(&self) -> Option<&TrustStore> {
        self.trust.as_ref()
    }

    /// Request timeout for the HTTP transport
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Use `timeout` for Vault requests instead of the 60 second default
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub(crate) fn set_address(&mut self, address: String) {
        self.address = address;
    }

    /// Replace any previous trust store
    pub(crate) fn set_trust(&mut self, trust: TrustStore) {
        self.trust = Some(trust);
    }

    /// Build the HTTP transport for Vault
    ///
    /// With a trust store installed only its certificates are accepted as
    /// issuers.
    pub fn http_client(&self) -> Result<reqwest::blocking::Client> {
        let mut builder = reqwest::blocking::Client::builder().timeout(self.timeout);

        if let Some(trust) = &self.trust {
            builder = builder.tls_built_in_root_certs(false);
            for cert in trust.certificates() {
                let pem = cert.to_pem()?;
                let cert = reqwest::Certificate::from_pem(&pem)
                    .map_err(|e| ConfigError::InvalidCertificate(e.to_string()))?;
                builder = builder.add_root_certificate(cert);
            }
            debug!(
                "Vault transport trusts {} certificate(s) from {}",
                trust.certificates().len(),
                trust
                    .source()
                    .map(|path| path.display().to_string())
                    .unwrap_or_else(|| "memory".to_string())
            );
        }

        Ok(builder.build()?)
    }
}

/// Kind of secret access a login is for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretAccess {
    Read,
    Write,
}

/// Identity presented to Vault
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultLogin {
    /// Legacy app id matching the access kind, when configured
    pub app_id: Option<String>,
    /// Resolved user id
    pub user_id: String,
}
