//! Explicit trust stores for outbound TLS
//!
//! A [`TrustStore`] holds exactly the CA certificates it was built from. The
//! connectors it produces never fall back to the system roots.

use std::path::{Path, PathBuf};

use log::debug;
use openssl::ssl::{SslConnector, SslMethod};
use openssl::x509::store::{X509Store, X509StoreBuilder};
use openssl::x509::X509;

use crate::common::{ConfigError, Result};
use super::pem;

/// CA certificates trusted for one outbound connection
#[derive(Debug, Clone)]
pub struct TrustStore {
    certs: Vec<X509>,
    source: Option<PathBuf>,
}

impl TrustStore {
    /// Build a trust store from a PEM file holding one CA certificate
    pub fn from_pem_file(path: &Path) -> Result<Self> {
        let data = pem::validate_file(path)?;
        let cert = X509::from_pem(&data).map_err(|e| {
            ConfigError::InvalidCertificate(format!(
                "could not decode certificate in {}: {}",
                path.display(),
                e
            ))
        })?;

        debug!("Loaded trusted CA {:?} from {}", cert.subject_name(), path.display());

        Ok(Self {
            certs: vec![cert],
            source: Some(path.to_path_buf()),
        })
    }

    /// Build a trust store from a DER encoded certificate
    pub fn from_der(der: &[u8]) -> Result<Self> {
        if der.is_empty() {
            return Err(ConfigError::InvalidCertificate(
                "certificate provided is empty".to_string(),
            ));
        }
        let cert = X509::from_der(der)
            .map_err(|e| ConfigError::InvalidCertificate(format!("could not decode certificate: {}", e)))?;

        Ok(Self {
            certs: vec![cert],
            source: None,
        })
    }

    /// Trusted certificates
    pub fn certificates(&self) -> &[X509] {
        &self.certs
    }

    /// File the store was loaded from, if any
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// OpenSSL certificate store holding only the trusted certificates
    pub fn cert_store(&self) -> Result<X509Store> {
        let mut builder = X509StoreBuilder::new()?;
        for cert in &self.certs {
            builder.add_cert(cert.clone())?;
        }
        Ok(builder.build())
    }

    /// Client connector verifying peers against this store only
    pub fn connector(&self) -> Result<SslConnector> {
        let mut builder = SslConnector::builder(SslMethod::tls_client())?;
        // Replacing the store drops the default verify paths.
        builder.set_cert_store(self.cert_store()?);
        Ok(builder.build())
    }
}
