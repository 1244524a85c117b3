//! Server-side TLS keypair validation

use std::path::{Path, PathBuf};

use log::{debug, info};
use openssl::error::ErrorStack;
use openssl::ssl::{SslAcceptor, SslAcceptorBuilder, SslFiletype, SslMethod};

use crate::common::{ConfigError, Result};
use super::pem;

/// Validated certificate and key paths for the MFA listener
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerTls {
    cert_path: PathBuf,
    key_path: PathBuf,
}

impl ServerTls {
    /// Validate a certificate/key pair
    ///
    /// Both files must hold exactly one PEM block and the key must belong to
    /// the certificate. Failures name the files but never include their
    /// contents.
    pub fn validate(cert_path: &Path, key_path: &Path) -> Result<Self> {
        pem::validate_file(cert_path)?;
        pem::validate_file(key_path)?;

        load_pair(cert_path, key_path).map_err(|source| ConfigError::InvalidKeyPair {
            cert: cert_path.to_path_buf(),
            key: key_path.to_path_buf(),
            source,
        })?;

        debug!(
            "Validated TLS key pair {} / {}",
            cert_path.display(),
            key_path.display()
        );

        Ok(Self {
            cert_path: cert_path.to_path_buf(),
            key_path: key_path.to_path_buf(),
        })
    }

    /// Certificate file
    pub fn cert_path(&self) -> &Path {
        &self.cert_path
    }

    /// Private key file
    pub fn key_path(&self) -> &Path {
        &self.key_path
    }

    /// Build an acceptor for the listener from the validated pair
    pub fn acceptor(&self) -> Result<SslAcceptor> {
        let acceptor = load_pair(&self.cert_path, &self.key_path).map_err(|source| {
            ConfigError::InvalidKeyPair {
                cert: self.cert_path.clone(),
                key: self.key_path.clone(),
                source,
            }
        })?;
        info!("TLS acceptor ready with certificate {}", self.cert_path.display());
        Ok(acceptor.build())
    }
}

fn load_pair(cert_path: &Path, key_path: &Path) -> std::result::Result<SslAcceptorBuilder, ErrorStack> {
    let mut acceptor = SslAcceptor::mozilla_intermediate_v5(SslMethod::tls())?;
    acceptor.set_certificate_file(cert_path, SslFiletype::PEM)?;
    acceptor.set_private_key_file(key_path, SslFiletype::PEM)?;
    acceptor.check_private_key()?;
    Ok(acceptor)
}
