//! TLS handling module
//!
//! PEM framing checks, explicit CA trust stores for the Vault and LDAP
//! clients, and keypair validation for the MFA listener.

mod acceptor;
pub mod pem;
mod trust;

#[cfg(test)]
pub(crate) mod test_support;

pub use acceptor::ServerTls;
pub use trust::TrustStore;
