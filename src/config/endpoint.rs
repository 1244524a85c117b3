//! LDAP endpoint parsing
//!
//! Endpoints have the form `scheme://host[:port]` with `ldap` for plaintext
//! and `ldaps` for TLS. A missing port falls back to 389 or 636.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use log::debug;
use openssl::ssl::SslConnector;

use crate::common::{ConfigError, Result};
use crate::config::defaults::{LDAPS_PORT, LDAP_PORT};
use crate::tls::TrustStore;

/// Transport named by the endpoint scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LdapScheme {
    /// `ldap://`
    Plain,
    /// `ldaps://`
    Tls,
}

impl LdapScheme {
    fn prefix(&self) -> &'static str {
        match self {
            Self::Plain => "ldap://",
            Self::Tls => "ldaps://",
        }
    }

    /// Port used when the endpoint names none
    pub fn default_port(&self) -> u16 {
        match self {
            Self::Plain => LDAP_PORT,
            Self::Tls => LDAPS_PORT,
        }
    }
}

/// Parsed `scheme://host[:port]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LdapEndpoint {
    pub scheme: LdapScheme,
    pub host: String,
    pub port: u16,
}

impl FromStr for LdapEndpoint {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let invalid = |reason: &str| ConfigError::InvalidEndpoint(format!("{}: {}", reason, s));

        let (scheme, rest) = [LdapScheme::Tls, LdapScheme::Plain]
            .into_iter()
            .find_map(|scheme| s.strip_prefix(scheme.prefix()).map(|rest| (scheme, rest)))
            .ok_or_else(|| invalid("invalid protocol in LDAP endpoint"))?;

        // The port follows the last colon, unless that colon sits inside a
        // bracketed IPv6 literal.
        let port_split = match rest.rfind(':') {
            Some(i) if !rest[i..].contains(']') => Some(i),
            _ => None,
        };

        let (host, port) = match port_split {
            Some(i) => {
                let port = rest[i + 1..]
                    .parse::<u16>()
                    .ok()
                    .filter(|port| *port != 0)
                    .ok_or_else(|| invalid("invalid port in LDAP endpoint"))?;
                (&rest[..i], port)
            }
            None => (rest, scheme.default_port()),
        };

        if host.is_empty() || host.contains('/') {
            return Err(invalid("invalid host in LDAP endpoint"));
        }

        Ok(Self {
            scheme,
            host: host.to_string(),
            port,
        })
    }
}

impl fmt::Display for LdapEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}:{}", self.scheme.prefix(), self.host, self.port)
    }
}

/// Connection descriptor handed to the LDAP client
///
/// No network connection is opened here.
#[derive(Debug, Clone)]
pub struct DirectoryConnection {
    host: String,
    port: u16,
    trust: Option<TrustStore>,
}

impl DirectoryConnection {
    /// Parse `endpoint` and attach CA trust for `ldaps`
    ///
    /// `ca` is required for `ldaps` endpoints and ignored otherwise.
    pub fn new(endpoint: &str, ca: Option<&Path>) -> Result<Self> {
        let endpoint: LdapEndpoint = endpoint.parse()?;

        let trust = match endpoint.scheme {
            LdapScheme::Tls => {
                let ca = ca.ok_or(ConfigError::MissingValue("LDAP.TrustCACert"))?;
                Some(TrustStore::from_pem_file(ca)?)
            }
            LdapScheme::Plain => None,
        };

        debug!("LDAP connection descriptor for {}", endpoint);

        Ok(Self {
            host: endpoint.host,
            port: endpoint.port,
            trust,
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Whether the connection is TLS protected
    pub fn is_tls(&self) -> bool {
        self.trust.is_some()
    }

    /// CA trust for `ldaps` connections
    pub fn trust(&self) -> Option<&TrustStore> {
        self.trust.as_ref()
    }

    /// `host:port` for dialing
    pub fn address(&self) -> String {
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }

    /// TLS connector for `ldaps` connections, `None` for plaintext
    pub fn connector(&self) -> Result<Option<SslConnector>> {
        self.trust.as_ref().map(TrustStore::connector).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tls::test_support::write_pair;

    fn parse(s: &str) -> LdapEndpoint {
        s.parse().unwrap()
    }

    #[test]
    fn test_default_ports() {
        let plain = parse("ldap://directory.example.com");
        assert_eq!(plain.scheme, LdapScheme::Plain);
        assert_eq!(plain.host, "directory.example.com");
        assert_eq!(plain.port, 389);

        let tls = parse("ldaps://directory.example.com");
        assert_eq!(tls.scheme, LdapScheme::Tls);
        assert_eq!(tls.port, 636);
    }

    #[test]
    fn test_explicit_port() {
        let endpoint = parse("ldap://host:1234");
        assert_eq!(endpoint.host, "host");
        assert_eq!(endpoint.port, 1234);
        assert_eq!(endpoint.to_string(), "ldap://host:1234");

        assert_eq!(parse("ldaps://10.0.0.5:3269").port, 3269);
    }

    #[test]
    fn test_ipv6_hosts() {
        let bare = parse("ldaps://[::1]");
        assert_eq!(bare.host, "[::1]");
        assert_eq!(bare.port, 636);

        let with_port = parse("ldap://[fe80::1]:10389");
        assert_eq!(with_port.host, "[fe80::1]");
        assert_eq!(with_port.port, 10389);
    }

    #[test]
    fn test_unknown_scheme() {
        for s in ["http://host", "host:389", "LDAP://host", "", "ldap:/host"] {
            assert!(
                matches!(s.parse::<LdapEndpoint>(), Err(ConfigError::InvalidEndpoint(_))),
                "{:?} should be rejected",
                s
            );
        }
    }

    #[test]
    fn test_malformed_port() {
        for s in ["ldap://host:abc", "ldap://host:", "ldap://host:70000", "ldaps://host:0", "ldap://host:389/"] {
            match s.parse::<LdapEndpoint>() {
                Err(ConfigError::InvalidEndpoint(msg)) => assert!(msg.contains(s)),
                other => panic!("{:?} should be rejected, got {:?}", s, other),
            }
        }
    }

    #[test]
    fn test_missing_host() {
        assert!(matches!("ldap://".parse::<LdapEndpoint>(), Err(ConfigError::InvalidEndpoint(_))));
        assert!(matches!("ldaps://:636".parse::<LdapEndpoint>(), Err(ConfigError::InvalidEndpoint(_))));
    }

    #[test]
    fn test_plain_connection_ignores_ca() {
        let conn = DirectoryConnection::new("ldap://host", Some(Path::new("/no/such/ca.pem"))).unwrap();
        assert!(!conn.is_tls());
        assert_eq!(conn.address(), "host:389");
        assert!(conn.connector().unwrap().is_none());
    }

    #[test]
    fn test_tls_connection() {
        let dir = tempfile::tempdir().unwrap();
        let (ca, _) = write_pair(dir.path(), "ldap-ca");
        let conn = DirectoryConnection::new("ldaps://host", Some(&ca)).unwrap();
        assert!(conn.is_tls());
        assert_eq!(conn.port(), 636);
        assert_eq!(conn.trust().unwrap().source(), Some(ca.as_path()));
        assert!(conn.connector().unwrap().is_some());
    }

    #[test]
    fn test_tls_connection_requires_ca() {
        assert!(matches!(
            DirectoryConnection::new("ldaps://host", None),
            Err(ConfigError::MissingValue("LDAP.TrustCACert"))
        ));
    }
}
