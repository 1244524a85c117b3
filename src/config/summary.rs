//! Configuration summary
//!
//! Written through the configured Info sink. User ids and key material are
//! never included; only whether they are set and where they came from.

use crate::config::types::Configuration;

impl Configuration {
    /// Log the configuration through the Info sink
    pub fn log_summary(&self) {
        let out = self.loggers().info();
        if !out.is_active() {
            return;
        }

        let vault = self.vault();
        let server = self.server();
        let ldap = self.ldap();

        out.log(format_args!("=== MFA Server Configuration ==="));

        out.log(format_args!("Vault:"));
        out.log(format_args!("  Address: {}", vault.client().address()));
        out.log(format_args!("  Timeout: {}s", vault.client().timeout().as_secs()));
        if let Some(source) = vault.client().trust().and_then(|t| t.source()) {
            out.log(format_args!("  Trusted CA: {}", source.display()));
        } else if vault.client().trust().is_some() {
            out.log(format_args!("  Trusted CA: supplied certificate"));
        }
        out.log(format_args!("  Secrets path: {}", vault.secrets_path().unwrap_or("<unset>")));
        let user_id_source = match (vault.user_id(), vault.user_id_file()) {
            (Some(_), Some(file)) => format!("from {}", file.display()),
            (Some(_), None) => "inline".to_string(),
            (None, _) => "<unset>".to_string(),
        };
        out.log(format_args!("  User id: {}", user_id_source));
        out.log(format_args!(
            "  App ids: read {}, write {}",
            set_or_unset(vault.app_id_read()),
            set_or_unset(vault.app_id_write())
        ));

        out.log(format_args!("MFA server:"));
        out.log(format_args!("  Listener: {}", server.listener_socket().unwrap_or("<unset>")));
        match server.server_tls() {
            Some(tls) => out.log(format_args!(
                "  TLS: enabled, certificate {}",
                tls.cert_path().display()
            )),
            None => out.log(format_args!("  TLS: disabled")),
        }
        match server.log_file() {
            Some(path) => out.log(format_args!("  Log file: {}", path.display())),
            None => out.log(format_args!("  Log file: <stdout>")),
        }
        out.log(format_args!("  Log level: {}", server.log_level().unwrap_or("<unset>")));

        out.log(format_args!("LDAP:"));
        match ldap.connection() {
            Some(conn) => out.log(format_args!(
                "  Connection: {} ({})",
                conn.address(),
                if conn.is_tls() { "TLS" } else { "plaintext" }
            )),
            None => out.log(format_args!("  Connection: <not configured>")),
        }
        if let Some(dn) = ldap.user_dn() {
            out.log(format_args!("  User DN: {}", dn));
        }
        if let Some(group) = ldap.admin_group_dn() {
            out.log(format_args!(
                "  Admin group: {} ({})",
                group,
                ldap.admin_membership_attr().unwrap_or("<no attribute>")
            ));
        }

        out.log(format_args!("================================"));
    }
}

fn set_or_unset(value: Option<&str>) -> &'static str {
    if value.is_some() {
        "set"
    } else {
        "unset"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::logging::tests::Capture;
    use crate::config::logging::{LogLevel, Loggers};

    #[test]
    fn test_summary_redacts_user_id() {
        let capture = Capture::default();
        let mut config = Configuration::default();
        config.with_vault_user_id("s3cret-user").with_vault_app_id_read("app-read-id");
        config.server.loggers = Loggers::with_writer(LogLevel::Info, Box::new(capture.clone()));

        config.log_summary();

        let text = capture.text();
        assert!(text.contains("Address: https://127.0.0.1:8200"));
        assert!(text.contains("Timeout: 60s"));
        assert!(text.contains("User id: inline"));
        assert!(text.contains("read set, write unset"));
        assert!(text.contains("TLS: disabled"));
        assert!(!text.contains("s3cret-user"));
        assert!(!text.contains("app-read-id"));
    }

    #[test]
    fn test_summary_silent_below_info() {
        let capture = Capture::default();
        let mut config = Configuration::default();
        config.server.loggers = Loggers::with_writer(LogLevel::Warning, Box::new(capture.clone()));
        config.log_summary();
        assert!(capture.text().is_empty());
    }
}
