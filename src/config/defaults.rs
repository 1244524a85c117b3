//! Default configuration values
//!
//! Single source of truth for the values a configuration starts from before
//! the document is read.

/// Default Vault path under which MFA secrets are stored
pub const SECRETS_PATH_STR: &str = "secret/mfa";

/// Default listener socket for the MFA server
pub const LISTENER_SOCKET_STR: &str = "0.0.0.0:8443";

/// Vault address used when the document does not name one
pub const VAULT_ADDRESS_STR: &str = "https://127.0.0.1:8200";

/// Default port for `ldap://` endpoints
pub const LDAP_PORT: u16 = 389;

/// Default port for `ldaps://` endpoints
pub const LDAPS_PORT: u16 = 636;

/// Placeholder substituted with the user name in DN templates
pub const USERNAME_PLACEHOLDER: &str = "{username}";

/// Default secrets path
pub fn secrets_path() -> Option<String> {
    Some(SECRETS_PATH_STR.to_string())
}

/// Default listener socket
pub fn listener_socket() -> Option<String> {
    Some(LISTENER_SOCKET_STR.to_string())
}

/// Default Vault address
pub fn vault_address() -> String {
    VAULT_ADDRESS_STR.to_string()
}
