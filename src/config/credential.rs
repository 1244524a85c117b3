//! Vault user id resolution
//!
//! The user id is either inlined in the configuration document or read from a
//! small indirection file of the form `{"UserID": "..."}`.

use std::path::Path;

use log::debug;
use serde::Deserialize;

use crate::common::{read_json, ConfigError, Result};

/// Contents of a user id indirection file
#[derive(Debug, Default, Deserialize)]
pub struct UserIdFile {
    #[serde(rename = "UserID")]
    pub user_id: Option<String>,
}

/// Read the user id out of an indirection file
pub fn read_user_id_file(path: &Path) -> Result<String> {
    let file: UserIdFile = read_json(path)?;
    match file.user_id {
        Some(user_id) if !user_id.is_empty() => Ok(user_id),
        _ => Err(ConfigError::MissingCredential),
    }
}

/// Pick the user id: inline value first, indirection file otherwise
///
/// An empty inline value counts as absent. The file is never opened when an
/// inline value is present.
pub fn resolve_user_id(inline: Option<&str>, file: Option<&Path>) -> Result<String> {
    if let Some(user_id) = inline.filter(|u| !u.is_empty()) {
        debug!("Using inline Vault user id");
        return Ok(user_id.to_string());
    }

    match file {
        Some(path) => {
            debug!("Reading Vault user id from {}", path.display());
            read_user_id_file(path)
        }
        None => Err(ConfigError::MissingCredential),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_inline_wins_without_touching_file() {
        let user = resolve_user_id(Some("alice"), Some(Path::new("/does/not/exist.json"))).unwrap();
        assert_eq!(user, "alice");
    }

    #[test]
    fn test_file_indirection() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("userid.json");
        fs::write(&path, r#"{"UserID":"bob"}"#).unwrap();

        assert_eq!(resolve_user_id(None, Some(&path)).unwrap(), "bob");
        assert_eq!(resolve_user_id(Some(""), Some(&path)).unwrap(), "bob");
    }

    #[test]
    fn test_missing_credential() {
        assert!(matches!(resolve_user_id(None, None), Err(ConfigError::MissingCredential)));
        assert!(matches!(resolve_user_id(Some(""), None), Err(ConfigError::MissingCredential)));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("userid.json");
        fs::write(&path, r#"{"Other":"x"}"#).unwrap();
        assert!(matches!(resolve_user_id(None, Some(&path)), Err(ConfigError::MissingCredential)));
    }

    #[test]
    fn test_file_errors_carry_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        match resolve_user_id(None, Some(&missing)) {
            Err(ConfigError::Io { path, .. }) => assert_eq!(path, missing),
            other => panic!("expected IO error, got {:?}", other),
        }

        let broken = dir.path().join("broken.json");
        fs::write(&broken, "UserID=bob").unwrap();
        match resolve_user_id(None, Some(&broken)) {
            Err(ConfigError::Parse { path, .. }) => assert_eq!(path, broken),
            other => panic!("expected parse error, got {:?}", other),
        }
    }
}
