//! File system helpers
//!
//! Every read done while bootstrapping goes through here so that IO failures
//! always carry the offending path.

use std::fs::{self, File, OpenOptions};
use std::path::Path;

use serde::de::DeserializeOwned;

use super::error::{ConfigError, Result};

/// Read a file fully
pub fn read_file(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Read a file and deserialize it as JSON
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let data = read_file(path)?;
    serde_json::from_slice(&data).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Open a file for appending, creating it when missing
pub fn open_append(path: &Path) -> Result<File> {
    let mut options = OpenOptions::new();
    options.create(true).append(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o664);
    }

    options.open(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}
