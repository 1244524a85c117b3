//! Common module
//!
//! This module contains the error type and file helpers shared by the
//! configuration pipeline.

pub mod error;
pub mod fs;
pub mod log;

// Re-export commonly used types and functions
pub use error::{ConfigError, LoadStep, Result};
pub use fs::{open_append, read_file, read_json};
pub use log::init_logger;
