//! Diagnostic logging for the bootstrap itself
//!
//! The configured MFA server sinks live in `config::logging`; this is the
//! `env_logger` backend for the `log` macros used while the configuration is
//! still being assembled.

/// Initialize the diagnostic logger
///
/// `RUST_LOG` takes precedence over `level`.
pub fn init_logger(level: &str) {
    let env = env_logger::Env::default()
        .filter_or("RUST_LOG", level);

    // A second initialization (tests, embedding) keeps the first logger.
    let _ = env_logger::Builder::from_env(env).try_init();
}
