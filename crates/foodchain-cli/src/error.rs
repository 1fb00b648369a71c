//! Error types for the command-line runner.

/// Top-level error for the `foodchain` binary.
///
/// Wraps each subsystem error so `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: foodchain_core::config::ConfigError,
    },

    /// The game session failed.
    #[error("session error: {source}")]
    Session {
        /// The underlying session error.
        #[from]
        source: foodchain_core::SessionError,
    },

    /// The log subscriber could not be installed.
    #[error("logging error: {message}")]
    Logging {
        /// Description of the failure.
        message: String,
    },
}
