//! Error types for the persistence layer.
//!
//! Callers treat [`SaveError::Unavailable`] and [`SaveError::Corrupt`] as
//! recoverable: the usual response is to start a new game.

/// Errors that can occur while saving or loading a game.
#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    /// The storage medium cannot be used or a write to it failed.
    #[error("save storage unavailable: {reason}")]
    Unavailable {
        /// Why the store could not be used.
        reason: String,
    },

    /// A read or delete on an otherwise available store failed.
    #[error("save I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A snapshot could not be serialized.
    #[error("save serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A stored blob could not be decoded.
    #[error("corrupt save: {reason}")]
    Corrupt {
        /// What was wrong with the blob.
        reason: String,
    },

    /// The blob was written by a newer, incompatible format.
    #[error("unsupported save format version {found} (expected {expected})")]
    UnsupportedVersion {
        /// Version found in the blob.
        found: u32,
        /// Version this build writes.
        expected: u32,
    },

    /// A key contains characters a store cannot represent.
    #[error("invalid save key: {0:?}")]
    InvalidKey(String),
}
