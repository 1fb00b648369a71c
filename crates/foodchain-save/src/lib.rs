//! Save-game persistence for the Foodchain game.
//!
//! The engine treats storage as an opaque key-value collaborator: a
//! [`SessionSnapshot`] is wrapped in a versioned JSON envelope and handed
//! to a [`SaveStore`].
//!
//! # Modules
//!
//! - [`envelope`] -- Versioned save format, encode/decode, store helpers
//! - [`store`] -- [`SaveStore`] trait with memory and file implementations
//! - [`error`] -- [`SaveError`]
//!
//! [`SessionSnapshot`]: foodchain_types::SessionSnapshot

pub mod envelope;
pub mod error;
pub mod store;

pub use envelope::{
    SAVE_FORMAT_VERSION, SaveEnvelope, decode, encode, load_snapshot, save_snapshot,
};
pub use error::SaveError;
pub use store::{FileSaveStore, MemorySaveStore, SaveStore};
