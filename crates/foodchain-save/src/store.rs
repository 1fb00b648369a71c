//! Key-value stores that hold encoded save blobs.
//!
//! The game never cares where a save lives; it hands a byte blob to a
//! [`SaveStore`] under a key and asks for it back later.
//!
//! | Store | Medium |
//! |---|---|
//! | [`MemorySaveStore`] | In-process map (tests, embedding front-ends) |
//! | [`FileSaveStore`] | One `<key>.json` file per key in a directory |

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::SaveError;

/// Storage for encoded save blobs.
pub trait SaveStore {
    /// Store `blob` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`SaveError`] if the store cannot persist the blob.
    fn write(&mut self, key: &str, blob: &[u8]) -> Result<(), SaveError>;

    /// Fetch the blob stored under `key`, or `None` if there is none.
    ///
    /// # Errors
    ///
    /// Returns [`SaveError`] if the store cannot be read.
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, SaveError>;

    /// Delete the blob under `key`. Returns `true` if something was deleted.
    ///
    /// # Errors
    ///
    /// Returns [`SaveError`] if the store cannot be modified.
    fn delete(&mut self, key: &str) -> Result<bool, SaveError>;
}

/// Keys are restricted to `[A-Za-z0-9_-]` so every store can represent them.
fn validate_key(key: &str) -> Result<(), SaveError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(SaveError::InvalidKey(key.to_owned()))
    }
}

// ---------------------------------------------------------------------------
// In-memory
// ---------------------------------------------------------------------------

/// A save store backed by a map.
#[derive(Debug, Clone, Default)]
pub struct MemorySaveStore {
    blobs: BTreeMap<String, Vec<u8>>,
}

impl MemorySaveStore {
    /// Create an empty store.
    pub const fn new() -> Self {
        Self {
            blobs: BTreeMap::new(),
        }
    }

    /// Number of stored blobs.
    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }
}

impl SaveStore for MemorySaveStore {
    fn write(&mut self, key: &str, blob: &[u8]) -> Result<(), SaveError> {
        validate_key(key)?;
        self.blobs.insert(key.to_owned(), blob.to_vec());
        Ok(())
    }

    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, SaveError> {
        validate_key(key)?;
        Ok(self.blobs.get(key).cloned())
    }

    fn delete(&mut self, key: &str) -> Result<bool, SaveError> {
        validate_key(key)?;
        Ok(self.blobs.remove(key).is_some())
    }
}

// ---------------------------------------------------------------------------
// Files
// ---------------------------------------------------------------------------

/// A save store that keeps one JSON file per key in a directory.
///
/// Writes go to a temporary sibling file that is then renamed over the
/// target, so a crash mid-write never leaves a truncated save behind.
#[derive(Debug, Clone)]
pub struct FileSaveStore {
    directory: PathBuf,
}

impl FileSaveStore {
    /// Use `directory` for saves. It is created on first write.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    /// The directory holding the save files.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, SaveError> {
        validate_key(key)?;
        Ok(self.directory.join(format!("{key}.json")))
    }
}

impl SaveStore for FileSaveStore {
    fn write(&mut self, key: &str, blob: &[u8]) -> Result<(), SaveError> {
        let path = self.path_for(key)?;
        std::fs::create_dir_all(&self.directory).map_err(|e| SaveError::Unavailable {
            reason: format!("cannot create {}: {e}", self.directory.display()),
        })?;

        let temp = path.with_extension("json.tmp");
        if let Err(e) = std::fs::write(&temp, blob).and_then(|()| std::fs::rename(&temp, &path)) {
            let _ = std::fs::remove_file(&temp);
            return Err(SaveError::Unavailable {
                reason: format!("cannot write {}: {e}", path.display()),
            });
        }

        debug!(path = %path.display(), bytes = blob.len(), "Save written");
        Ok(())
    }

    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, SaveError> {
        let path = self.path_for(key)?;
        match std::fs::read(&path) {
            Ok(blob) => Ok(Some(blob)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(SaveError::Io(e)),
        }
    }

    fn delete(&mut self, key: &str) -> Result<bool, SaveError> {
        let path = self.path_for(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(SaveError::Io(e)),
        }
    }
}
