//! The versioned save format.
//!
//! A save blob is JSON of the form
//!
//! ```text
//! { "version": 1, "savedAt": "<RFC 3339>", "state": { <SessionSnapshot> } }
//! ```
//!
//! Only the envelope is versioned; the snapshot shape itself is owned by
//! `foodchain-types`.

use chrono::{DateTime, Utc};
use foodchain_types::SessionSnapshot;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::SaveError;
use crate::store::SaveStore;

/// Format version written by this build.
pub const SAVE_FORMAT_VERSION: u32 = 1;

/// Wrapper written around every snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveEnvelope {
    /// Format version of the blob.
    pub version: u32,
    /// When the save was written.
    pub saved_at: DateTime<Utc>,
    /// The session state.
    pub state: SessionSnapshot,
}

/// Only the version is read first, so a newer envelope with a different
/// shape is reported as a version mismatch rather than as corruption.
#[derive(Deserialize)]
struct VersionProbe {
    version: u32,
}

/// Encode a snapshot into a save blob stamped with the current time.
///
/// # Errors
///
/// Returns [`SaveError::Serialization`] if JSON encoding fails.
pub fn encode(snapshot: &SessionSnapshot) -> Result<Vec<u8>, SaveError> {
    let envelope = SaveEnvelope {
        version: SAVE_FORMAT_VERSION,
        saved_at: Utc::now(),
        state: snapshot.clone(),
    };
    Ok(serde_json::to_vec_pretty(&envelope)?)
}

/// Decode a save blob.
///
/// # Errors
///
/// Returns [`SaveError::Corrupt`] if the blob is not a valid envelope and
/// [`SaveError::UnsupportedVersion`] if it was written by another format.
pub fn decode(blob: &[u8]) -> Result<SaveEnvelope, SaveError> {
    let probe: VersionProbe = serde_json::from_slice(blob).map_err(|e| SaveError::Corrupt {
        reason: format!("unreadable envelope: {e}"),
    })?;
    if probe.version != SAVE_FORMAT_VERSION {
        return Err(SaveError::UnsupportedVersion {
            found: probe.version,
            expected: SAVE_FORMAT_VERSION,
        });
    }
    serde_json::from_slice(blob).map_err(|e| SaveError::Corrupt {
        reason: format!("invalid session state: {e}"),
    })
}

/// Encode `snapshot` and write it to `store` under `key`.
///
/// # Errors
///
/// Propagates encoding and store errors.
pub fn save_snapshot(
    store: &mut dyn SaveStore,
    key: &str,
    snapshot: &SessionSnapshot,
) -> Result<(), SaveError> {
    let blob = encode(snapshot)?;
    store.write(key, &blob)?;
    info!(
        key,
        day = snapshot.current_day,
        score = snapshot.total_score,
        organisms = snapshot.organisms.len(),
        "Game saved"
    );
    Ok(())
}

/// Read and decode the snapshot stored under `key`.
///
/// Returns `Ok(None)` when there is no save under that key.
///
/// # Errors
///
/// Propagates store errors and decoding errors.
pub fn load_snapshot(
    store: &dyn SaveStore,
    key: &str,
) -> Result<Option<SessionSnapshot>, SaveError> {
    let Some(blob) = store.read(key)? else {
        debug!(key, "No save found");
        return Ok(None);
    };
    let envelope = decode(&blob)?;
    debug!(key, saved_at = %envelope.saved_at, "Save decoded");
    Ok(Some(envelope.state))
}
