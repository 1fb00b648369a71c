//! Error types for the foodchain-ecosystem crate.
//!
//! Catalog misses indicate a data or integrity bug and are never triggered
//! by the player, since drafts only offer valid species. Slot conflicts are
//! recoverable: the front-end re-prompts.

use foodchain_types::{InstanceId, SpeciesId};

/// Errors raised by the organism catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// No species with the given id exists.
    #[error("unknown species: {0}")]
    UnknownSpecies(SpeciesId),

    /// The catalog was built without any species.
    #[error("catalog contains no species")]
    Empty,

    /// Two catalog rows share the same id.
    #[error("duplicate species id: {0}")]
    DuplicateSpecies(SpeciesId),
}

/// Errors raised by the population store.
#[derive(Debug, thiserror::Error)]
pub enum PopulationError {
    /// The slot already holds a live organism.
    #[error("slot {slot} is already occupied by {occupant}")]
    SlotOccupied {
        /// The requested slot.
        slot: u32,
        /// The organism currently in it.
        occupant: InstanceId,
    },

    /// The slot index is outside the grid.
    #[error("slot {slot} is out of range (grid has {total_slots} slots)")]
    SlotOutOfRange {
        /// The requested slot.
        slot: u32,
        /// Size of the grid.
        total_slots: u32,
    },

    /// The instance id counter cannot advance any further.
    #[error("instance id counter exhausted")]
    IdExhausted,

    /// Restored population data violates a store invariant.
    #[error("corrupt population data: {reason}")]
    Corrupt {
        /// Which invariant was violated.
        reason: String,
    },
}
