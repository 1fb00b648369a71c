//! Type-safe identifier wrappers.
//!
//! Organism instances are numbered by the population store with a
//! monotonically increasing counter that is never reused within a session.
//! Species are keyed by a short slug (`"rabbit"`, `"oak"`) taken from the
//! catalog.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Identifier of one placed organism.
///
/// Ordering follows creation order, which is the tie-break order used when
/// feeding capacity is only partially sufficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct InstanceId(pub u64);

impl InstanceId {
    /// The first identifier handed out in a fresh session.
    pub const FIRST: Self = Self(1);

    /// Return the raw counter value.
    pub const fn into_inner(self) -> u64 {
        self.0
    }

    /// Return the identifier that follows this one, or `None` on overflow.
    pub const fn next(self) -> Option<Self> {
        match self.0.checked_add(1) {
            Some(raw) => Some(Self(raw)),
            None => None,
        }
    }
}

impl core::fmt::Display for InstanceId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u64> for InstanceId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

/// Catalog key of a species.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct SpeciesId(pub String);

impl SpeciesId {
    /// Create a species identifier from any string-like slug.
    pub fn new(slug: impl Into<String>) -> Self {
        Self(slug.into())
    }

    /// Borrow the slug.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for SpeciesId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SpeciesId {
    fn from(slug: &str) -> Self {
        Self(slug.to_owned())
    }
}
