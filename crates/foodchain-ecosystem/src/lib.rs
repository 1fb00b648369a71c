//! Catalog, population, and draft logic for the Foodchain game.
//!
//! This crate holds the state the simulation engine reads and the session
//! controller mutates. It performs no I/O.
//!
//! # Modules
//!
//! - [`catalog`] -- Read-only species table ([`Catalog`])
//! - [`population`] -- Live organisms and slot occupancy ([`PopulationStore`])
//! - [`draft`] -- Daily species offers ([`DraftGenerator`], [`DraftOffer`])
//! - [`error`] -- Error types ([`CatalogError`], [`PopulationError`])

pub mod catalog;
pub mod draft;
pub mod error;
pub mod population;

pub use catalog::Catalog;
pub use draft::{DraftError, DraftGenerator, DraftOffer};
pub use error::{CatalogError, PopulationError};
pub use population::PopulationStore;
