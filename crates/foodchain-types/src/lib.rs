//! Shared type definitions for the Foodchain ecosystem game.
//!
//! Every other crate in the workspace builds on these types. They derive
//! `ts-rs` bindings so the front-end that renders the grid, the draft and
//! the food-chain links shares one definition with the engine.
//!
//! # Modules
//!
//! - [`ids`] -- Identifier newtypes for organism instances and species
//! - [`enums`] -- Trophic levels, health status, game phase
//! - [`structs`] -- Species, organism instances, day results, snapshots
//! - [`events`] -- Notifications delivered to rendering collaborators

pub mod enums;
pub mod events;
pub mod ids;
pub mod structs;

pub use enums::{GamePhase, HealthStatus, TrophicLevel};
pub use events::GameEvent;
pub use ids::{InstanceId, SpeciesId};
pub use structs::{
    DayResult, Feedability, FeedingCapacity, FoodLink, OrganismInstance, SessionSnapshot, Species,
};
