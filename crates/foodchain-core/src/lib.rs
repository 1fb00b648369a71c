//! Day cycle, feeding simulation, and session control for the Foodchain game.
//!
//! Each day the player is offered a handful of species, places some of
//! them on the grid, and the day is simulated under the 1-to-3 rule: a
//! consumer needs three organisms of the level below to be fed.
//!
//! # Modules
//!
//! - [`config`] -- Configuration loading from `foodchain-config.yaml` into
//!   strongly-typed structs.
//! - [`calendar`] -- Day counter and phase state machine ([`DayCycle`]).
//! - [`simulation`] -- Feeding allocation, death commit, feedability preview.
//! - [`observer`] -- [`GameObserver`] trait, [`NoOpObserver`], [`EventLog`].
//! - [`session`] -- The [`GameSession`] controller.
//! - [`strategy`] -- [`PlacementStrategy`] trait and built-in strategies.
//! - [`runner`] -- Auto-play loop over a strategy.
//!
//! [`DayCycle`]: calendar::DayCycle
//! [`GameObserver`]: observer::GameObserver
//! [`NoOpObserver`]: observer::NoOpObserver
//! [`EventLog`]: observer::EventLog
//! [`GameSession`]: session::GameSession
//! [`PlacementStrategy`]: strategy::PlacementStrategy

pub mod calendar;
pub mod config;
pub mod observer;
pub mod runner;
pub mod session;
pub mod simulation;
pub mod strategy;

pub use config::GameConfig;
pub use observer::{EventLog, GameObserver, NoOpObserver};
pub use session::{GameOutcome, GameSession, ProceedOutcome, SessionError};
