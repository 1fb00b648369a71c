//! Notifications sent from the game session to rendering collaborators.
//!
//! Events are emitted synchronously, in the order the operations that
//! caused them happened.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::ids::InstanceId;
use crate::structs::{DayResult, OrganismInstance};

/// A notification about a change in the game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum GameEvent {
    /// An organism was placed into a slot.
    OrganismAdded {
        /// The new organism.
        instance: OrganismInstance,
    },
    /// An organism left the grid (starved, or cleared by a reset).
    OrganismRemoved {
        /// The removed organism.
        instance_id: InstanceId,
    },
    /// A new playable day started.
    DayChanged {
        /// The new day number.
        day: u32,
    },
    /// A day was simulated; deaths are staged but not yet committed.
    SimulationComplete {
        /// The computed outcome.
        result: DayResult,
    },
    /// The final day passed.
    GameOver {
        /// Whether every trophic level still had a live organism.
        won: bool,
        /// Final cumulative score.
        score: u32,
    },
}

impl GameEvent {
    /// Short name used in logs.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::OrganismAdded { .. } => "organism_added",
            Self::OrganismRemoved { .. } => "organism_removed",
            Self::DayChanged { .. } => "day_changed",
            Self::SimulationComplete { .. } => "simulation_complete",
            Self::GameOver { .. } => "game_over",
        }
    }
}
