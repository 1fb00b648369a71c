//! Core entity structs for the Foodchain game.
//!
//! Catalog rows ([`Species`]) are immutable once loaded. Placed organisms
//! ([`OrganismInstance`]) are owned by the population store. [`DayResult`]
//! is the transient output of one simulated day and [`SessionSnapshot`] is
//! the unit handed to the persistence collaborator.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{HealthStatus, TrophicLevel};
use crate::ids::{InstanceId, SpeciesId};

// ---------------------------------------------------------------------------
// Species
// ---------------------------------------------------------------------------

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Species {
    /// Catalog key.
    pub id: SpeciesId,
    /// Name shown to the player.
    pub name: String,
    /// Trophic level.
    pub level: TrophicLevel,
    /// Short educational blurb.
    #[serde(default)]
    pub description: String,
    /// Asset key of the icon used by the front-end.
    #[serde(default)]
    pub icon: String,
    /// Whether the draft generator may offer this species.
    #[serde(default = "default_draftable")]
    pub draftable: bool,
}

const fn default_draftable() -> bool {
    true
}

// ---------------------------------------------------------------------------
// Organism instances
// ---------------------------------------------------------------------------

/// One placed individual.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct OrganismInstance {
    /// Unique, never reused within a session.
    pub id: InstanceId,
    /// Catalog species.
    pub species: SpeciesId,
    /// Trophic level copied from the catalog at placement time.
    pub level: TrophicLevel,
    /// Grid slot; unique among live instances.
    pub slot: u32,
    /// Health after the most recently committed day.
    pub health: HealthStatus,
    /// Day on which the organism was placed.
    pub day_added: u32,
}

// ---------------------------------------------------------------------------
// Day results
// ---------------------------------------------------------------------------

/// A display-only "eater ate food" edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct FoodLink {
    /// The consumer.
    pub eater: InstanceId,
    /// The organism it is drawn feeding on.
    pub food: InstanceId,
}

/// Population counts and the feeding capacity derived from them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct FeedingCapacity {
    /// Live producers at the start of the day.
    pub producers: u32,
    /// Live primary consumers at the start of the day.
    pub primaries: u32,
    /// Live secondary consumers at the start of the day.
    pub secondaries: u32,
    /// How many primary consumers the producers can feed.
    pub feedable_primary: u32,
    /// How many secondary consumers the primary consumers can feed.
    pub feedable_secondary: u32,
}

/// Outcome of one simulated day.
///
/// Every live instance appears in exactly one of `healthy` or `dead`, both
/// in ascending id order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct DayResult {
    /// The day that was simulated.
    pub day: u32,
    /// Instances that were fed (or are producers).
    pub healthy: Vec<InstanceId>,
    /// Instances that starved and are staged for removal.
    pub dead: Vec<InstanceId>,
    /// Points earned this day.
    pub score_delta: u32,
    /// Food-chain edges for display.
    pub links: Vec<FoodLink>,
    /// Counts the outcome was computed from.
    pub capacity: FeedingCapacity,
}

impl DayResult {
    /// Whether the given instance survived the day.
    pub fn is_healthy(&self, id: InstanceId) -> bool {
        self.healthy.binary_search(&id).is_ok()
    }

    /// Whether the given instance starved.
    pub fn is_dead(&self, id: InstanceId) -> bool {
        self.dead.binary_search(&id).is_ok()
    }

    /// Foods linked to a given eater, in link order.
    pub fn foods_of(&self, eater: InstanceId) -> impl Iterator<Item = InstanceId> + '_ {
        self.links
            .iter()
            .filter(move |link| link.eater == eater)
            .map(|link| link.food)
    }
}

/// Projection of whether one more organism of a species could be fed.
///
/// Producers are never food-limited and report `can_feed = true` with
/// `available` and `needed` both zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct Feedability {
    /// Whether the new organism would be fed.
    pub can_feed: bool,
    /// Food units not already claimed by existing consumers of that level.
    /// `u32::MAX` for producers, which need no food.
    pub available: u32,
    /// Food units one consumer needs. Zero for producers.
    pub needed: u32,
}

// ---------------------------------------------------------------------------
// Persistence
// ---------------------------------------------------------------------------

/// Serializable state of a game session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct SessionSnapshot {
    /// Current day, `1..=total_days`, or `total_days + 1` once ended.
    pub current_day: u32,
    /// Cumulative score.
    pub total_score: u32,
    /// Whether the game is still being played.
    pub active: bool,
    /// Identifier the next placement will receive.
    pub next_instance_id: InstanceId,
    /// Live organisms in ascending id order.
    pub organisms: Vec<OrganismInstance>,
    /// Slot -> occupying instance.
    pub occupied_slots: BTreeMap<u32, InstanceId>,
}
