//! Placement strategies for automated play.
//!
//! During placement the runner shows a strategy a [`PlacementContext`]
//! (today's offer and the grid) and asks for the next [`Placement`]. A
//! strategy answers `None` when it is done for the day. The human player
//! is just another source of placements; these implementations drive the
//! command-line auto-play and the integration tests.

use std::collections::VecDeque;

use foodchain_ecosystem::{Catalog, DraftOffer, PopulationStore};
use foodchain_types::{Feedability, SpeciesId};

use crate::config::RulesConfig;
use crate::simulation;

/// One placement request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    /// Species to place; must be in the offer.
    pub species: SpeciesId,
    /// Target slot.
    pub slot: u32,
}

impl Placement {
    /// Create a placement request.
    pub fn new(species: impl Into<SpeciesId>, slot: u32) -> Self {
        Self {
            species: species.into(),
            slot,
        }
    }
}

/// Read-only view of the session during placement.
#[derive(Debug, Clone, Copy)]
pub struct PlacementContext<'a> {
    /// Current day.
    pub day: u32,
    /// Species still offered today.
    pub offer: &'a DraftOffer,
    /// Live organisms.
    pub population: &'a PopulationStore,
    /// Species table.
    pub catalog: &'a Catalog,
    /// Rules in force.
    pub rules: &'a RulesConfig,
}

impl PlacementContext<'_> {
    /// Whether one more organism of `species` would be fed. `None` for an
    /// unknown species.
    pub fn preview(&self, species: &SpeciesId) -> Option<Feedability> {
        let level = self.catalog.lookup(species).ok()?.level;
        Some(simulation::preview_feedability(
            self.population,
            level,
            self.rules.food_requirement,
        ))
    }
}

/// A source of placements.
pub trait PlacementStrategy {
    /// Next placement for today, or `None` to stop placing.
    fn next_placement(&mut self, context: &PlacementContext<'_>) -> Option<Placement>;
}

/// Never places anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassStrategy;

impl PlacementStrategy for PassStrategy {
    fn next_placement(&mut self, _context: &PlacementContext<'_>) -> Option<Placement> {
        None
    }
}

/// Places the first offered species that would be fed, into the lowest
/// empty slot.
///
/// Producers always qualify. Consumers qualify only while their food
/// level has a full share left for them.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyStrategy;

impl PlacementStrategy for GreedyStrategy {
    fn next_placement(&mut self, context: &PlacementContext<'_>) -> Option<Placement> {
        let slot = context.population.first_empty_slot()?;
        context
            .offer
            .as_slice()
            .iter()
            .find(|species| context.preview(species).is_some_and(|f| f.can_feed))
            .map(|species| Placement {
                species: species.clone(),
                slot,
            })
    }
}

/// Replays a fixed list of placements, one day after another.
///
/// Each inner list is one day's placements; days past the end of the
/// script place nothing.
#[derive(Debug, Clone, Default)]
pub struct ScriptedStrategy {
    days: VecDeque<VecDeque<Placement>>,
    current_day: Option<u32>,
    today: VecDeque<Placement>,
}

impl ScriptedStrategy {
    /// Create a strategy from per-day placement lists.
    pub fn new(days: Vec<Vec<Placement>>) -> Self {
        Self {
            days: days.into_iter().map(VecDeque::from).collect(),
            current_day: None,
            today: VecDeque::new(),
        }
    }
}

impl PlacementStrategy for ScriptedStrategy {
    fn next_placement(&mut self, context: &PlacementContext<'_>) -> Option<Placement> {
        if self.current_day != Some(context.day) {
            self.current_day = Some(context.day);
            self.today = self.days.pop_front().unwrap_or_default();
        }
        self.today.pop_front()
    }
}
