//! Enumeration types for the Foodchain game.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Trophic levels
// ---------------------------------------------------------------------------

/// Position of a species in the three-tier food hierarchy.
///
/// Variants are declared bottom-up so that ordering follows the chain:
/// producers feed primary consumers, which feed secondary consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum TrophicLevel {
    /// Plants. Never food-limited; they only take up space.
    Producer,
    /// Herbivores that eat producers.
    Primary,
    /// Predators that eat primary consumers.
    Secondary,
}

impl TrophicLevel {
    /// Every level, bottom of the chain first.
    pub const ALL: [Self; 3] = [Self::Producer, Self::Primary, Self::Secondary];

    /// The level this one eats, or `None` for producers.
    pub const fn food_source(self) -> Option<Self> {
        match self {
            Self::Producer => None,
            Self::Primary => Some(Self::Producer),
            Self::Secondary => Some(Self::Primary),
        }
    }

    /// Whether organisms at this level need food to stay alive.
    pub const fn is_consumer(self) -> bool {
        !matches!(self, Self::Producer)
    }
}

impl core::fmt::Display for TrophicLevel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Producer => write!(f, "producer"),
            Self::Primary => write!(f, "primary"),
            Self::Secondary => write!(f, "secondary"),
        }
    }
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

/// Health of a placed organism.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum HealthStatus {
    /// Fed (or a producer). The default for newly placed organisms.
    #[default]
    Healthy,
    /// Alive but underfed. The current feeding rule never produces it, and
    /// a save containing it is rejected on load.
    Hungry,
    /// Starved during the last simulated day, awaiting removal.
    Dead,
}

// ---------------------------------------------------------------------------
// Game phase
// ---------------------------------------------------------------------------

/// Phase of the daily cycle.
///
/// Each day runs `Draft -> Placement -> Simulating -> Results`, after which
/// the cycle returns to `Draft` or ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum GamePhase {
    /// A new offer is being drawn.
    Draft,
    /// The player places organisms from the offer.
    Placement,
    /// The feeding rule is being evaluated.
    Simulating,
    /// The day's result is available; deaths may still be uncommitted.
    Results,
    /// The final day has passed. Terminal.
    Ended,
}

impl core::fmt::Display for GamePhase {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Draft => write!(f, "draft"),
            Self::Placement => write!(f, "placement"),
            Self::Simulating => write!(f, "simulating"),
            Self::Results => write!(f, "results"),
            Self::Ended => write!(f, "ended"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn food_chain_links_upward() {
        assert_eq!(TrophicLevel::Producer.food_source(), None);
        assert_eq!(
            TrophicLevel::Primary.food_source(),
            Some(TrophicLevel::Producer)
        );
        assert_eq!(
            TrophicLevel::Secondary.food_source(),
            Some(TrophicLevel::Primary)
        );
    }

    #[test]
    fn only_producers_are_self_sufficient() {
        let consumers: Vec<_> = TrophicLevel::ALL
            .into_iter()
            .filter(|level| level.is_consumer())
            .collect();
        assert_eq!(consumers, vec![TrophicLevel::Primary, TrophicLevel::Secondary]);
    }

    #[test]
    fn new_organisms_default_to_healthy() {
        assert_eq!(HealthStatus::default(), HealthStatus::Healthy);
    }
}
