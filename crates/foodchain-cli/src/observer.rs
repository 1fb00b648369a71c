//! Observer that turns game events into log lines.

use foodchain_core::GameObserver;
use foodchain_types::GameEvent;
use tracing::{debug, info, trace};

/// Logs every [`GameEvent`] and counts them.
///
/// The full JSON payload a rendering front-end would receive is logged at
/// `trace` level.
#[derive(Debug, Default)]
pub struct TracingObserver {
    events_seen: u64,
}

impl TracingObserver {
    /// Create an observer with a zero count.
    pub const fn new() -> Self {
        Self { events_seen: 0 }
    }

    /// Events received so far.
    pub const fn events_seen(&self) -> u64 {
        self.events_seen
    }
}

impl GameObserver for TracingObserver {
    fn on_event(&mut self, event: &GameEvent) {
        self.events_seen = self.events_seen.saturating_add(1);

        match event {
            GameEvent::OrganismAdded { instance } => debug!(
                instance = %instance.id,
                species = %instance.species,
                level = %instance.level,
                slot = instance.slot,
                "Organism added"
            ),
            GameEvent::OrganismRemoved { instance_id } => {
                debug!(instance = %instance_id, "Organism removed");
            }
            GameEvent::DayChanged { day } => info!(day, "Day started"),
            GameEvent::SimulationComplete { result } => info!(
                day = result.day,
                healthy = result.healthy.len(),
                dead = result.dead.len(),
                links = result.links.len(),
                score_delta = result.score_delta,
                "Simulation complete"
            ),
            GameEvent::GameOver { won, score } => info!(won, score, "Game over"),
        }

        match serde_json::to_string(event) {
            Ok(payload) => trace!(kind = event.kind(), %payload, "Event payload"),
            Err(e) => debug!(kind = event.kind(), error = %e, "Event not serializable"),
        }
    }
}
