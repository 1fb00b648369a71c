//! Observer interface for game notifications.
//!
//! A [`GameSession`](crate::session::GameSession) owns exactly one
//! observer and calls it synchronously for every [`GameEvent`], in the
//! order the operations happen. Rendering layers implement
//! [`GameObserver`]; tests use [`EventLog`].

use foodchain_types::GameEvent;

/// Receives game notifications.
pub trait GameObserver {
    /// Called once per event, immediately after the change it describes.
    fn on_event(&mut self, event: &GameEvent);
}

/// Ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpObserver;

impl GameObserver for NoOpObserver {
    fn on_event(&mut self, _event: &GameEvent) {}
}

/// Records every event in arrival order.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<GameEvent>,
}

impl EventLog {
    /// Create an empty log.
    pub const fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Events received so far.
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Drain the log, returning everything received so far.
    pub fn take(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// How many events of the given [`GameEvent::kind`] were received.
    pub fn count(&self, kind: &str) -> usize {
        self.events.iter().filter(|e| e.kind() == kind).count()
    }

    /// Number of recorded events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl GameObserver for EventLog {
    fn on_event(&mut self, event: &GameEvent) {
        self.events.push(event.clone());
    }
}

impl<T: GameObserver + ?Sized> GameObserver for &mut T {
    fn on_event(&mut self, event: &GameEvent) {
        (**self).on_event(event);
    }
}

#[cfg(test)]
mod tests {
    use foodchain_types::InstanceId;

    use super::*;

    #[test]
    fn log_records_in_order() {
        let mut log = EventLog::new();
        log.on_event(&GameEvent::DayChanged { day: 1 });
        log.on_event(&GameEvent::OrganismRemoved {
            instance_id: InstanceId(3),
        });
        log.on_event(&GameEvent::DayChanged { day: 2 });

        assert_eq!(log.len(), 3);
        assert_eq!(log.count("day_changed"), 2);
        assert_eq!(
            log.events().first(),
            Some(&GameEvent::DayChanged { day: 1 })
        );

        let drained = log.take();
        assert_eq!(drained.len(), 3);
        assert!(log.is_empty());
    }

    #[test]
    fn borrowed_observer_forwards() {
        let mut log = EventLog::new();
        {
            let mut borrowed = &mut log;
            borrowed.on_event(&GameEvent::GameOver {
                won: false,
                score: 0,
            });
        }
        assert_eq!(log.count("game_over"), 1);
    }
}
