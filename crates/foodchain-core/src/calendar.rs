//! Day counter and phase state machine.
//!
//! Each day moves through `Draft -> Placement -> Simulating -> Results`.
//! From `Results` the cycle either starts the next day (`Draft`) or, once
//! the final day is done, moves to the terminal `Ended` phase. The day
//! counter runs from 1 to `total_days`, and is `total_days + 1` once ended.

use foodchain_types::GamePhase;

/// Errors that can occur during day-cycle operations.
#[derive(Debug, thiserror::Error)]
pub enum PhaseError {
    /// The requested phase change is not part of the cycle.
    #[error("invalid phase transition: {from} -> {to}")]
    InvalidTransition {
        /// Current phase.
        from: GamePhase,
        /// Requested phase.
        to: GamePhase,
    },

    /// Day counter would overflow.
    #[error("day counter overflow")]
    DayOverflow,

    /// A restored day is outside `1..=total_days + 1`.
    #[error("day {day} is outside 1..={max}")]
    DayOutOfRange {
        /// The offending day.
        day: u32,
        /// Highest valid day (`total_days + 1`).
        max: u32,
    },
}

/// What happened when the day advanced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayAdvance {
    /// A new playable day began; the cycle is back in `Draft`.
    NextDay(u32),
    /// The final day has passed; the cycle is `Ended`.
    Ended,
}

/// Day counter plus current phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCycle {
    day: u32,
    total_days: u32,
    phase: GamePhase,
}

impl DayCycle {
    /// Start at day 1 in the `Draft` phase.
    pub const fn new(total_days: u32) -> Self {
        Self {
            day: 1,
            total_days,
            phase: GamePhase::Draft,
        }
    }

    /// Rebuild a cycle for a restored day.
    ///
    /// A day within the game resumes in `Draft`; `total_days + 1` is `Ended`.
    ///
    /// # Errors
    ///
    /// Returns [`PhaseError::DayOutOfRange`] for day 0 or anything past
    /// `total_days + 1`.
    pub fn restore(day: u32, total_days: u32) -> Result<Self, PhaseError> {
        let max = total_days.checked_add(1).ok_or(PhaseError::DayOverflow)?;
        if day == 0 || day > max {
            return Err(PhaseError::DayOutOfRange { day, max });
        }
        let phase = if day == max {
            GamePhase::Ended
        } else {
            GamePhase::Draft
        };
        Ok(Self {
            day,
            total_days,
            phase,
        })
    }

    /// Current day.
    pub const fn day(&self) -> u32 {
        self.day
    }

    /// Number of playable days.
    pub const fn total_days(&self) -> u32 {
        self.total_days
    }

    /// Current phase.
    pub const fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Whether the game is over.
    pub const fn is_ended(&self) -> bool {
        matches!(self.phase, GamePhase::Ended)
    }

    /// Whether the current day is the last playable one.
    pub const fn is_final_day(&self) -> bool {
        self.day == self.total_days
    }

    /// Playable days left after the current one.
    pub const fn days_remaining(&self) -> u32 {
        self.total_days.saturating_sub(self.day)
    }

    /// Move to `to` if the cycle allows it.
    ///
    /// # Errors
    ///
    /// Returns [`PhaseError::InvalidTransition`] otherwise.
    pub fn transition(&mut self, to: GamePhase) -> Result<(), PhaseError> {
        let allowed = matches!(
            (self.phase, to),
            (GamePhase::Draft, GamePhase::Placement)
                | (GamePhase::Placement, GamePhase::Simulating)
                | (GamePhase::Simulating, GamePhase::Results)
                | (GamePhase::Results, GamePhase::Draft | GamePhase::Ended)
        );
        if !allowed {
            return Err(PhaseError::InvalidTransition {
                from: self.phase,
                to,
            });
        }
        self.phase = to;
        Ok(())
    }

    /// Finish the current day: increment the counter and move to `Draft`,
    /// or to `Ended` once the counter passes `total_days`.
    ///
    /// # Errors
    ///
    /// Returns [`PhaseError::InvalidTransition`] unless in `Results`, or
    /// [`PhaseError::DayOverflow`].
    pub fn advance_day(&mut self) -> Result<DayAdvance, PhaseError> {
        let next = self.day.checked_add(1).ok_or(PhaseError::DayOverflow)?;
        let (phase, advance) = if next > self.total_days {
            (GamePhase::Ended, DayAdvance::Ended)
        } else {
            (GamePhase::Draft, DayAdvance::NextDay(next))
        };
        self.transition(phase)?;
        self.day = next;
        Ok(advance)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn run_to_results(cycle: &mut DayCycle) {
        cycle.transition(GamePhase::Placement).unwrap();
        cycle.transition(GamePhase::Simulating).unwrap();
        cycle.transition(GamePhase::Results).unwrap();
    }

    #[test]
    fn starts_at_day_one_in_draft() {
        let cycle = DayCycle::new(12);
        assert_eq!(cycle.day(), 1);
        assert_eq!(cycle.phase(), GamePhase::Draft);
        assert_eq!(cycle.days_remaining(), 11);
        assert!(!cycle.is_ended());
    }

    #[test]
    fn full_day_cycles_back_to_draft() {
        let mut cycle = DayCycle::new(12);
        run_to_results(&mut cycle);
        assert_eq!(cycle.advance_day().unwrap(), DayAdvance::NextDay(2));
        assert_eq!(cycle.phase(), GamePhase::Draft);
        assert_eq!(cycle.day(), 2);
    }

    #[test]
    fn final_day_ends_the_game() {
        let mut cycle = DayCycle::new(2);
        run_to_results(&mut cycle);
        assert_eq!(cycle.advance_day().unwrap(), DayAdvance::NextDay(2));
        assert!(cycle.is_final_day());
        run_to_results(&mut cycle);
        assert_eq!(cycle.advance_day().unwrap(), DayAdvance::Ended);
        assert!(cycle.is_ended());
        assert_eq!(cycle.day(), 3);
    }

    #[test]
    fn skipping_phases_is_rejected() {
        let mut cycle = DayCycle::new(12);
        let result = cycle.transition(GamePhase::Results);
        assert!(matches!(
            result,
            Err(PhaseError::InvalidTransition {
                from: GamePhase::Draft,
                to: GamePhase::Results
            })
        ));
        assert_eq!(cycle.phase(), GamePhase::Draft);
    }

    #[test]
    fn advance_outside_results_is_rejected_and_keeps_day() {
        let mut cycle = DayCycle::new(12);
        cycle.transition(GamePhase::Placement).unwrap();
        assert!(cycle.advance_day().is_err());
        assert_eq!(cycle.day(), 1);
    }

    #[test]
    fn ended_is_terminal() {
        let mut cycle = DayCycle::new(1);
        run_to_results(&mut cycle);
        cycle.advance_day().unwrap();
        for phase in [
            GamePhase::Draft,
            GamePhase::Placement,
            GamePhase::Simulating,
            GamePhase::Results,
        ] {
            assert!(cycle.transition(phase).is_err());
        }
    }

    #[test]
    fn restore_validates_day() {
        assert_eq!(DayCycle::restore(5, 12).unwrap().phase(), GamePhase::Draft);
        assert_eq!(DayCycle::restore(13, 12).unwrap().phase(), GamePhase::Ended);
        assert!(matches!(
            DayCycle::restore(0, 12),
            Err(PhaseError::DayOutOfRange { day: 0, max: 13 })
        ));
        assert!(DayCycle::restore(14, 12).is_err());
    }
}
