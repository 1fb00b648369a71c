//! Auto-play loop.
//!
//! [`play_day`] runs one full day against a [`PlacementStrategy`]:
//! placements until the strategy stops, then simulate, commit and
//! proceed. [`run_game`] repeats it until the game ends.

use foodchain_types::{DayResult, InstanceId};
use tracing::{info, warn};

use crate::observer::GameObserver;
use crate::session::{GameOutcome, GameSession, ProceedOutcome, SessionError};
use crate::strategy::PlacementStrategy;

/// What happened during one auto-played day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayReport {
    /// The day that was played.
    pub day: u32,
    /// Organisms placed, in placement order.
    pub placed: Vec<InstanceId>,
    /// Whether the strategy's last request was refused.
    pub rejected: bool,
    /// The simulated outcome.
    pub result: DayResult,
    /// Where the session went next.
    pub next: ProceedOutcome,
}

/// Play the current day with `strategy`.
///
/// A refused placement is logged and ends placement for the day; the day
/// is still simulated.
///
/// # Errors
///
/// Returns [`SessionError::GameEnded`] if the game is already over, or
/// any error from simulating or advancing.
pub fn play_day<O: GameObserver>(
    session: &mut GameSession<O>,
    strategy: &mut dyn PlacementStrategy,
) -> Result<DayReport, SessionError> {
    if !session.is_active() {
        return Err(SessionError::GameEnded);
    }
    let day = session.day();
    let mut placed = Vec::new();
    let mut rejected = false;

    // Terminates: every accepted placement shrinks the offer.
    loop {
        let context = session.placement_context();
        let Some(placement) = strategy.next_placement(&context) else {
            break;
        };
        match session.place_organism(&placement.species, placement.slot) {
            Ok(id) => placed.push(id),
            Err(err) => {
                warn!(
                    day,
                    species = %placement.species,
                    slot = placement.slot,
                    error = %err,
                    "Placement rejected"
                );
                rejected = true;
                break;
            }
        }
    }

    let result = session.run_simulation()?;
    session.commit_deaths()?;
    let next = session.proceed_to_next_day()?;

    Ok(DayReport {
        day,
        placed,
        rejected,
        result,
        next,
    })
}

/// Play the remaining days until the game ends.
///
/// # Errors
///
/// Propagates the first error from [`play_day`].
pub fn run_game<O: GameObserver>(
    session: &mut GameSession<O>,
    strategy: &mut dyn PlacementStrategy,
) -> Result<GameOutcome, SessionError> {
    info!(
        day = session.day(),
        total_days = session.total_days(),
        "Auto-play starting"
    );
    loop {
        let report = play_day(session, strategy)?;
        if let ProceedOutcome::GameOver(outcome) = report.next {
            return Ok(outcome);
        }
    }
}

/// Log how the game ended.
pub fn log_game_end(outcome: &GameOutcome) {
    info!(
        won = outcome.won,
        score = outcome.score,
        days_played = outcome.days_played,
        "Game ended"
    );
    if !outcome.won {
        warn!("Food chain collapsed: at least one trophic level died out");
    }
}
