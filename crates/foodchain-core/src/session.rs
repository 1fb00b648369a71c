//! Game session controller.
//!
//! [`GameSession`] owns the population, the day cycle, the score and the
//! current draft offer, and drives them through the daily loop:
//!
//! ```text
//! place_organism* -> run_simulation -> commit_deaths -> proceed_to_next_day
//! ```
//!
//! Every state change is reported to the session's [`GameObserver`]
//! synchronously, in order. Persistence goes through the opaque
//! [`SaveStore`] collaborator.

use foodchain_ecosystem::{
    Catalog, CatalogError, DraftError, DraftGenerator, DraftOffer, PopulationError,
    PopulationStore,
};
use foodchain_save::{SaveError, SaveStore, load_snapshot, save_snapshot};
use foodchain_types::{
    DayResult, Feedability, GameEvent, GamePhase, HealthStatus, InstanceId, SessionSnapshot,
    SpeciesId,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

use crate::calendar::{DayAdvance, DayCycle, PhaseError};
use crate::config::{ConfigError, GameConfig, RulesConfig};
use crate::observer::{GameObserver, NoOpObserver};
use crate::simulation;
use crate::strategy::PlacementContext;

/// Errors returned by session operations.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The configuration does not describe a playable game.
    #[error("configuration error: {source}")]
    Config {
        /// The underlying configuration error.
        #[from]
        source: ConfigError,
    },

    /// A species id is not in the catalog.
    #[error("catalog error: {source}")]
    Catalog {
        /// The underlying catalog error.
        #[from]
        source: CatalogError,
    },

    /// A placement was rejected by the population store.
    #[error("placement rejected: {source}")]
    Population {
        /// The underlying population error.
        #[from]
        source: PopulationError,
    },

    /// No offer could be drawn.
    #[error("draft failed: {source}")]
    Draft {
        /// The underlying draft error.
        #[from]
        source: DraftError,
    },

    /// The day cycle refused a transition.
    #[error("day cycle error: {source}")]
    Phase {
        /// The underlying phase error.
        #[from]
        source: PhaseError,
    },

    /// The operation is not valid in the current phase.
    #[error("expected phase {expected}, session is in {actual}")]
    WrongPhase {
        /// Phase the operation needs.
        expected: GamePhase,
        /// Phase the session is in.
        actual: GamePhase,
    },

    /// The species is not in today's offer.
    #[error("species {0} is not in the current offer")]
    NotOffered(SpeciesId),

    /// The game is over; start a new one.
    #[error("the game has ended")]
    GameEnded,

    /// A day's result is still on screen and cannot be saved yet.
    #[error("cannot save while a day result is pending")]
    PendingResults,

    /// A save decoded but does not describe a reachable game.
    #[error("corrupt save: {reason}")]
    CorruptSave {
        /// What is wrong with it.
        reason: String,
    },

    /// The persistence collaborator failed.
    #[error("save store error: {source}")]
    Save {
        /// The underlying save error.
        #[from]
        source: SaveError,
    },
}

/// How a finished game went.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOutcome {
    /// Every trophic level still had a live organism after the final day.
    pub won: bool,
    /// Final cumulative score.
    pub score: u32,
    /// Days simulated.
    pub days_played: u32,
}

/// Result of [`GameSession::proceed_to_next_day`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProceedOutcome {
    /// A new day started and a new offer was drawn.
    NextDay(u32),
    /// The final day is done.
    GameOver(GameOutcome),
}

/// A computed day awaiting its deaths being applied.
#[derive(Debug, Clone)]
struct PendingDay {
    result: DayResult,
    committed: bool,
}

/// One game in progress.
#[derive(Debug)]
pub struct GameSession<O: GameObserver = NoOpObserver> {
    rules: RulesConfig,
    catalog: Catalog,
    population: PopulationStore,
    cycle: DayCycle,
    score: u32,
    offer: DraftOffer,
    generator: DraftGenerator,
    rng: StdRng,
    pending: Option<PendingDay>,
    outcome: Option<GameOutcome>,
    observer: O,
}

impl<O: GameObserver> GameSession<O> {
    /// Create a session and start day 1.
    ///
    /// Drafts are seeded from `config.draft.seed` when set.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Config`] if `config` fails validation, or
    /// [`SessionError::Draft`] if the catalog has nothing to offer.
    pub fn new(config: &GameConfig, catalog: Catalog, observer: O) -> Result<Self, SessionError> {
        config.validate()?;
        let rng = config
            .draft
            .seed
            .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
        let rules = config.rules;
        let mut session = Self {
            rules,
            catalog,
            population: PopulationStore::new(rules.total_slots),
            cycle: DayCycle::new(rules.total_days),
            score: 0,
            offer: DraftOffer::default(),
            generator: config.draft_generator(),
            rng,
            pending: None,
            outcome: None,
            observer,
        };
        session.begin_day()?;
        info!(
            total_days = rules.total_days,
            total_slots = rules.total_slots,
            species = session.catalog.len(),
            "Game started"
        );
        Ok(session)
    }

    /// Throw away the current game and start again at day 1.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Draft`] if no offer can be drawn.
    pub fn start_new_game(&mut self) -> Result<(), SessionError> {
        for instance_id in self.population.reset() {
            self.observer
                .on_event(&GameEvent::OrganismRemoved { instance_id });
        }
        self.cycle = DayCycle::new(self.rules.total_days);
        self.score = 0;
        self.pending = None;
        self.outcome = None;
        self.offer.clear();
        self.begin_day()?;
        info!("New game started");
        Ok(())
    }

    /// Place one organism of an offered species into `slot`.
    ///
    /// On success one occurrence of the species leaves the offer.
    ///
    /// # Errors
    ///
    /// - [`SessionError::GameEnded`] or [`SessionError::WrongPhase`] outside
    ///   placement
    /// - [`SessionError::Catalog`] for an unknown species
    /// - [`SessionError::NotOffered`] if the species is not in the offer
    /// - [`SessionError::Population`] if the slot is taken or out of range
    pub fn place_organism(
        &mut self,
        species_id: &SpeciesId,
        slot: u32,
    ) -> Result<InstanceId, SessionError> {
        self.require_phase(GamePhase::Placement)?;
        let species = self.catalog.lookup(species_id)?;
        if !self.offer.contains(species_id) {
            return Err(SessionError::NotOffered(species_id.clone()));
        }

        let id = self.population.place(species, slot, self.cycle.day())?;
        self.offer.take(species_id);

        if let Some(instance) = self.population.get(id) {
            self.observer.on_event(&GameEvent::OrganismAdded {
                instance: instance.clone(),
            });
        }
        Ok(id)
    }

    /// Simulate the current day.
    ///
    /// From placement this computes the result and adds its score. Called
    /// again while the result is shown, it returns the same result without
    /// scoring twice.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::GameEnded`] or [`SessionError::WrongPhase`].
    pub fn run_simulation(&mut self) -> Result<DayResult, SessionError> {
        match self.cycle.phase() {
            GamePhase::Results => {
                if let Some(pending) = &self.pending {
                    return Ok(pending.result.clone());
                }
                Err(SessionError::WrongPhase {
                    expected: GamePhase::Placement,
                    actual: GamePhase::Results,
                })
            }
            GamePhase::Placement => {
                self.cycle.transition(GamePhase::Simulating)?;
                let result = simulation::run_day(&self.population, &self.rules, self.cycle.day());
                self.score = self.score.saturating_add(result.score_delta);
                self.cycle.transition(GamePhase::Results)?;

                info!(
                    day = result.day,
                    healthy = result.healthy.len(),
                    dead = result.dead.len(),
                    score_delta = result.score_delta,
                    total_score = self.score,
                    "Day simulated"
                );

                self.pending = Some(PendingDay {
                    result: result.clone(),
                    committed: false,
                });
                self.observer.on_event(&GameEvent::SimulationComplete {
                    result: result.clone(),
                });
                Ok(result)
            }
            GamePhase::Ended => Err(SessionError::GameEnded),
            actual => Err(SessionError::WrongPhase {
                expected: GamePhase::Placement,
                actual,
            }),
        }
    }

    /// Remove the organisms the last simulation marked dead.
    ///
    /// Returns the removed ids in ascending order. A second call removes
    /// nothing.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::GameEnded`] or [`SessionError::WrongPhase`]
    /// unless a result is being shown.
    pub fn commit_deaths(&mut self) -> Result<Vec<InstanceId>, SessionError> {
        self.require_phase(GamePhase::Results)?;
        let Some(pending) = self.pending.as_mut() else {
            return Ok(Vec::new());
        };
        if pending.committed {
            return Ok(Vec::new());
        }

        let removed = simulation::commit_deaths(&mut self.population, &pending.result);
        pending.committed = true;

        let ids: Vec<InstanceId> = removed.iter().map(|o| o.id).collect();
        for instance_id in &ids {
            self.observer.on_event(&GameEvent::OrganismRemoved {
                instance_id: *instance_id,
            });
        }
        debug!(day = self.cycle.day(), removed = ids.len(), "Deaths committed");
        Ok(ids)
    }

    /// Leave the results screen: commit deaths if needed, then start the
    /// next day or end the game.
    ///
    /// The game is won when every trophic level still has a live organism
    /// after the final day's deaths.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::GameEnded`] or [`SessionError::WrongPhase`]
    /// unless a result is being shown, or [`SessionError::Draft`] if the
    /// next offer cannot be drawn.
    pub fn proceed_to_next_day(&mut self) -> Result<ProceedOutcome, SessionError> {
        self.commit_deaths()?;
        self.pending = None;
        self.offer.clear();

        match self.cycle.advance_day()? {
            DayAdvance::NextDay(day) => {
                self.begin_day()?;
                Ok(ProceedOutcome::NextDay(day))
            }
            DayAdvance::Ended => {
                let outcome = GameOutcome {
                    won: simulation::is_balanced(&self.population),
                    score: self.score,
                    days_played: self.rules.total_days,
                };
                self.outcome = Some(outcome);
                info!(won = outcome.won, score = outcome.score, "Game over");
                self.observer.on_event(&GameEvent::GameOver {
                    won: outcome.won,
                    score: outcome.score,
                });
                Ok(ProceedOutcome::GameOver(outcome))
            }
        }
    }

    /// Whether one more organism of `species_id` would be fed today.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Catalog`] for an unknown species.
    pub fn preview_feedability(&self, species_id: &SpeciesId) -> Result<Feedability, SessionError> {
        let species = self.catalog.lookup(species_id)?;
        Ok(simulation::preview_feedability(
            &self.population,
            species.level,
            self.rules.food_requirement,
        ))
    }

    /// What a [`PlacementStrategy`](crate::strategy::PlacementStrategy)
    /// sees during placement.
    pub const fn placement_context(&self) -> PlacementContext<'_> {
        PlacementContext {
            day: self.cycle.day(),
            offer: &self.offer,
            population: &self.population,
            catalog: &self.catalog,
            rules: &self.rules,
        }
    }

    /// Capture the persistent part of the session.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            current_day: self.cycle.day(),
            total_score: self.score,
            active: !self.cycle.is_ended(),
            next_instance_id: self.population.next_instance_id(),
            organisms: self.population.iter().cloned().collect(),
            occupied_slots: self.population.occupied_slots().clone(),
        }
    }

    /// Write the session to `store` under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::PendingResults`] while a day is being
    /// simulated or shown, or [`SessionError::Save`] if the store fails.
    pub fn save(&self, store: &mut dyn SaveStore, key: &str) -> Result<(), SessionError> {
        if matches!(
            self.cycle.phase(),
            GamePhase::Simulating | GamePhase::Results
        ) {
            return Err(SessionError::PendingResults);
        }
        save_snapshot(store, key, &self.snapshot())?;
        Ok(())
    }

    /// Read the session stored under `key`, replacing the current one.
    ///
    /// Returns `Ok(false)` and leaves the session untouched when there is
    /// no save under that key.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::CorruptSave`] for an unreadable or invalid
    /// save, or [`SessionError::Save`] if the store itself fails.
    pub fn load(&mut self, store: &dyn SaveStore, key: &str) -> Result<bool, SessionError> {
        let snapshot = match load_snapshot(store, key) {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => return Ok(false),
            Err(SaveError::Corrupt { reason }) => return Err(SessionError::CorruptSave { reason }),
            Err(err @ SaveError::UnsupportedVersion { .. }) => {
                return Err(SessionError::CorruptSave {
                    reason: err.to_string(),
                });
            }
            Err(err) => return Err(err.into()),
        };
        self.restore(snapshot)?;
        Ok(true)
    }

    /// Replace the current game with `snapshot`.
    ///
    /// An active game resumes in placement with a fresh offer. Nothing
    /// changes if the snapshot is invalid.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::CorruptSave`] if the snapshot is not a
    /// reachable game state.
    pub fn restore(&mut self, snapshot: SessionSnapshot) -> Result<(), SessionError> {
        let cycle = DayCycle::restore(snapshot.current_day, self.rules.total_days)
            .map_err(|e| corrupt(e.to_string()))?;
        if snapshot.active == cycle.is_ended() {
            return Err(corrupt(format!(
                "active flag {} contradicts day {}",
                snapshot.active, snapshot.current_day
            )));
        }
        for organism in &snapshot.organisms {
            let species = self
                .catalog
                .lookup(&organism.species)
                .map_err(|e| corrupt(e.to_string()))?;
            if species.level != organism.level {
                return Err(corrupt(format!(
                    "instance {} is recorded as {} but {} is {}",
                    organism.id, organism.level, species.id, species.level
                )));
            }
            if organism.health != HealthStatus::Healthy {
                return Err(corrupt(format!(
                    "instance {} is saved as {:?}",
                    organism.id, organism.health
                )));
            }
        }
        let population = PopulationStore::from_parts(
            self.rules.total_slots,
            snapshot.next_instance_id,
            snapshot.organisms,
            snapshot.occupied_slots,
        )
        .map_err(|e| corrupt(e.to_string()))?;

        for instance_id in self.population.reset() {
            self.observer
                .on_event(&GameEvent::OrganismRemoved { instance_id });
        }
        self.population = population;
        self.cycle = cycle;
        self.score = snapshot.total_score;
        self.pending = None;
        self.offer.clear();
        self.outcome = cycle.is_ended().then(|| GameOutcome {
            won: simulation::is_balanced(&self.population),
            score: self.score,
            days_played: self.rules.total_days,
        });

        for instance in self.population.iter() {
            self.observer.on_event(&GameEvent::OrganismAdded {
                instance: instance.clone(),
            });
        }
        if !cycle.is_ended() {
            self.begin_day()?;
        }
        info!(
            day = self.cycle.day(),
            score = self.score,
            organisms = self.population.len(),
            "Game restored"
        );
        Ok(())
    }

    /// Current phase.
    pub const fn phase(&self) -> GamePhase {
        self.cycle.phase()
    }

    /// Current day (`total_days + 1` once ended).
    pub const fn day(&self) -> u32 {
        self.cycle.day()
    }

    /// Length of the game in days.
    pub const fn total_days(&self) -> u32 {
        self.cycle.total_days()
    }

    /// Cumulative score.
    pub const fn score(&self) -> u32 {
        self.score
    }

    /// Whether the game is still being played.
    pub const fn is_active(&self) -> bool {
        !self.cycle.is_ended()
    }

    /// Species still available for placement today.
    pub const fn offer(&self) -> &DraftOffer {
        &self.offer
    }

    /// Live organisms.
    pub const fn population(&self) -> &PopulationStore {
        &self.population
    }

    /// Species table.
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Rules in force.
    pub const fn rules(&self) -> &RulesConfig {
        &self.rules
    }

    /// Today's result while it is being shown.
    pub fn last_result(&self) -> Option<&DayResult> {
        self.pending.as_ref().map(|p| &p.result)
    }

    /// How the game ended, once it has.
    pub const fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    /// The observer.
    pub const fn observer(&self) -> &O {
        &self.observer
    }

    /// The observer, mutably.
    pub const fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// Draw an offer for the current day, open placement, and announce the
    /// day.
    fn begin_day(&mut self) -> Result<(), SessionError> {
        self.offer = self.generator.generate(&self.catalog, &mut self.rng)?;
        self.cycle.transition(GamePhase::Placement)?;
        debug!(
            day = self.cycle.day(),
            days_remaining = self.cycle.days_remaining(),
            final_day = self.cycle.is_final_day(),
            offer = ?self.offer.as_slice(),
            "Offer drawn"
        );
        self.observer.on_event(&GameEvent::DayChanged {
            day: self.cycle.day(),
        });
        Ok(())
    }

    fn require_phase(&self, expected: GamePhase) -> Result<(), SessionError> {
        match self.cycle.phase() {
            GamePhase::Ended => Err(SessionError::GameEnded),
            actual if actual == expected => Ok(()),
            actual => Err(SessionError::WrongPhase { expected, actual }),
        }
    }
}

fn corrupt(reason: String) -> SessionError {
    SessionError::CorruptSave { reason }
}
