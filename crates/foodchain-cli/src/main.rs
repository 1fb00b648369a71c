//! Command-line runner for the Foodchain game.
//!
//! Resumes the autosaved game (or starts a new one), auto-plays every
//! remaining day with the greedy placement strategy, and saves after each
//! day.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `$FOODCHAIN_CONFIG` or `foodchain-config.yaml`
//! 2. Initialize structured logging (tracing)
//! 3. Build the species catalog and the save store
//! 4. Resume the autosave, falling back to a new game
//! 5. Play days until the game ends, saving after each one
//! 6. Log the outcome

mod error;
mod observer;

use std::path::PathBuf;

use foodchain_core::config::{GameConfig, LoggingConfig};
use foodchain_core::runner;
use foodchain_core::session::ProceedOutcome;
use foodchain_core::strategy::GreedyStrategy;
use foodchain_core::{GameSession, SessionError};
use foodchain_save::FileSaveStore;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;
use crate::observer::TracingObserver;

/// Default configuration file, relative to the working directory.
const DEFAULT_CONFIG_PATH: &str = "foodchain-config.yaml";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration, logging setup, or the game session
/// fails unrecoverably.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration.
    let (config, config_path) = load_config()?;

    // 2. Initialize structured logging.
    init_logging(&config.logging)?;
    info!(
        config = %config_path.display(),
        total_days = config.rules.total_days,
        total_slots = config.rules.total_slots,
        draft_size = config.rules.draft_size,
        food_requirement = config.rules.food_requirement,
        seed = ?config.draft.seed,
        "Configuration loaded"
    );

    // 3. Catalog and save store.
    let catalog = config.build_catalog().map_err(EngineError::from)?;
    let mut store = FileSaveStore::new(&config.save.directory);
    let slot = config.save.slot.as_str();
    info!(
        species = catalog.len(),
        save_dir = %store.directory().display(),
        slot,
        "Catalog and save store ready"
    );

    // 4. Resume or start.
    let mut session =
        GameSession::new(&config, catalog, TracingObserver::new()).map_err(EngineError::from)?;
    resume(&mut session, &store, slot).map_err(EngineError::from)?;

    // 5. Play.
    let mut strategy = GreedyStrategy;
    let outcome = loop {
        let report =
            runner::play_day(&mut session, &mut strategy).map_err(EngineError::from)?;
        info!(
            day = report.day,
            placed = report.placed.len(),
            deaths = report.result.dead.len(),
            score = session.score(),
            "Day finished"
        );

        if let Err(e) = session.save(&mut store, slot) {
            warn!(error = %e, "Autosave failed, continuing without it");
        }

        if let ProceedOutcome::GameOver(outcome) = report.next {
            break outcome;
        }
    };

    // 6. Log results.
    runner::log_game_end(&outcome);
    info!(
        events = session.observer().events_seen(),
        "foodchain shutdown complete"
    );

    Ok(())
}

/// Load configuration from `$FOODCHAIN_CONFIG` or the default path.
///
/// A missing file means defaults.
fn load_config() -> Result<(GameConfig, PathBuf), EngineError> {
    let path = std::env::var_os("FOODCHAIN_CONFIG")
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
    let config = if path.exists() {
        GameConfig::from_file(&path)?
    } else {
        GameConfig::parse("")?
    };
    Ok((config, path))
}

/// Install the global subscriber. `RUST_LOG` wins over the configured level.
fn init_logging(logging: &LoggingConfig) -> Result<(), EngineError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let installed = if logging.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .try_init()
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .try_init()
    };
    installed.map_err(|e| EngineError::Logging {
        message: e.to_string(),
    })
}

/// Load the autosave into `session`.
///
/// A missing, unreadable or corrupt save leaves the fresh game in place.
/// A save of a finished game is replaced by a new game.
fn resume(
    session: &mut GameSession<TracingObserver>,
    store: &FileSaveStore,
    slot: &str,
) -> Result<(), SessionError> {
    match session.load(store, slot) {
        Ok(true) if !session.is_active() => {
            info!(score = session.score(), "Saved game already finished, starting a new one");
            session.start_new_game()
        }
        Ok(true) => {
            info!(day = session.day(), score = session.score(), "Saved game resumed");
            Ok(())
        }
        Ok(false) => {
            info!("No saved game, starting a new one");
            Ok(())
        }
        Err(e @ (SessionError::CorruptSave { .. } | SessionError::Save { .. })) => {
            warn!(error = %e, "Could not resume saved game, starting a new one");
            Ok(())
        }
        Err(e) => Err(e),
    }
}
