//! Configuration loading and typed config structures for the Foodchain game.
//!
//! The canonical configuration lives in `foodchain-config.yaml` at the
//! project root. Every field has a default, so an empty file (or no file)
//! yields the standard game: 12 days, 50 slots, drafts of 5, and the
//! 1-to-3 feeding rule.

use std::path::Path;

use foodchain_ecosystem::{Catalog, CatalogError, DraftGenerator};
use foodchain_types::Species;
use serde::Deserialize;

/// Producers a primary consumer needs, and primaries a secondary needs.
pub const FOOD_REQUIREMENT: u32 = 3;
/// Length of a game in days.
pub const TOTAL_DAYS: u32 = 12;
/// Species per daily offer.
pub const DRAFT_SIZE: u32 = 5;
/// Size of the placement grid.
pub const TOTAL_SLOTS: u32 = 50;
/// Points per fed consumer per day.
pub const POINTS_PER_HEALTHY: u32 = 10;
/// Fewest producers in an offer.
pub const MIN_DRAFT_PRODUCERS: u32 = 2;
/// Most producers in an offer.
pub const MAX_DRAFT_PRODUCERS: u32 = 3;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// A value is out of its allowed range.
    #[error("invalid configuration: {reason}")]
    Invalid {
        /// Which value is wrong and why.
        reason: String,
    },

    /// The configured species list does not form a valid catalog.
    #[error("invalid catalog: {source}")]
    Catalog {
        /// The underlying catalog error.
        #[from]
        source: CatalogError,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level game configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GameConfig {
    /// Feeding rule, game length, and grid size.
    #[serde(default)]
    pub rules: RulesConfig,

    /// Draft composition and seeding.
    #[serde(default)]
    pub draft: DraftConfig,

    /// Species list replacing the built-in catalog.
    #[serde(default)]
    pub catalog: Option<Vec<Species>>,

    /// Where saves go.
    #[serde(default)]
    pub save: SaveConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl GameConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// `FOODCHAIN_SAVE_DIR` overrides `save.directory` when set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if it is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value is out of range.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse and validate configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML or
    /// [`ConfigError::Invalid`] if a value is out of range.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yml::from_str(yaml)?
        };
        config.save.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Check that every value is usable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first bad value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let rules = &self.rules;
        let checks = [
            (rules.food_requirement == 0, "rules.food_requirement must be at least 1"),
            (rules.total_days == 0, "rules.total_days must be at least 1"),
            (rules.draft_size == 0, "rules.draft_size must be at least 1"),
            (rules.total_slots == 0, "rules.total_slots must be at least 1"),
            (
                self.draft.min_producers > self.draft.max_producers,
                "draft.min_producers must not exceed draft.max_producers",
            ),
            (self.save.slot.is_empty(), "save.slot must not be empty"),
        ];
        match checks.iter().find(|(failed, _)| *failed) {
            Some((_, reason)) => Err(ConfigError::Invalid {
                reason: (*reason).to_owned(),
            }),
            None => Ok(()),
        }
    }

    /// Build the species catalog: the configured list, or the built-in one.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Catalog`] if the configured list is empty or
    /// has duplicate ids.
    pub fn build_catalog(&self) -> Result<Catalog, ConfigError> {
        match &self.catalog {
            Some(species) => Ok(Catalog::new(species.clone())?),
            None => Ok(Catalog::builtin()),
        }
    }

    /// Build the draft generator described by `rules` and `draft`.
    pub fn draft_generator(&self) -> DraftGenerator {
        DraftGenerator::new(
            to_usize(self.rules.draft_size),
            to_usize(self.draft.min_producers),
            to_usize(self.draft.max_producers),
        )
    }
}

fn to_usize(value: u32) -> usize {
    usize::try_from(value).unwrap_or(usize::MAX)
}

/// Game rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct RulesConfig {
    /// Food units one consumer needs (the "1-to-3 rule").
    #[serde(default = "default_food_requirement")]
    pub food_requirement: u32,

    /// Number of playable days.
    #[serde(default = "default_total_days")]
    pub total_days: u32,

    /// Species per daily offer.
    #[serde(default = "default_draft_size")]
    pub draft_size: u32,

    /// Size of the placement grid.
    #[serde(default = "default_total_slots")]
    pub total_slots: u32,

    /// Points per fed consumer per day. Producers score nothing.
    #[serde(default = "default_points_per_healthy")]
    pub points_per_healthy: u32,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            food_requirement: FOOD_REQUIREMENT,
            total_days: TOTAL_DAYS,
            draft_size: DRAFT_SIZE,
            total_slots: TOTAL_SLOTS,
            points_per_healthy: POINTS_PER_HEALTHY,
        }
    }
}

/// Draft composition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct DraftConfig {
    /// Fewest producers per offer.
    #[serde(default = "default_min_producers")]
    pub min_producers: u32,

    /// Most producers per offer.
    #[serde(default = "default_max_producers")]
    pub max_producers: u32,

    /// Seed for reproducible offers. Absent means OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for DraftConfig {
    fn default() -> Self {
        Self {
            min_producers: MIN_DRAFT_PRODUCERS,
            max_producers: MAX_DRAFT_PRODUCERS,
            seed: None,
        }
    }
}

/// Save location.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SaveConfig {
    /// Directory for save files.
    #[serde(default = "default_save_directory")]
    pub directory: String,

    /// Key of the autosave slot.
    #[serde(default = "default_save_slot")]
    pub slot: String,
}

impl SaveConfig {
    /// Override the save directory with `FOODCHAIN_SAVE_DIR` when set.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("FOODCHAIN_SAVE_DIR") {
            self.directory = val;
        }
    }
}

impl Default for SaveConfig {
    fn default() -> Self {
        Self {
            directory: default_save_directory(),
            slot: default_save_slot(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level used when `RUST_LOG` is unset (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable text.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

const fn default_food_requirement() -> u32 {
    FOOD_REQUIREMENT
}

const fn default_total_days() -> u32 {
    TOTAL_DAYS
}

const fn default_draft_size() -> u32 {
    DRAFT_SIZE
}

const fn default_total_slots() -> u32 {
    TOTAL_SLOTS
}

const fn default_points_per_healthy() -> u32 {
    POINTS_PER_HEALTHY
}

const fn default_min_producers() -> u32 {
    MIN_DRAFT_PRODUCERS
}

const fn default_max_producers() -> u32 {
    MAX_DRAFT_PRODUCERS
}

fn default_save_directory() -> String {
    String::from("saves")
}

fn default_save_slot() -> String {
    String::from("autosave")
}

fn default_log_level() -> String {
    String::from("info")
}
