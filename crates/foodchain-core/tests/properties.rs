//! Properties of the feeding rule and the session that must hold for any
//! population, checked over seeded random inputs.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects,
    clippy::missing_panics_doc
)]

use foodchain_core::config::{GameConfig, RulesConfig};
use foodchain_core::runner::play_day;
use foodchain_core::simulation::{commit_deaths, feeding_capacity, run_day};
use foodchain_core::strategy::GreedyStrategy;
use foodchain_core::{EventLog, GameSession, NoOpObserver, ProceedOutcome};
use foodchain_ecosystem::{Catalog, PopulationStore};
use foodchain_save::{FileSaveStore, MemorySaveStore};
use foodchain_types::{HealthStatus, TrophicLevel};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// A population of random size and mix, placed in random order into
/// random slots.
fn random_population(rng: &mut StdRng, catalog: &Catalog) -> PopulationStore {
    let total_slots = 50;
    let mut store = PopulationStore::new(total_slots);
    let mut slots: Vec<u32> = (0..total_slots).collect();
    slots.shuffle(rng);

    let species: Vec<_> = catalog.iter().cloned().collect();
    let count = rng.random_range(0..=40);
    for slot in slots.into_iter().take(count) {
        let pick = &species[rng.random_range(0..species.len())];
        store.place(pick, slot, 1).unwrap();
    }
    store
}

fn healthy_at(store: &PopulationStore, ids: &[foodchain_types::InstanceId], level: TrophicLevel) -> u32 {
    let n = ids
        .iter()
        .filter(|id| store.get(**id).is_some_and(|o| o.level == level))
        .count();
    u32::try_from(n).unwrap()
}

#[test]
fn fed_consumers_never_exceed_capacity() {
    let catalog = Catalog::builtin();
    let rules = RulesConfig::default();
    let mut rng = StdRng::seed_from_u64(1);

    for _ in 0..500 {
        let store = random_population(&mut rng, &catalog);
        let result = run_day(&store, &rules, 1);
        let producers = store.count_at_level(TrophicLevel::Producer);
        let primaries = store.count_at_level(TrophicLevel::Primary);

        assert!(healthy_at(&store, &result.healthy, TrophicLevel::Primary) <= producers / 3);
        assert!(healthy_at(&store, &result.healthy, TrophicLevel::Secondary) <= primaries / 3);
    }
}

#[test]
fn capacity_is_used_before_anyone_starves() {
    let catalog = Catalog::builtin();
    let rules = RulesConfig::default();
    let mut rng = StdRng::seed_from_u64(2);

    for _ in 0..500 {
        let store = random_population(&mut rng, &catalog);
        let result = run_day(&store, &rules, 1);
        let capacity = feeding_capacity(&store, rules.food_requirement);

        let fed_primary = healthy_at(&store, &result.healthy, TrophicLevel::Primary);
        assert_eq!(fed_primary, capacity.primaries.min(capacity.feedable_primary));
        let fed_secondary = healthy_at(&store, &result.healthy, TrophicLevel::Secondary);
        assert_eq!(
            fed_secondary,
            capacity.secondaries.min(capacity.feedable_secondary)
        );
    }
}

#[test]
fn producers_never_die() {
    let catalog = Catalog::builtin();
    let rules = RulesConfig::default();
    let mut rng = StdRng::seed_from_u64(3);

    for _ in 0..500 {
        let store = random_population(&mut rng, &catalog);
        let result = run_day(&store, &rules, 1);
        assert!(
            result
                .dead
                .iter()
                .all(|id| store.get(*id).is_some_and(|o| o.level.is_consumer()))
        );
        assert_eq!(
            result.healthy.len() + result.dead.len(),
            store.len()
        );
    }
}

#[test]
fn running_a_day_twice_gives_the_same_result() {
    let catalog = Catalog::builtin();
    let rules = RulesConfig::default();
    let mut rng = StdRng::seed_from_u64(4);

    for _ in 0..200 {
        let store = random_population(&mut rng, &catalog);
        let before = store.clone();
        let first = run_day(&store, &rules, 5);
        let second = run_day(&store, &rules, 5);
        assert_eq!(first, second);
        assert_eq!(store, before);
    }
}

#[test]
fn committing_leaves_only_healthy_organisms() {
    let catalog = Catalog::builtin();
    let rules = RulesConfig::default();
    let mut rng = StdRng::seed_from_u64(5);

    for _ in 0..200 {
        let mut store = random_population(&mut rng, &catalog);
        let result = run_day(&store, &rules, 1);
        let removed = commit_deaths(&mut store, &result);

        assert_eq!(removed.len(), result.dead.len());
        assert_eq!(store.len(), result.healthy.len());
        assert!(store.iter().all(|o| o.health == HealthStatus::Healthy));
        for id in &result.dead {
            assert!(store.get(*id).is_none());
        }
    }
}

#[test]
fn links_respect_the_food_requirement() {
    let catalog = Catalog::builtin();
    let rules = RulesConfig::default();
    let mut rng = StdRng::seed_from_u64(6);

    for _ in 0..200 {
        let store = random_population(&mut rng, &catalog);
        let result = run_day(&store, &rules, 1);

        let mut seen_food = std::collections::BTreeSet::new();
        for link in &result.links {
            assert!(result.is_healthy(link.eater));
            let eater = store.get(link.eater).unwrap();
            let food = store.get(link.food).unwrap();
            assert_eq!(eater.level.food_source(), Some(food.level));
            assert!(seen_food.insert(link.food), "food reused across eaters");
        }
        for eater in result.links.iter().map(|l| l.eater) {
            assert_eq!(result.foods_of(eater).count(), 3);
        }
    }
}

#[test]
fn score_never_decreases_across_a_game() {
    for seed in 0..10 {
        let mut config = GameConfig::default();
        config.draft.seed = Some(seed);
        let mut session = GameSession::new(&config, Catalog::builtin(), NoOpObserver).unwrap();

        let mut last = session.score();
        loop {
            let report = play_day(&mut session, &mut GreedyStrategy).unwrap();
            assert!(session.score() >= last);
            assert_eq!(session.score(), last + report.result.score_delta);
            last = session.score();
            if matches!(report.next, ProceedOutcome::GameOver(_)) {
                break;
            }
        }
    }
}

#[test]
fn save_load_round_trip_at_every_day() {
    let mut config = GameConfig::default();
    config.draft.seed = Some(99);
    let mut session = GameSession::new(&config, Catalog::builtin(), NoOpObserver).unwrap();
    let mut store = MemorySaveStore::new();

    while session.is_active() {
        session.save(&mut store, "autosave").unwrap();
        let saved = session.snapshot();

        let mut other = GameSession::new(&config, Catalog::builtin(), EventLog::new()).unwrap();
        assert!(other.load(&store, "autosave").unwrap());
        assert_eq!(other.snapshot(), saved);

        play_day(&mut session, &mut GreedyStrategy).unwrap();
    }

    // An ended game round-trips too.
    session.save(&mut store, "autosave").unwrap();
    let mut other = GameSession::new(&config, Catalog::builtin(), NoOpObserver).unwrap();
    assert!(other.load(&store, "autosave").unwrap());
    assert_eq!(other.snapshot(), session.snapshot());
    assert!(!other.is_active());
    assert_eq!(
        other.outcome().map(|o| o.won),
        session.outcome().map(|o| o.won)
    );
}

#[test]
fn file_save_resumes_the_same_game() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = FileSaveStore::new(dir.path());
    let mut config = GameConfig::default();
    config.draft.seed = Some(5);

    let mut session = GameSession::new(&config, Catalog::builtin(), NoOpObserver).unwrap();
    for _ in 0..3 {
        play_day(&mut session, &mut GreedyStrategy).unwrap();
    }
    session.save(&mut store, "autosave").unwrap();

    let mut resumed = GameSession::new(&config, Catalog::builtin(), NoOpObserver).unwrap();
    assert!(resumed.load(&store, "autosave").unwrap());
    assert_eq!(resumed.day(), 4);
    assert_eq!(resumed.score(), session.score());
    assert_eq!(resumed.population(), session.population());
}

#[test]
fn garbage_save_is_reported_as_corrupt() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("autosave.json"), b"{ not json").unwrap();
    let store = FileSaveStore::new(dir.path());

    let mut session =
        GameSession::new(&GameConfig::default(), Catalog::builtin(), NoOpObserver).unwrap();
    let before = session.snapshot();
    assert!(matches!(
        session.load(&store, "autosave"),
        Err(foodchain_core::SessionError::CorruptSave { .. })
    ));
    assert_eq!(session.snapshot(), before);
}
