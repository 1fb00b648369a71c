//! The feeding rule: who is fed, who starves, and what gets drawn.
//!
//! A day is computed from aggregate counts alone:
//!
//! ```text
//! feedable_primary   = floor(producers / food_requirement)
//! feedable_secondary = floor(primaries / food_requirement)
//! ```
//!
//! Organisms are then visited in ascending instance id order. Producers
//! are always healthy; each consumer takes one unit of its level's
//! capacity if any is left and starves otherwise. Fractional capacity is
//! simply unused. Every fed consumer scores `points_per_healthy`; producers
//! cannot starve and score nothing.
//!
//! Computing a day never mutates the population. [`commit_deaths`] applies
//! a computed [`DayResult`] afterwards, so the front-end can show the
//! outcome (death animations) before anything disappears.

use foodchain_ecosystem::PopulationStore;
use foodchain_types::{
    DayResult, Feedability, FeedingCapacity, FoodLink, HealthStatus, InstanceId,
    OrganismInstance, TrophicLevel,
};

use crate::config::RulesConfig;

/// Count each level and derive how many consumers can be fed.
pub fn feeding_capacity(population: &PopulationStore, food_requirement: u32) -> FeedingCapacity {
    let producers = population.count_at_level(TrophicLevel::Producer);
    let primaries = population.count_at_level(TrophicLevel::Primary);
    let secondaries = population.count_at_level(TrophicLevel::Secondary);
    FeedingCapacity {
        producers,
        primaries,
        secondaries,
        feedable_primary: producers.checked_div(food_requirement).unwrap_or(0),
        feedable_secondary: primaries.checked_div(food_requirement).unwrap_or(0),
    }
}

/// Compute the outcome of `day` for the current population.
///
/// Pure: calling it twice on the same population gives the same result.
pub fn run_day(population: &PopulationStore, rules: &RulesConfig, day: u32) -> DayResult {
    let capacity = feeding_capacity(population, rules.food_requirement);
    let mut primary_left = capacity.feedable_primary;
    let mut secondary_left = capacity.feedable_secondary;

    let mut healthy = Vec::new();
    let mut dead = Vec::new();

    for organism in population.iter() {
        let fed = match organism.level {
            TrophicLevel::Producer => true,
            TrophicLevel::Primary => claim(&mut primary_left),
            TrophicLevel::Secondary => claim(&mut secondary_left),
        };
        if fed {
            healthy.push(organism.id);
        } else {
            dead.push(organism.id);
        }
    }

    debug_assert_eq!(
        healthy.len().saturating_add(dead.len()),
        population.len(),
        "every organism must be either healthy or dead"
    );

    let fed_consumers = healthy
        .iter()
        .filter(|id| population.get(**id).is_some_and(|o| o.level.is_consumer()))
        .count();
    let score_delta = u32::try_from(fed_consumers)
        .unwrap_or(u32::MAX)
        .saturating_mul(rules.points_per_healthy);
    let links = food_links(population, &healthy, rules.food_requirement);

    DayResult {
        day,
        healthy,
        dead,
        score_delta,
        links,
        capacity,
    }
}

/// Take one unit of capacity if any is left.
fn claim(left: &mut u32) -> bool {
    match left.checked_sub(1) {
        Some(rest) => {
            *left = rest;
            true
        }
        None => false,
    }
}

/// Draw food-chain edges for the healthy consumers.
///
/// Each healthy consumer, in id order, is linked to the next
/// `food_requirement` organisms of its food level, without reuse. A consumer
/// for which a full set is no longer available (and every one after it) gets
/// no links. Purely cosmetic.
fn food_links(
    population: &PopulationStore,
    healthy: &[InstanceId],
    food_requirement: u32,
) -> Vec<FoodLink> {
    let per_eater = usize::try_from(food_requirement).unwrap_or(usize::MAX);
    let mut links = Vec::new();

    for level in [TrophicLevel::Primary, TrophicLevel::Secondary] {
        let Some(food_level) = level.food_source() else {
            continue;
        };
        let mut food = population.ids_at_level(food_level);
        let eaters = healthy
            .iter()
            .filter(|id| population.get(**id).is_some_and(|o| o.level == level));

        for eater in eaters {
            let meal: Vec<InstanceId> = food.by_ref().take(per_eater).collect();
            if meal.len() < per_eater {
                break;
            }
            links.extend(meal.into_iter().map(|prey| FoodLink {
                eater: *eater,
                food: prey,
            }));
        }
    }

    links
}

/// Apply a computed day to the population.
///
/// Survivors are marked healthy; the dead are marked and removed. Returns
/// the removed organisms in ascending id order. Applying the same result
/// twice is harmless: already-removed organisms are skipped.
pub fn commit_deaths(population: &mut PopulationStore, result: &DayResult) -> Vec<OrganismInstance> {
    for id in &result.healthy {
        population.set_health(*id, HealthStatus::Healthy);
    }
    result
        .dead
        .iter()
        .filter_map(|id| {
            population.set_health(*id, HealthStatus::Dead);
            population.remove(*id)
        })
        .collect()
}

/// Project whether one more organism at `level` would be fed, without
/// changing anything.
///
/// For consumers, `available` is the food units not already claimed by
/// the existing consumers at that level. Producers need no food, so their
/// preview reports `available = u32::MAX` and `needed = 0`.
pub fn preview_feedability(
    population: &PopulationStore,
    level: TrophicLevel,
    food_requirement: u32,
) -> Feedability {
    let Some(food_level) = level.food_source() else {
        return Feedability {
            can_feed: true,
            available: u32::MAX,
            needed: 0,
        };
    };
    let food = population.count_at_level(food_level);
    let claimed = population
        .count_at_level(level)
        .saturating_mul(food_requirement);
    let available = food.saturating_sub(claimed);
    Feedability {
        can_feed: available >= food_requirement,
        available,
        needed: food_requirement,
    }
}

/// Whether every trophic level has at least one live organism.
pub fn is_balanced(population: &PopulationStore) -> bool {
    TrophicLevel::ALL
        .into_iter()
        .all(|level| population.count_at_level(level) > 0)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use foodchain_types::{Species, SpeciesId};

    use super::*;

    fn species(level: TrophicLevel) -> Species {
        let id = match level {
            TrophicLevel::Producer => "grass",
            TrophicLevel::Primary => "rabbit",
            TrophicLevel::Secondary => "fox",
        };
        Species {
            id: SpeciesId::new(id),
            name: id.to_owned(),
            level,
            description: String::new(),
            icon: String::new(),
            draftable: true,
        }
    }

    /// Place organisms in the given order into consecutive slots.
    fn populate(levels: &[TrophicLevel]) -> PopulationStore {
        let mut store = PopulationStore::new(50);
        for (slot, level) in (0_u32..).zip(levels) {
            store.place(&species(*level), slot, 1).unwrap();
        }
        store
    }

    fn repeat(level: TrophicLevel, n: usize) -> Vec<TrophicLevel> {
        vec![level; n]
    }

    const P: TrophicLevel = TrophicLevel::Producer;
    const H: TrophicLevel = TrophicLevel::Primary;
    const S: TrophicLevel = TrophicLevel::Secondary;

    #[test]
    fn capacity_uses_floor_division() {
        let store = populate(&[repeat(P, 7), repeat(H, 5)].concat());
        let capacity = feeding_capacity(&store, 3);
        assert_eq!(capacity.producers, 7);
        assert_eq!(capacity.feedable_primary, 2);
        assert_eq!(capacity.feedable_secondary, 1);
    }

    #[test]
    fn producers_alone_are_always_healthy() {
        let store = populate(&repeat(P, 4));
        let result = run_day(&store, &RulesConfig::default(), 1);
        assert_eq!(result.healthy.len(), 4);
        assert!(result.dead.is_empty());
        assert_eq!(result.score_delta, 0);
        assert!(result.links.is_empty());
    }

    #[test]
    fn earliest_consumers_are_fed_first() {
        // Producers 1-3, rabbits 4 and 5: only one rabbit can eat.
        let store = populate(&[repeat(P, 3), repeat(H, 2)].concat());
        let result = run_day(&store, &RulesConfig::default(), 1);
        assert!(result.is_healthy(InstanceId(4)));
        assert!(result.is_dead(InstanceId(5)));
        assert_eq!(result.score_delta, 10);
    }

    #[test]
    fn run_day_does_not_touch_the_population() {
        let store = populate(&[repeat(P, 2), repeat(H, 2), vec![S]].concat());
        let before = store.clone();
        let first = run_day(&store, &RulesConfig::default(), 3);
        let second = run_day(&store, &RulesConfig::default(), 3);
        assert_eq!(first, second);
        assert_eq!(store, before);
    }

    #[test]
    fn links_use_distinct_food_per_eater() {
        let store = populate(&[repeat(P, 6), repeat(H, 2)].concat());
        let result = run_day(&store, &RulesConfig::default(), 1);

        let first: Vec<_> = result.foods_of(InstanceId(7)).collect();
        let second: Vec<_> = result.foods_of(InstanceId(8)).collect();
        assert_eq!(first, vec![InstanceId(1), InstanceId(2), InstanceId(3)]);
        assert_eq!(second, vec![InstanceId(4), InstanceId(5), InstanceId(6)]);
    }

    #[test]
    fn secondary_links_draw_on_primaries() {
        let store = populate(&[repeat(P, 9), repeat(H, 3), vec![S]].concat());
        let result = run_day(&store, &RulesConfig::default(), 1);
        assert!(result.dead.is_empty());
        let foods: Vec<_> = result.foods_of(InstanceId(13)).collect();
        assert_eq!(foods, vec![InstanceId(10), InstanceId(11), InstanceId(12)]);
        assert_eq!(result.links.len(), 12);
    }

    #[test]
    fn dead_consumers_get_no_links() {
        let store = populate(&[repeat(P, 2), vec![H]].concat());
        let result = run_day(&store, &RulesConfig::default(), 1);
        assert!(result.is_dead(InstanceId(3)));
        assert!(result.links.is_empty());
    }

    #[test]
    fn commit_removes_dead_and_is_idempotent() {
        let mut store = populate(&[repeat(P, 3), repeat(H, 2)].concat());
        let result = run_day(&store, &RulesConfig::default(), 1);

        let removed = commit_deaths(&mut store, &result);
        assert_eq!(removed.len(), 1);
        assert_eq!(removed.first().map(|o| o.id), Some(InstanceId(5)));
        assert_eq!(removed.first().map(|o| o.health), Some(HealthStatus::Dead));
        assert_eq!(store.len(), 4);
        assert_eq!(store.occupant(4), None);

        let again = commit_deaths(&mut store, &result);
        assert!(again.is_empty());
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn preview_for_producers_is_unlimited() {
        let store = PopulationStore::new(10);
        let preview = preview_feedability(&store, P, 3);
        assert!(preview.can_feed);
        assert_eq!(preview.available, u32::MAX);
        assert_eq!(preview.needed, 0);
    }

    #[test]
    fn preview_accounts_for_existing_consumers() {
        let store = populate(&[repeat(P, 7), vec![H]].concat());
        let preview = preview_feedability(&store, H, 3);
        assert_eq!(preview.available, 4);
        assert_eq!(preview.needed, 3);
        assert!(preview.can_feed);

        let store = populate(&[repeat(P, 5), vec![H]].concat());
        let preview = preview_feedability(&store, H, 3);
        assert_eq!(preview.available, 2);
        assert!(!preview.can_feed);
    }

    #[test]
    fn preview_never_goes_negative() {
        let store = populate(&[vec![P], repeat(H, 4)].concat());
        let preview = preview_feedability(&store, H, 3);
        assert_eq!(preview.available, 0);
        assert!(!preview.can_feed);

        let preview = preview_feedability(&store, S, 3);
        assert_eq!(preview.available, 4);
        assert!(preview.can_feed);
    }

    #[test]
    fn balance_requires_every_level() {
        assert!(!is_balanced(&populate(&[P, H])));
        assert!(is_balanced(&populate(&[P, H, S])));
    }
}
