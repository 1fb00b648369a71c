//! The population store: every live organism and the slot it occupies.
//!
//! The store maintains a bijection between live instances and occupied
//! slots at every operation boundary. Instances are kept in a
//! [`BTreeMap`] keyed by [`InstanceId`], so iteration is always in
//! ascending id (creation) order; the feeding rule relies on this order to
//! decide which individuals are fed when capacity is partial.

use std::collections::BTreeMap;

use foodchain_types::{HealthStatus, InstanceId, OrganismInstance, Species, TrophicLevel};
use tracing::debug;

use crate::error::PopulationError;

/// Owns the live organisms of one game session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopulationStore {
    /// Size of the slot grid.
    total_slots: u32,
    /// Identifier the next placement receives.
    next_id: InstanceId,
    /// Live organisms by id.
    instances: BTreeMap<InstanceId, OrganismInstance>,
    /// Slot -> occupying organism.
    occupied: BTreeMap<u32, InstanceId>,
}

impl PopulationStore {
    /// Create an empty store for a grid of `total_slots` slots.
    pub const fn new(total_slots: u32) -> Self {
        Self {
            total_slots,
            next_id: InstanceId::FIRST,
            instances: BTreeMap::new(),
            occupied: BTreeMap::new(),
        }
    }

    /// Rebuild a store from persisted parts, checking every invariant.
    ///
    /// # Errors
    ///
    /// Returns [`PopulationError::Corrupt`] if a slot is out of range or
    /// duplicated, an id is duplicated or not below `next_id`, or the slot
    /// map disagrees with the organisms.
    pub fn from_parts(
        total_slots: u32,
        next_id: InstanceId,
        organisms: Vec<OrganismInstance>,
        occupied: BTreeMap<u32, InstanceId>,
    ) -> Result<Self, PopulationError> {
        let mut instances = BTreeMap::new();
        let mut derived_slots = BTreeMap::new();

        for organism in organisms {
            if organism.id >= next_id {
                return Err(corrupt(format!(
                    "instance {} is not below next id {next_id}",
                    organism.id
                )));
            }
            if organism.slot >= total_slots {
                return Err(corrupt(format!(
                    "instance {} sits in slot {} outside a grid of {total_slots}",
                    organism.id, organism.slot
                )));
            }
            if let Some(other) = derived_slots.insert(organism.slot, organism.id) {
                return Err(corrupt(format!(
                    "slot {} holds both {other} and {}",
                    organism.slot, organism.id
                )));
            }
            let id = organism.id;
            if instances.insert(id, organism).is_some() {
                return Err(corrupt(format!("instance {id} appears twice")));
            }
        }

        if derived_slots != occupied {
            return Err(corrupt(
                "occupied slot map does not match organism placements".to_owned(),
            ));
        }

        Ok(Self {
            total_slots,
            next_id,
            instances,
            occupied,
        })
    }

    /// Place a new organism of `species` into `slot` on `day`.
    ///
    /// The organism starts [`HealthStatus::Healthy`].
    ///
    /// # Errors
    ///
    /// Returns [`PopulationError::SlotOutOfRange`] or
    /// [`PopulationError::SlotOccupied`] without changing the store, or
    /// [`PopulationError::IdExhausted`] if no fresh id is left.
    pub fn place(
        &mut self,
        species: &Species,
        slot: u32,
        day: u32,
    ) -> Result<InstanceId, PopulationError> {
        if slot >= self.total_slots {
            return Err(PopulationError::SlotOutOfRange {
                slot,
                total_slots: self.total_slots,
            });
        }
        if let Some(occupant) = self.occupied.get(&slot) {
            return Err(PopulationError::SlotOccupied {
                slot,
                occupant: *occupant,
            });
        }

        let id = self.next_id;
        self.next_id = id.next().ok_or(PopulationError::IdExhausted)?;

        self.instances.insert(
            id,
            OrganismInstance {
                id,
                species: species.id.clone(),
                level: species.level,
                slot,
                health: HealthStatus::Healthy,
                day_added: day,
            },
        );
        self.occupied.insert(slot, id);

        debug!(instance = %id, species = %species.id, slot, day, "Organism placed");
        Ok(id)
    }

    /// Remove an organism and free its slot. No-op if it is absent.
    pub fn remove(&mut self, id: InstanceId) -> Option<OrganismInstance> {
        let organism = self.instances.remove(&id)?;
        self.occupied.remove(&organism.slot);
        debug!(instance = %id, slot = organism.slot, "Organism removed");
        Some(organism)
    }

    /// Remove every organism and restart id numbering.
    ///
    /// Returns the removed ids in ascending order.
    pub fn reset(&mut self) -> Vec<InstanceId> {
        let removed: Vec<InstanceId> = self.instances.keys().copied().collect();
        self.instances.clear();
        self.occupied.clear();
        self.next_id = InstanceId::FIRST;
        removed
    }

    /// Overwrite the health of one organism. Returns `false` if it is absent.
    pub fn set_health(&mut self, id: InstanceId, health: HealthStatus) -> bool {
        self.instances.get_mut(&id).is_some_and(|organism| {
            organism.health = health;
            true
        })
    }

    /// Look up an organism.
    pub fn get(&self, id: InstanceId) -> Option<&OrganismInstance> {
        self.instances.get(&id)
    }

    /// The organism in a slot, if any.
    pub fn occupant(&self, slot: u32) -> Option<InstanceId> {
        self.occupied.get(&slot).copied()
    }

    /// Every live organism in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &OrganismInstance> {
        self.instances.values()
    }

    /// Ids of the live organisms at a level, ascending.
    pub fn ids_at_level(&self, level: TrophicLevel) -> impl Iterator<Item = InstanceId> + '_ {
        self.instances
            .values()
            .filter(move |organism| organism.level == level)
            .map(|organism| organism.id)
    }

    /// Number of live organisms at a level.
    pub fn count_at_level(&self, level: TrophicLevel) -> u32 {
        let count = self.ids_at_level(level).count();
        u32::try_from(count).unwrap_or(u32::MAX)
    }

    /// Free slots in ascending order.
    pub fn empty_slots(&self) -> impl Iterator<Item = u32> + '_ {
        (0..self.total_slots).filter(|slot| !self.occupied.contains_key(slot))
    }

    /// The lowest free slot.
    pub fn first_empty_slot(&self) -> Option<u32> {
        self.empty_slots().next()
    }

    /// Size of the slot grid.
    pub const fn total_slots(&self) -> u32 {
        self.total_slots
    }

    /// Identifier the next placement will receive.
    pub const fn next_instance_id(&self) -> InstanceId {
        self.next_id
    }

    /// Slot -> occupying organism.
    pub const fn occupied_slots(&self) -> &BTreeMap<u32, InstanceId> {
        &self.occupied
    }

    /// Number of live organisms.
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// Whether no organism is placed.
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

fn corrupt(reason: String) -> PopulationError {
    PopulationError::Corrupt { reason }
}
