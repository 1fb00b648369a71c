//! Daily draft offers.
//!
//! Each day the player is offered a short, shuffled list of species. The
//! generator always includes a few producers, since producers are the food
//! every other placement depends on, and fills the rest with consumers:
//!
//! 1. Draw a producer count uniformly from `min_producers..=max_producers`
//!    and pick that many distinct draftable producers.
//! 2. Fill the remainder with distinct draftable primary and secondary
//!    consumers.
//! 3. If a category ran out, top up with unused draftable species of any
//!    level, then (only for tiny catalogs) with repeats.
//! 4. Shuffle the final order.

use foodchain_types::{SpeciesId, TrophicLevel};
use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;

/// Errors that can occur while drawing a draft.
#[derive(Debug, thiserror::Error)]
pub enum DraftError {
    /// The catalog has no species the draft may offer.
    #[error("catalog has no draftable species")]
    EmptyCatalog,
}

/// The species currently offered to the player.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftOffer {
    species: Vec<SpeciesId>,
}

impl DraftOffer {
    /// Wrap an explicit list of species.
    pub const fn new(species: Vec<SpeciesId>) -> Self {
        Self { species }
    }

    /// Remove one occurrence of `id`. Returns `false` if it was not offered.
    pub fn take(&mut self, id: &SpeciesId) -> bool {
        match self.species.iter().position(|offered| offered == id) {
            Some(position) => {
                self.species.remove(position);
                true
            }
            None => false,
        }
    }

    /// Whether `id` is still on offer.
    pub fn contains(&self, id: &SpeciesId) -> bool {
        self.species.contains(id)
    }

    /// The remaining species in display order.
    pub fn as_slice(&self) -> &[SpeciesId] {
        &self.species
    }

    /// Number of species still on offer.
    pub fn len(&self) -> usize {
        self.species.len()
    }

    /// Whether everything has been placed.
    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }

    /// Drop whatever is left.
    pub fn clear(&mut self) {
        self.species.clear();
    }
}

/// Draws [`DraftOffer`]s from a [`Catalog`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DraftGenerator {
    /// Species per offer.
    size: usize,
    /// Lower bound of the producer count (inclusive).
    min_producers: usize,
    /// Upper bound of the producer count (inclusive).
    max_producers: usize,
}

impl DraftGenerator {
    /// Create a generator. A reversed producer range is normalised.
    pub fn new(size: usize, min_producers: usize, max_producers: usize) -> Self {
        Self {
            size,
            min_producers: min_producers.min(max_producers),
            max_producers: max_producers.max(min_producers),
        }
    }

    /// Species per offer.
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Draw a new offer.
    ///
    /// # Errors
    ///
    /// Returns [`DraftError::EmptyCatalog`] if no species is draftable.
    pub fn generate(
        &self,
        catalog: &Catalog,
        rng: &mut impl Rng,
    ) -> Result<DraftOffer, DraftError> {
        let everything = catalog.draftable_ids();
        if everything.is_empty() {
            return Err(DraftError::EmptyCatalog);
        }

        let mut picked: Vec<SpeciesId> = Vec::with_capacity(self.size);

        let producer_count = rng
            .random_range(self.min_producers..=self.max_producers)
            .min(self.size);
        let mut producers = catalog.draftable_ids_at_level(TrophicLevel::Producer);
        producers.shuffle(rng);
        picked.extend(producers.into_iter().take(producer_count));

        let mut consumers = catalog.draftable_ids_at_level(TrophicLevel::Primary);
        consumers.extend(catalog.draftable_ids_at_level(TrophicLevel::Secondary));
        consumers.shuffle(rng);
        let remaining = self.size.saturating_sub(picked.len());
        picked.extend(consumers.into_iter().take(remaining));

        if picked.len() < self.size {
            let mut unused: Vec<SpeciesId> = everything
                .iter()
                .filter(|id| !picked.contains(id))
                .cloned()
                .collect();
            unused.shuffle(rng);
            let remaining = self.size.saturating_sub(picked.len());
            picked.extend(unused.into_iter().take(remaining));
        }

        while picked.len() < self.size {
            match everything.choose(rng) {
                Some(id) => picked.push(id.clone()),
                None => break,
            }
        }

        picked.shuffle(rng);
        Ok(DraftOffer::new(picked))
    }
}
