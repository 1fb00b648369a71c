//! The organism catalog: static species data keyed by [`SpeciesId`].
//!
//! The catalog is read-only after construction. Declaration order is
//! preserved and used wherever a stable species order is needed.

use std::collections::BTreeMap;

use foodchain_types::{Species, SpeciesId, TrophicLevel};

use crate::error::CatalogError;

/// Read-only species lookup table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    /// Rows in declaration order.
    species: Vec<Species>,
    /// Id -> position in `species`.
    index: BTreeMap<SpeciesId, usize>,
}

impl Catalog {
    /// Build a catalog from a list of species.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Empty`] for an empty list and
    /// [`CatalogError::DuplicateSpecies`] if two rows share an id.
    pub fn new(species: Vec<Species>) -> Result<Self, CatalogError> {
        if species.is_empty() {
            return Err(CatalogError::Empty);
        }
        let mut index = BTreeMap::new();
        for (position, entry) in species.iter().enumerate() {
            if index.insert(entry.id.clone(), position).is_some() {
                return Err(CatalogError::DuplicateSpecies(entry.id.clone()));
            }
        }
        Ok(Self { species, index })
    }

    /// The species shipped with the game.
    pub fn builtin() -> Self {
        let species = builtin_species();
        let index = species
            .iter()
            .enumerate()
            .map(|(position, entry)| (entry.id.clone(), position))
            .collect();
        Self { species, index }
    }

    /// Look up a species.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownSpecies`] if the id is not in the catalog.
    pub fn lookup(&self, id: &SpeciesId) -> Result<&Species, CatalogError> {
        self.index
            .get(id)
            .and_then(|position| self.species.get(*position))
            .ok_or_else(|| CatalogError::UnknownSpecies(id.clone()))
    }

    /// Whether the id is in the catalog.
    pub fn contains(&self, id: &SpeciesId) -> bool {
        self.index.contains_key(id)
    }

    /// Ids of every species at a level, in declaration order.
    pub fn all_ids_at_level(&self, level: TrophicLevel) -> Vec<SpeciesId> {
        self.species
            .iter()
            .filter(|s| s.level == level)
            .map(|s| s.id.clone())
            .collect()
    }

    /// Ids of the species at a level that the draft may offer.
    pub fn draftable_ids_at_level(&self, level: TrophicLevel) -> Vec<SpeciesId> {
        self.species
            .iter()
            .filter(|s| s.level == level && s.draftable)
            .map(|s| s.id.clone())
            .collect()
    }

    /// Ids of every draftable species.
    pub fn draftable_ids(&self) -> Vec<SpeciesId> {
        self.species
            .iter()
            .filter(|s| s.draftable)
            .map(|s| s.id.clone())
            .collect()
    }

    /// All rows in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Species> {
        self.species.iter()
    }

    /// Number of species.
    pub fn len(&self) -> usize {
        self.species.len()
    }

    /// Always `false` for a successfully built catalog.
    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn entry(id: &str, name: &str, level: TrophicLevel, description: &str) -> Species {
    Species {
        id: SpeciesId::new(id),
        name: name.to_owned(),
        level,
        description: description.to_owned(),
        icon: format!("icons/{id}.png"),
        draftable: true,
    }
}

/// Built-in species: four per trophic level.
fn builtin_species() -> Vec<Species> {
    use TrophicLevel::{Primary, Producer, Secondary};

    vec![
        entry("grass", "Grass", Producer, "Turns sunlight into food for grazers."),
        entry("clover", "Clover", Producer, "Low flowering plant that enriches the soil."),
        entry("berry_bush", "Berry Bush", Producer, "Shrub whose fruit feeds small animals."),
        entry("oak", "Oak Sapling", Producer, "Young tree that drops acorns."),
        entry("rabbit", "Rabbit", Primary, "Grazes on grass and clover."),
        entry("mouse", "Field Mouse", Primary, "Eats seeds and berries."),
        entry("grasshopper", "Grasshopper", Primary, "Chews leaves all day long."),
        entry("deer", "Deer", Primary, "Browses shrubs and saplings."),
        entry("fox", "Red Fox", Secondary, "Hunts rabbits and mice."),
        entry("owl", "Barn Owl", Secondary, "Catches mice at night."),
        entry("snake", "Grass Snake", Secondary, "Ambushes small prey."),
        entry("hawk", "Hawk", Secondary, "Spots prey from high above."),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn species(id: &str, level: TrophicLevel) -> Species {
        entry(id, id, level, "")
    }

    #[test]
    fn builtin_catalog_covers_every_level() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.len(), 12);
        for level in TrophicLevel::ALL {
            assert_eq!(catalog.all_ids_at_level(level).len(), 4);
        }
    }

    #[test]
    fn lookup_known_species() {
        let catalog = Catalog::builtin();
        let fox = catalog.lookup(&SpeciesId::new("fox"));
        assert!(fox.is_ok());
        assert!(fox.is_ok_and(|s| s.level == TrophicLevel::Secondary));
    }

    #[test]
    fn lookup_unknown_species_fails() {
        let catalog = Catalog::builtin();
        let result = catalog.lookup(&SpeciesId::new("dragon"));
        assert!(matches!(result, Err(CatalogError::UnknownSpecies(_))));
    }

    #[test]
    fn empty_catalog_rejected() {
        assert!(matches!(Catalog::new(Vec::new()), Err(CatalogError::Empty)));
    }

    #[test]
    fn duplicate_ids_rejected() {
        let rows = vec![
            species("grass", TrophicLevel::Producer),
            species("grass", TrophicLevel::Primary),
        ];
        assert!(matches!(
            Catalog::new(rows),
            Err(CatalogError::DuplicateSpecies(_))
        ));
    }

    #[test]
    fn level_queries_keep_declaration_order() {
        let rows = vec![
            species("b", TrophicLevel::Producer),
            species("x", TrophicLevel::Primary),
            species("a", TrophicLevel::Producer),
        ];
        let catalog = Catalog::new(rows);
        assert!(catalog.is_ok());
        let catalog = catalog.unwrap_or_default();
        assert_eq!(
            catalog.all_ids_at_level(TrophicLevel::Producer),
            vec![SpeciesId::new("b"), SpeciesId::new("a")]
        );
    }

    #[test]
    fn undraftable_species_are_excluded_from_draft_queries() {
        let mut hidden = species("moss", TrophicLevel::Producer);
        hidden.draftable = false;
        let rows = vec![species("grass", TrophicLevel::Producer), hidden];
        let catalog = Catalog::new(rows).unwrap_or_default();
        assert_eq!(catalog.all_ids_at_level(TrophicLevel::Producer).len(), 2);
        assert_eq!(
            catalog.draftable_ids_at_level(TrophicLevel::Producer),
            vec![SpeciesId::new("grass")]
        );
        assert_eq!(catalog.draftable_ids().len(), 1);
    }
}
