//! Catalog definition, validation and trait resolution.

use std::collections::{HashMap, HashSet};

use crate::error::{CatalogError, CatalogResult};
use crate::hash::catalog_hash;
use crate::specialization::{Specialization, TraitPosition, MAJOR_TRAITS};

/// A read-only set of specializations, loaded once and shared by the encoder
/// and decoder.
///
/// Trait positions on the wire are only meaningful relative to the catalog
/// content they were computed against; see [`catalog_hash`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecializationCatalog {
    specializations: Vec<Specialization>,
    index: HashMap<u32, usize>,
}

impl SpecializationCatalog {
    /// Creates a catalog from specializations after validation.
    pub fn new(specializations: Vec<Specialization>) -> CatalogResult<Self> {
        let mut index = HashMap::with_capacity(specializations.len());
        for (slot, spec) in specializations.iter().enumerate() {
            validate_specialization(spec)?;
            if index.insert(spec.id, slot).is_some() {
                return Err(CatalogError::DuplicateSpecialization { id: spec.id });
            }
        }
        Ok(Self {
            specializations,
            index,
        })
    }

    /// Creates an empty catalog.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            specializations: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Creates a catalog builder.
    #[must_use]
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    /// Creates a catalog and checks it against a pinned content hash.
    pub fn pinned(specializations: Vec<Specialization>, expected_hash: u64) -> CatalogResult<Self> {
        let catalog = Self::new(specializations)?;
        catalog.verify_hash(expected_hash)?;
        Ok(catalog)
    }

    /// Returns an error unless the catalog content hashes to `expected`.
    pub fn verify_hash(&self, expected: u64) -> CatalogResult<()> {
        let found = catalog_hash(self);
        if found != expected {
            return Err(CatalogError::HashMismatch { expected, found });
        }
        Ok(())
    }

    /// Returns the specializations in catalog order.
    #[must_use]
    pub fn specializations(&self) -> &[Specialization] {
        &self.specializations
    }

    /// Returns the number of specializations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.specializations.len()
    }

    /// Returns `true` if the catalog holds no specializations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.specializations.is_empty()
    }

    /// Looks up a specialization by ID.
    #[must_use]
    pub fn get(&self, id: u32) -> Option<&Specialization> {
        self.index.get(&id).map(|slot| &self.specializations[*slot])
    }

    /// Finds the tier and position of `trait_id` within specialization `spec_id`.
    #[must_use]
    pub fn locate_trait(&self, spec_id: u32, trait_id: u32) -> Option<TraitPosition> {
        self.get(spec_id)?.locate(trait_id)
    }

    /// Returns the position of `trait_id` if it belongs to `tier` of `spec_id`.
    #[must_use]
    pub fn position_in_tier(&self, spec_id: u32, tier: u8, trait_id: u32) -> Option<u8> {
        self.locate_trait(spec_id, trait_id)
            .filter(|pos| pos.tier() == tier)
            .map(TraitPosition::position)
    }

    /// Recovers a trait ID from `(spec_id, tier, position)`.
    #[must_use]
    pub fn trait_at(&self, spec_id: u32, tier: u8, position: u8) -> Option<u32> {
        let pos = TraitPosition::new(tier, position)?;
        self.get(spec_id)?.trait_at(pos)
    }

    /// Parses a catalog from its JSON document.
    ///
    /// Accepts either a bare array of specializations or an object with a
    /// `specializations` array.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> CatalogResult<Self> {
        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum Document {
            List(Vec<Specialization>),
            Wrapped { specializations: Vec<Specialization> },
        }

        let document: Document =
            serde_json::from_str(json).map_err(|err| CatalogError::Parse {
                message: err.to_string(),
            })?;
        let specializations = match document {
            Document::List(list) | Document::Wrapped {
                specializations: list,
            } => list,
        };
        Self::new(specializations)
    }

    /// Parses a catalog from JSON and checks it against a pinned content hash.
    #[cfg(feature = "serde")]
    pub fn from_json_pinned(json: &str, expected_hash: u64) -> CatalogResult<Self> {
        let catalog = Self::from_json(json)?;
        catalog.verify_hash(expected_hash)?;
        Ok(catalog)
    }
}

impl Default for SpecializationCatalog {
    fn default() -> Self {
        Self::empty()
    }
}

/// Builder for `SpecializationCatalog`.
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    specializations: Vec<Specialization>,
}

impl CatalogBuilder {
    /// Adds a specialization.
    #[must_use]
    pub fn specialization(mut self, spec: Specialization) -> Self {
        self.specializations.push(spec);
        self
    }

    /// Builds the catalog after validation.
    pub fn build(self) -> CatalogResult<SpecializationCatalog> {
        SpecializationCatalog::new(self.specializations)
    }
}

fn validate_specialization(spec: &Specialization) -> CatalogResult<()> {
    if spec.major_traits.len() != MAJOR_TRAITS {
        return Err(CatalogError::InvalidMajorTraitCount {
            id: spec.id,
            count: spec.major_traits.len(),
        });
    }
    let mut seen = HashSet::with_capacity(MAJOR_TRAITS);
    for trait_id in &spec.major_traits {
        if !seen.insert(*trait_id) {
            return Err(CatalogError::DuplicateTrait {
                id: spec.id,
                trait_id: *trait_id,
            });
        }
    }
    Ok(())
}
