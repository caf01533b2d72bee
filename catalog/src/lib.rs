//! Specialization catalog and trait-position resolution for the buildlink codec.
//!
//! The codec stores a chosen major trait as its 2-bit position within a tier
//! instead of the full trait ID. Turning IDs into positions and back needs
//! the specialization catalog this crate models:
//! - Specialization entries with their nine ordered major traits
//! - Trait lookup by `(specialization, trait)` and by `(specialization, tier, position)`
//! - Deterministic content hashing, so encoder and decoder can pin the same catalog
//!
//! # Design Principles
//!
//! - **Read-only** - A catalog is validated once at construction and never mutated.
//! - **Explicit catalogs** - No global state; callers pass the catalog they loaded.
//! - **Deterministic hashing** - The content hash is stable given the same entries.

mod catalog;
mod error;
mod hash;
mod specialization;

pub use catalog::{CatalogBuilder, SpecializationCatalog};
pub use error::{CatalogError, CatalogResult};
pub use hash::catalog_hash;
pub use specialization::{Specialization, TraitPosition, MAJOR_TRAITS, TIERS, TRAITS_PER_TIER};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_api_exports() {
        let _ = SpecializationCatalog::empty();
        let _ = TraitPosition::new(0, 0);
        let _ = catalog_hash(&SpecializationCatalog::empty());

        let _: CatalogResult<()> = Ok(());
    }

    #[test]
    fn tier_constants() {
        assert_eq!(MAJOR_TRAITS, TIERS * TRAITS_PER_TIER);
        assert_eq!(MAJOR_TRAITS, 9);
    }

    #[test]
    fn empty_catalog_hash_is_stable() {
        let a = catalog_hash(&SpecializationCatalog::empty());
        let b = catalog_hash(&SpecializationCatalog::default());
        assert_eq!(a, b);
    }
}
