//! Deterministic catalog content hashing.

use blake3::Hasher;

use crate::SpecializationCatalog;

/// Computes a deterministic content hash for a catalog.
///
/// Only the fields that influence trait positions on the wire are hashed:
/// specialization order, IDs, the elite flag and the nine major traits.
/// Names and professions are display data and do not affect the hash.
#[must_use]
pub fn catalog_hash(catalog: &SpecializationCatalog) -> u64 {
    let mut hasher = Hasher::new();
    write_u32(&mut hasher, catalog.len() as u32);

    for spec in catalog.specializations() {
        write_u32(&mut hasher, spec.id);
        write_u8(&mut hasher, u8::from(spec.elite));
        write_u32(&mut hasher, spec.major_traits.len() as u32);
        for trait_id in &spec.major_traits {
            write_u32(&mut hasher, *trait_id);
        }
    }

    let hash = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&hash.as_bytes()[0..8]);
    u64::from_le_bytes(bytes)
}

fn write_u8(hasher: &mut Hasher, value: u8) {
    hasher.update(&[value]);
}

fn write_u32(hasher: &mut Hasher, value: u32) {
    hasher.update(&value.to_le_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Specialization, MAJOR_TRAITS};

    fn spec(id: u32, base: u32) -> Specialization {
        let mut traits = [0u32; MAJOR_TRAITS];
        for (i, slot) in traits.iter_mut().enumerate() {
            *slot = base + i as u32;
        }
        Specialization::new(id, traits)
    }

    #[test]
    fn catalog_hash_is_stable() {
        let catalog = SpecializationCatalog::new(vec![spec(6, 100), spec(38, 200)]).unwrap();
        assert_eq!(catalog_hash(&catalog), catalog_hash(&catalog.clone()));
    }

    #[test]
    fn catalog_hash_ignores_display_fields() {
        let plain = SpecializationCatalog::new(vec![spec(6, 100)]).unwrap();
        let named = spec(6, 100).named("Explosives").profession("Engineer");
        let named = SpecializationCatalog::new(vec![named]).unwrap();
        assert_eq!(catalog_hash(&plain), catalog_hash(&named));
    }

    #[test]
    fn catalog_hash_changes_with_trait_order() {
        let a = SpecializationCatalog::new(vec![spec(6, 100)]).unwrap();
        let mut swapped = spec(6, 100);
        swapped.major_traits.swap(0, 1);
        let b = SpecializationCatalog::new(vec![swapped]).unwrap();
        assert_ne!(catalog_hash(&a), catalog_hash(&b));
    }

    #[test]
    fn catalog_hash_changes_with_spec_order() {
        let a = SpecializationCatalog::new(vec![spec(6, 100), spec(38, 200)]).unwrap();
        let b = SpecializationCatalog::new(vec![spec(38, 200), spec(6, 100)]).unwrap();
        assert_ne!(catalog_hash(&a), catalog_hash(&b));
    }

    #[test]
    fn catalog_hash_changes_with_elite_flag() {
        let a = SpecializationCatalog::new(vec![spec(6, 100)]).unwrap();
        let b = SpecializationCatalog::new(vec![spec(6, 100).elite(true)]).unwrap();
        assert_ne!(catalog_hash(&a), catalog_hash(&b));
    }
}
