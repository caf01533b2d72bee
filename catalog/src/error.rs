//! Catalog validation errors.

use std::fmt;

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors that can occur when building, loading or pinning a catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Duplicate specialization ID in a catalog.
    DuplicateSpecialization { id: u32 },

    /// A specialization does not list exactly nine major traits.
    InvalidMajorTraitCount { id: u32, count: usize },

    /// The same trait ID appears twice within one specialization.
    DuplicateTrait { id: u32, trait_id: u32 },

    /// The catalog content hash does not match the pinned value.
    HashMismatch { expected: u64, found: u64 },

    /// The catalog document could not be parsed.
    Parse { message: String },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateSpecialization { id } => {
                write!(f, "duplicate specialization id {id}")
            }
            Self::InvalidMajorTraitCount { id, count } => {
                write!(
                    f,
                    "specialization {id} lists {count} major traits, expected 9"
                )
            }
            Self::DuplicateTrait { id, trait_id } => {
                write!(f, "specialization {id} lists trait {trait_id} twice")
            }
            Self::HashMismatch { expected, found } => {
                write!(
                    f,
                    "catalog hash mismatch: expected 0x{expected:016X}, found 0x{found:016X}"
                )
            }
            Self::Parse { message } => write!(f, "catalog parse error: {message}"),
        }
    }
}

impl std::error::Error for CatalogError {}
