//! Limits for codec-level decoding.

use crate::equipment::pool_infusions;
use crate::error::{CodecError, CodecResult, LimitKind};
use crate::types::Build;

/// Codec-specific limits enforced while decoding a payload body.
///
/// Encoding checks a build against the default limits first, so every code
/// written is readable by a default decoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecLimits {
    /// Maximum byte length of an escaped or string-encoded name.
    pub max_string_len: usize,
    /// Maximum number of explicit equipment entries.
    pub max_equipment_entries: usize,
    /// Maximum number of specialization selections.
    pub max_specializations: usize,
    /// Maximum number of pooled infusion groups.
    pub max_infusion_groups: usize,
}

impl Default for CodecLimits {
    fn default() -> Self {
        Self {
            max_string_len: 128,
            max_equipment_entries: 16,
            max_specializations: 3,
            max_infusion_groups: 48,
        }
    }
}

impl CodecLimits {
    /// Creates limits suitable for testing with smaller values.
    #[must_use]
    pub const fn for_testing() -> Self {
        Self {
            max_string_len: 32,
            max_equipment_entries: 16,
            max_specializations: 3,
            max_infusion_groups: 16,
        }
    }

    /// Creates limits with no restrictions (use with caution).
    #[must_use]
    pub const fn unlimited() -> Self {
        Self {
            max_string_len: usize::MAX,
            max_equipment_entries: usize::MAX,
            max_specializations: usize::MAX,
            max_infusion_groups: usize::MAX,
        }
    }

    /// Fails if a decoder bound by these limits would reject `build`.
    pub(crate) fn check_build(&self, build: &Build) -> CodecResult<()> {
        CodecError::check_limit(
            LimitKind::EquipmentEntries,
            self.max_equipment_entries,
            build.equipment.len(),
        )?;
        CodecError::check_limit(
            LimitKind::Specializations,
            self.max_specializations,
            build.specializations.len(),
        )?;
        CodecError::check_limit(
            LimitKind::InfusionGroups,
            self.max_infusion_groups,
            pool_infusions(build).len(),
        )?;
        for entry in &build.equipment {
            let names = std::iter::once(entry.stat.as_str()).chain(entry.weapon_type.as_deref());
            for name in names {
                CodecError::check_limit(LimitKind::StringLength, self.max_string_len, name.len())?;
            }
        }
        Ok(())
    }
}
