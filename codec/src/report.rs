//! Encode/decode results and fallback warnings.

use std::fmt;

use serde::Serialize;
use wire::{Profession, Slot, WireVersion};

use crate::types::Build;

/// A non-fatal substitution made while encoding or decoding.
///
/// The result is still a valid build, but not exactly the one supplied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum FallbackWarning {
    /// A stat the version's table lacks was written as text.
    /// `slot` is `None` for the build-wide default stat.
    #[serde(rename_all = "camelCase")]
    UnknownStat { slot: Option<Slot>, stat: String },

    /// A weapon type the table lacks was written as text.
    #[serde(rename_all = "camelCase")]
    UnknownWeapon { slot: Slot, weapon: String },

    /// A trait is not one of its tier's three choices; position 0 was stored.
    #[serde(rename_all = "camelCase")]
    TraitNotInTier {
        specialization: u32,
        tier: u8,
        trait_id: u32,
    },

    /// A legacy upgrade field could not be parsed as sigil IDs.
    #[serde(rename_all = "camelCase")]
    UnparseableUpgrade { slot: Slot, text: String },

    /// More infusions than the equipment has room for; the rest were dropped.
    #[serde(rename_all = "camelCase")]
    InfusionOverflow { dropped: usize },

    /// Mechanics the target layout cannot carry were dropped.
    #[serde(rename_all = "camelCase")]
    MechanicsDropped {
        profession: Profession,
        version: WireVersion,
    },
}

impl fmt::Display for FallbackWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownStat {
                slot: Some(slot),
                stat,
            } => write!(f, "{slot}: stat '{stat}' is not in the table, stored as text"),
            Self::UnknownStat { slot: None, stat } => {
                write!(f, "default stat '{stat}' is not in the table, stored as text")
            }
            Self::UnknownWeapon { slot, weapon } => {
                write!(f, "{slot}: weapon '{weapon}' is not in the table, stored as text")
            }
            Self::TraitNotInTier {
                specialization,
                tier,
                trait_id,
            } => write!(
                f,
                "trait {trait_id} is not in tier {tier} of specialization {specialization}, \
                 stored as the first choice"
            ),
            Self::UnparseableUpgrade { slot, text } => {
                write!(f, "{slot}: upgrade '{text}' is not a sigil list, ignored")
            }
            Self::InfusionOverflow { dropped } => {
                write!(f, "{dropped} infusions did not fit the equipment and were dropped")
            }
            Self::MechanicsDropped {
                profession,
                version,
            } => write!(f, "{profession} mechanics cannot be stored in {version}"),
        }
    }
}

/// Result of encoding a build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeReport {
    /// The URL-safe code.
    pub code: String,
    /// Layout the payload was written in.
    pub version: WireVersion,
    /// Size of the payload before compression.
    pub payload_len: usize,
    pub warnings: Vec<FallbackWarning>,
}

/// Result of decoding a build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeReport {
    pub build: Build,
    /// Layout the payload was read as.
    pub version: WireVersion,
    pub warnings: Vec<FallbackWarning>,
}

/// A serialized payload before transport encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedPayload {
    pub bytes: Vec<u8>,
    pub version: WireVersion,
    pub warnings: Vec<FallbackWarning>,
}

/// Collects warnings and logs each one as it is raised.
#[derive(Debug, Default)]
pub(crate) struct Warnings(Vec<FallbackWarning>);

impl Warnings {
    pub(crate) fn push(&mut self, warning: FallbackWarning) {
        match &warning {
            FallbackWarning::UnknownStat { slot, stat } => {
                tracing::warn!(?slot, stat = %stat, "stat not in table, escaped as text");
            }
            FallbackWarning::UnknownWeapon { slot, weapon } => {
                tracing::warn!(%slot, weapon = %weapon, "weapon not in table, escaped as text");
            }
            FallbackWarning::TraitNotInTier {
                specialization,
                tier,
                trait_id,
            } => {
                tracing::warn!(
                    spec_id = specialization,
                    tier,
                    trait_id,
                    "trait not in tier, stored as position 0"
                );
            }
            FallbackWarning::UnparseableUpgrade { slot, text } => {
                tracing::warn!(%slot, upgrade = %text, "unparseable upgrade text ignored");
            }
            FallbackWarning::InfusionOverflow { dropped } => {
                tracing::warn!(dropped, "infusions exceed equipment capacity");
            }
            FallbackWarning::MechanicsDropped {
                profession,
                version,
            } => {
                tracing::warn!(%profession, %version, "mechanics not representable, dropped");
            }
        }
        self.0.push(warning);
    }

    pub(crate) fn into_vec(self) -> Vec<FallbackWarning> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warnings_collect_in_order() {
        let mut warnings = Warnings::default();
        warnings.push(FallbackWarning::InfusionOverflow { dropped: 2 });
        warnings.push(FallbackWarning::UnknownWeapon {
            slot: Slot::MainHand1,
            weapon: "Rapier".to_owned(),
        });
        let list = warnings.into_vec();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0], FallbackWarning::InfusionOverflow { dropped: 2 });
    }

    #[test]
    fn warning_display() {
        let warning = FallbackWarning::TraitNotInTier {
            specialization: 6,
            tier: 1,
            trait_id: 1500,
        };
        let text = warning.to_string();
        assert!(text.contains("1500"));
        assert!(text.contains("tier 1"));

        let warning = FallbackWarning::UnknownStat {
            slot: None,
            stat: "Custom".to_owned(),
        };
        assert!(warning.to_string().starts_with("default stat"));
    }

    #[test]
    fn warning_json_shape() {
        let warning = FallbackWarning::UnparseableUpgrade {
            slot: Slot::OffHand1,
            text: "Superior Sigil of Force".to_owned(),
        };
        let json = serde_json::to_value(&warning).unwrap();
        assert_eq!(json["kind"], "unparseableUpgrade");
        assert_eq!(json["slot"], "OffHand1");
    }
}
