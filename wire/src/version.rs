//! Wire format versions.

use std::fmt;
use std::str::FromStr;

/// First byte of a legacy payload, which is a bare JSON object.
pub const LEGACY_JSON_LEAD: u8 = b'{';

/// A frozen wire format.
///
/// Every binary payload starts with its version tag. Legacy payloads carry no
/// tag and are recognised by parsing as JSON. Each variant is decoded by its
/// own frozen algorithm; the layout of a released version never changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum WireVersion {
    /// Whole build as a JSON document.
    LegacyJson,
    /// Stats and weapons as strings, per-entry upgrade text.
    V2,
    /// Enum indices with string fallback, sigils and infusions as item IDs.
    V3,
    /// Adds the Elementalist familiar.
    V4,
    /// Adds the full profession mechanics block.
    V5,
    /// Sparse equipment, flag-gated sections, trait positions, pooled infusions.
    V6,
}

impl WireVersion {
    /// The version written by the encoder.
    pub const CURRENT: Self = Self::V6;

    /// All supported versions, oldest first.
    pub const ALL: [Self; 6] = [
        Self::LegacyJson,
        Self::V2,
        Self::V3,
        Self::V4,
        Self::V5,
        Self::V6,
    ];

    /// Returns the leading tag byte, or `None` for legacy JSON.
    #[must_use]
    pub const fn tag(self) -> Option<u8> {
        match self {
            Self::LegacyJson => None,
            Self::V2 => Some(2),
            Self::V3 => Some(3),
            Self::V4 => Some(4),
            Self::V5 => Some(5),
            Self::V6 => Some(6),
        }
    }

    /// Parses a binary version tag.
    #[must_use]
    pub const fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            2 => Some(Self::V2),
            3 => Some(Self::V3),
            4 => Some(Self::V4),
            5 => Some(Self::V5),
            6 => Some(Self::V6),
            _ => None,
        }
    }
}

impl fmt::Display for WireVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::LegacyJson => "legacy-json",
            Self::V2 => "v2",
            Self::V3 => "v3",
            Self::V4 => "v4",
            Self::V5 => "v5",
            Self::V6 => "v6",
        };
        write!(f, "{name}")
    }
}

/// Error returned when a version name cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseVersionError {
    pub input: String,
}

impl fmt::Display for ParseVersionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown wire version '{}', expected legacy-json or v2..v6",
            self.input
        )
    }
}

impl std::error::Error for ParseVersionError {}

impl FromStr for WireVersion {
    type Err = ParseVersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "legacy" | "json" | "legacy-json" => Ok(Self::LegacyJson),
            "2" | "v2" => Ok(Self::V2),
            "3" | "v3" => Ok(Self::V3),
            "4" | "v4" => Ok(Self::V4),
            "5" | "v5" => Ok(Self::V5),
            "6" | "v6" | "current" => Ok(Self::V6),
            _ => Err(ParseVersionError {
                input: s.to_owned(),
            }),
        }
    }
}
