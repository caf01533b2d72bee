//! Specialization entries and trait positions.

/// Number of trait tiers in a specialization.
pub const TIERS: usize = 3;

/// Number of selectable major traits per tier.
pub const TRAITS_PER_TIER: usize = 3;

/// Number of major traits listed by a specialization.
pub const MAJOR_TRAITS: usize = TIERS * TRAITS_PER_TIER;

/// A specialization as published by the game data API.
///
/// `major_traits` is ordered: tier `t` owns indices `[3t, 3t + 3)`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Specialization {
    pub id: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub profession: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub elite: bool,
    pub major_traits: Vec<u32>,
}

impl Specialization {
    /// Creates a specialization entry.
    #[must_use]
    pub fn new(id: u32, major_traits: [u32; MAJOR_TRAITS]) -> Self {
        Self {
            id,
            name: String::new(),
            profession: String::new(),
            elite: false,
            major_traits: major_traits.to_vec(),
        }
    }

    /// Sets the display name.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the owning profession name.
    #[must_use]
    pub fn profession(mut self, profession: impl Into<String>) -> Self {
        self.profession = profession.into();
        self
    }

    /// Marks the specialization as elite.
    #[must_use]
    pub const fn elite(mut self, elite: bool) -> Self {
        self.elite = elite;
        self
    }

    /// Returns the three trait IDs selectable in `tier`.
    #[must_use]
    pub fn tier(&self, tier: usize) -> Option<&[u32]> {
        let start = tier.checked_mul(TRAITS_PER_TIER)?;
        self.major_traits.get(start..start + TRAITS_PER_TIER)
    }

    /// Finds where `trait_id` sits among the major traits.
    #[must_use]
    pub fn locate(&self, trait_id: u32) -> Option<TraitPosition> {
        let index = self
            .major_traits
            .iter()
            .take(MAJOR_TRAITS)
            .position(|id| *id == trait_id)?;
        TraitPosition::from_index(index)
    }

    /// Returns the trait at `(tier, position)`.
    #[must_use]
    pub fn trait_at(&self, position: TraitPosition) -> Option<u32> {
        self.major_traits.get(position.index()).copied()
    }
}

/// The place of a major trait inside its specialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TraitPosition {
    tier: u8,
    position: u8,
}

impl TraitPosition {
    /// Creates a position, or `None` if `tier` or `position` is out of range.
    #[must_use]
    pub const fn new(tier: u8, position: u8) -> Option<Self> {
        if (tier as usize) < TIERS && (position as usize) < TRAITS_PER_TIER {
            Some(Self { tier, position })
        } else {
            None
        }
    }

    /// Creates a position from an index into the nine major traits.
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        if index >= MAJOR_TRAITS {
            return None;
        }
        Some(Self {
            tier: (index / TRAITS_PER_TIER) as u8,
            position: (index % TRAITS_PER_TIER) as u8,
        })
    }

    /// Returns the tier (0..3).
    #[must_use]
    pub const fn tier(self) -> u8 {
        self.tier
    }

    /// Returns the position within the tier (0..3).
    #[must_use]
    pub const fn position(self) -> u8 {
        self.position
    }

    /// Returns the index into the nine major traits.
    #[must_use]
    pub const fn index(self) -> usize {
        self.tier as usize * TRAITS_PER_TIER + self.position as usize
    }
}
