//! Build model.

use serde::{Deserialize, Serialize};
use wire::{GameMode, Legend, Profession, Slot, SLOTS};

/// Stat combination used when no default can be inferred.
pub const FALLBACK_STAT: &str = "Berserker";

/// Weapon types wielded with both hands.
pub const TWO_HANDED_WEAPONS: [&str; 9] = [
    "Greatsword",
    "Hammer",
    "Longbow",
    "Rifle",
    "Shortbow",
    "Staff",
    "Spear",
    "Trident",
    "HarpoonGun",
];

/// A complete character loadout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Build {
    pub profession: Profession,
    #[serde(default)]
    pub game_mode: GameMode,
    /// One entry per slot. Decoding always yields all 16 in slot order.
    #[serde(default)]
    pub equipment: Vec<Equipment>,
    #[serde(default)]
    pub skills: Skills,
    /// Up to three trait lines.
    #[serde(default)]
    pub specializations: Vec<SpecializationChoice>,
    #[serde(default)]
    pub rune_id: Option<u32>,
    #[serde(default)]
    pub relic_id: Option<u32>,
    #[serde(default)]
    pub mechanics: ProfessionMechanics,
}

impl Build {
    /// Creates a build with every slot set to the fallback stat.
    #[must_use]
    pub fn new(profession: Profession, game_mode: GameMode) -> Self {
        Self {
            profession,
            game_mode,
            equipment: SLOTS
                .iter()
                .map(|slot| Equipment::new(*slot, FALLBACK_STAT))
                .collect(),
            skills: Skills::default(),
            specializations: Vec::new(),
            rune_id: None,
            relic_id: None,
            mechanics: ProfessionMechanics::None,
        }
    }

    /// Returns the entry for `slot`, if present.
    #[must_use]
    pub fn equipment(&self, slot: Slot) -> Option<&Equipment> {
        self.equipment.iter().find(|entry| entry.slot == slot)
    }

    /// Returns the entry for `slot`, if present.
    pub fn equipment_mut(&mut self, slot: Slot) -> Option<&mut Equipment> {
        self.equipment.iter_mut().find(|entry| entry.slot == slot)
    }
}

/// One equipped item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Equipment {
    pub slot: Slot,
    pub stat: String,
    #[serde(default)]
    pub weapon_type: Option<String>,
    #[serde(default)]
    pub sigil1_id: Option<u32>,
    #[serde(default)]
    pub sigil2_id: Option<u32>,
    #[serde(default)]
    pub infusions: [Option<u32>; 3],
}

impl Equipment {
    /// Creates an entry with a stat and nothing else.
    #[must_use]
    pub fn new(slot: Slot, stat: impl Into<String>) -> Self {
        Self {
            slot,
            stat: stat.into(),
            weapon_type: None,
            sigil1_id: None,
            sigil2_id: None,
            infusions: [None; 3],
        }
    }

    /// Sets the weapon type.
    #[must_use]
    pub fn weapon(mut self, weapon_type: impl Into<String>) -> Self {
        self.weapon_type = Some(weapon_type.into());
        self
    }

    /// Sets both sigils.
    #[must_use]
    pub const fn sigils(mut self, sigil1: Option<u32>, sigil2: Option<u32>) -> Self {
        self.sigil1_id = sigil1;
        self.sigil2_id = sigil2;
        self
    }

    /// Sets the infusions.
    #[must_use]
    pub const fn infusions(mut self, infusions: [Option<u32>; 3]) -> Self {
        self.infusions = infusions;
        self
    }

    /// Returns `true` if the weapon type is wielded with both hands.
    #[must_use]
    pub fn is_two_handed(&self) -> bool {
        self.weapon_type
            .as_deref()
            .is_some_and(|weapon| TWO_HANDED_WEAPONS.contains(&weapon))
    }

    /// Number of infusion slots this item has.
    #[must_use]
    pub fn infusion_capacity(&self) -> usize {
        match self.slot {
            Slot::Amulet => 0,
            Slot::Ring1 | Slot::Ring2 => 3,
            Slot::Backpack => 2,
            slot if slot.is_weapon() && self.is_two_handed() => 2,
            _ => 1,
        }
    }

    /// Returns the infusions that are set, in order.
    pub fn infusion_ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.infusions.iter().flatten().copied()
    }
}

/// Skill bar selections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skills {
    #[serde(default)]
    pub heal: Option<u32>,
    #[serde(default)]
    pub utilities: [Option<u32>; 3],
    #[serde(default)]
    pub elite: Option<u32>,
}

impl Skills {
    /// Returns the five skills in bar order: heal, three utilities, elite.
    #[must_use]
    pub const fn to_array(&self) -> [Option<u32>; 5] {
        [
            self.heal,
            self.utilities[0],
            self.utilities[1],
            self.utilities[2],
            self.elite,
        ]
    }

    /// Builds skills from bar order.
    #[must_use]
    pub const fn from_array(skills: [Option<u32>; 5]) -> Self {
        Self {
            heal: skills[0],
            utilities: [skills[1], skills[2], skills[3]],
            elite: skills[4],
        }
    }
}

/// A trait line and its chosen major trait per tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecializationChoice {
    pub id: u32,
    /// Chosen trait ID for tiers 0, 1 and 2.
    #[serde(default)]
    pub traits: [Option<u32>; 3],
}

impl SpecializationChoice {
    #[must_use]
    pub const fn new(id: u32, traits: [Option<u32>; 3]) -> Self {
        Self { id, traits }
    }
}

/// Profession-specific selections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ProfessionMechanics {
    #[default]
    None,
    #[serde(rename_all = "camelCase")]
    Elementalist { familiar: Option<u32> },
    #[serde(rename_all = "camelCase")]
    Revenant {
        legend1: Option<Legend>,
        legend2: Option<Legend>,
    },
    #[serde(rename_all = "camelCase")]
    Engineer { morphs: [Option<u32>; 3] },
    #[serde(rename_all = "camelCase")]
    Ranger { pet1: Option<u32>, pet2: Option<u32> },
}

impl ProfessionMechanics {
    /// Returns `true` if nothing is selected.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        match self {
            Self::None => true,
            Self::Elementalist { familiar } => familiar.is_none(),
            Self::Revenant { legend1, legend2 } => legend1.is_none() && legend2.is_none(),
            Self::Engineer { morphs } => {
                morphs[0].is_none() && morphs[1].is_none() && morphs[2].is_none()
            }
            Self::Ranger { pet1, pet2 } => pet1.is_none() && pet2.is_none(),
        }
    }

    /// Returns the profession these mechanics belong to.
    #[must_use]
    pub const fn profession(&self) -> Option<Profession> {
        match self {
            Self::None => None,
            Self::Elementalist { .. } => Some(Profession::Elementalist),
            Self::Revenant { .. } => Some(Profession::Revenant),
            Self::Engineer { .. } => Some(Profession::Engineer),
            Self::Ranger { .. } => Some(Profession::Ranger),
        }
    }

    /// Returns the mechanics if they are set and belong to `profession`.
    #[must_use]
    pub fn for_profession(&self, profession: Profession) -> Option<&Self> {
        (!self.is_empty() && self.profession() == Some(profession)).then_some(self)
    }
}
