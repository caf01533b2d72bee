//! Frozen enumeration tables.
//!
//! A value's wire representation is its index in these tables. Tables are
//! append-only: once an index has been issued in a shared code it must keep
//! meaning the same value forever, so new values only ever go at the end.

use std::fmt;

use crate::version::WireVersion;

/// Character profession.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Profession {
    Guardian = 0,
    Warrior = 1,
    Engineer = 2,
    Ranger = 3,
    Thief = 4,
    Elementalist = 5,
    Mesmer = 6,
    Necromancer = 7,
    Revenant = 8,
}

/// Game mode a build targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum GameMode {
    #[default]
    PvE = 0,
    PvP = 1,
    WvW = 2,
}

/// Equipment slot.
///
/// Indices 0..6 are armor, 6..12 trinkets, 12..16 weapons. The index must
/// stay below 16 so it fits the 4-bit slot field of the slot+stat packing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Slot {
    Helm = 0,
    Shoulders = 1,
    Coat = 2,
    Gloves = 3,
    Leggings = 4,
    Boots = 5,
    Amulet = 6,
    Ring1 = 7,
    Ring2 = 8,
    Accessory1 = 9,
    Accessory2 = 10,
    Backpack = 11,
    MainHand1 = 12,
    OffHand1 = 13,
    MainHand2 = 14,
    OffHand2 = 15,
}

/// Revenant legend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Legend {
    Assassin = 0,
    Demon = 1,
    Dwarf = 2,
    Centaur = 3,
    Dragon = 4,
    Renegade = 5,
    Alliance = 6,
    Entity = 7,
}

/// Profession table, in wire index order.
pub const PROFESSIONS: [Profession; 9] = [
    Profession::Guardian,
    Profession::Warrior,
    Profession::Engineer,
    Profession::Ranger,
    Profession::Thief,
    Profession::Elementalist,
    Profession::Mesmer,
    Profession::Necromancer,
    Profession::Revenant,
];

/// Game mode table, in wire index order.
pub const GAME_MODES: [GameMode; 3] = [GameMode::PvE, GameMode::PvP, GameMode::WvW];

/// Slot table, in wire index order. This is also the fixed traversal order
/// used when infusions are redistributed.
pub const SLOTS: [Slot; 16] = [
    Slot::Helm,
    Slot::Shoulders,
    Slot::Coat,
    Slot::Gloves,
    Slot::Leggings,
    Slot::Boots,
    Slot::Amulet,
    Slot::Ring1,
    Slot::Ring2,
    Slot::Accessory1,
    Slot::Accessory2,
    Slot::Backpack,
    Slot::MainHand1,
    Slot::OffHand1,
    Slot::MainHand2,
    Slot::OffHand2,
];

/// Legend table, in wire index order.
pub const LEGENDS: [Legend; 8] = [
    Legend::Assassin,
    Legend::Demon,
    Legend::Dwarf,
    Legend::Centaur,
    Legend::Dragon,
    Legend::Renegade,
    Legend::Alliance,
    Legend::Entity,
];

/// Weapon type table, in wire index order.
pub const WEAPONS: [&str; 19] = [
    "Axe",
    "Dagger",
    "Mace",
    "Pistol",
    "Scepter",
    "Sword",
    "Focus",
    "Shield",
    "Torch",
    "Warhorn",
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

/// Stat combination master table, in wire index order.
///
/// Each version freezes a prefix of this list (see [`WireTables`]). At most
/// 64 entries fit the 6-bit stat field of the slot+stat packing.
pub const STATS: [&str; 44] = [
    // v2 .. v4
    "Berserker",
    "Assassin",
    "Marauder",
    "Viper",
    "Sinister",
    "Grieving",
    "Valkyrie",
    "Rampager",
    "Knight",
    "Soldier",
    "Cavalier",
    "Sentinel",
    "Dire",
    "Trailblazer",
    "Carrion",
    "Rabid",
    "Harrier",
    "Minstrel",
    "Magi",
    "Cleric",
    "Apothecary",
    "Giver",
    "Nomad",
    "Celestial",
    "Wanderer",
    "Diviner",
    "Commander",
    "Seraph",
    "Marshal",
    "Plaguedoctor",
    "Vigilant",
    "Crusader",
    "Settler",
    "Shaman",
    "Zealot",
    // v5
    "Dragon",
    "Ritualist",
    "Bringer",
    // v6
    "Demolisher",
    "Paladin",
    "Captain",
    "Wizard",
    "Sage",
    "Mender",
];

const STATS_V2: usize = 35;
const STATS_V5: usize = 38;
const STATS_V6: usize = 44;

/// Maximum number of stat combinations any version may freeze.
pub const MAX_STATS: usize = 64;

/// The frozen view of every table for one wire version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WireTables {
    version: WireVersion,
    stat_count: usize,
}

impl WireTables {
    /// Returns the tables frozen for `version`.
    #[must_use]
    pub const fn for_version(version: WireVersion) -> Self {
        let stat_count = match version {
            WireVersion::LegacyJson | WireVersion::V2 | WireVersion::V3 | WireVersion::V4 => {
                STATS_V2
            }
            WireVersion::V5 => STATS_V5,
            WireVersion::V6 => STATS_V6,
        };
        Self {
            version,
            stat_count,
        }
    }

    /// Returns the version these tables belong to.
    #[must_use]
    pub const fn version(&self) -> WireVersion {
        self.version
    }

    /// Returns the stat combinations known to this version.
    #[must_use]
    pub fn stats(&self) -> &'static [&'static str] {
        &STATS[..self.stat_count]
    }

    /// Returns the wire index of a stat combination.
    #[must_use]
    pub fn stat_index(&self, name: &str) -> Option<u8> {
        index_of(self.stats(), name)
    }

    /// Returns the stat combination at `index`.
    #[must_use]
    pub fn stat(&self, index: u8) -> Option<&'static str> {
        self.stats().get(usize::from(index)).copied()
    }

    /// Returns the wire index of a weapon type.
    #[must_use]
    pub fn weapon_index(&self, name: &str) -> Option<u8> {
        index_of(&WEAPONS, name)
    }

    /// Returns the weapon type at `index`.
    #[must_use]
    pub fn weapon(&self, index: u8) -> Option<&'static str> {
        WEAPONS.get(usize::from(index)).copied()
    }

    /// Returns the profession at `index`.
    #[must_use]
    pub fn profession(&self, index: u8) -> Option<Profession> {
        PROFESSIONS.get(usize::from(index)).copied()
    }

    /// Returns the game mode at `index`.
    #[must_use]
    pub fn game_mode(&self, index: u8) -> Option<GameMode> {
        GAME_MODES.get(usize::from(index)).copied()
    }

    /// Returns the slot at `index`.
    #[must_use]
    pub fn slot(&self, index: u8) -> Option<Slot> {
        SLOTS.get(usize::from(index)).copied()
    }

    /// Returns the legend at `index`.
    #[must_use]
    pub fn legend(&self, index: u8) -> Option<Legend> {
        LEGENDS.get(usize::from(index)).copied()
    }
}

fn index_of(table: &[&str], name: &str) -> Option<u8> {
    table
        .iter()
        .position(|entry| *entry == name)
        .and_then(|index| u8::try_from(index).ok())
}

impl Profession {
    /// Returns the wire index.
    #[must_use]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Returns the display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Guardian => "Guardian",
            Self::Warrior => "Warrior",
            Self::Engineer => "Engineer",
            Self::Ranger => "Ranger",
            Self::Thief => "Thief",
            Self::Elementalist => "Elementalist",
            Self::Mesmer => "Mesmer",
            Self::Necromancer => "Necromancer",
            Self::Revenant => "Revenant",
        }
    }

    /// Parses a display name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        PROFESSIONS.into_iter().find(|p| p.name() == name)
    }
}

impl GameMode {
    /// Returns the wire index.
    #[must_use]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Returns the display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::PvE => "PvE",
            Self::PvP => "PvP",
            Self::WvW => "WvW",
        }
    }

    /// Parses a display name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        GAME_MODES.into_iter().find(|m| m.name() == name)
    }
}

impl Slot {
    /// Returns the wire index.
    #[must_use]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Returns `true` for the six armor pieces.
    #[must_use]
    pub const fn is_armor(self) -> bool {
        (self as u8) < 6
    }

    /// Returns `true` for the six trinkets (amulet, rings, accessories, back).
    #[must_use]
    pub const fn is_trinket(self) -> bool {
        matches!(self as u8, 6..=11)
    }

    /// Returns `true` for the four weapon slots.
    #[must_use]
    pub const fn is_weapon(self) -> bool {
        (self as u8) >= 12
    }

    /// Returns the display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Helm => "Helm",
            Self::Shoulders => "Shoulders",
            Self::Coat => "Coat",
            Self::Gloves => "Gloves",
            Self::Leggings => "Leggings",
            Self::Boots => "Boots",
            Self::Amulet => "Amulet",
            Self::Ring1 => "Ring1",
            Self::Ring2 => "Ring2",
            Self::Accessory1 => "Accessory1",
            Self::Accessory2 => "Accessory2",
            Self::Backpack => "Backpack",
            Self::MainHand1 => "MainHand1",
            Self::OffHand1 => "OffHand1",
            Self::MainHand2 => "MainHand2",
            Self::OffHand2 => "OffHand2",
        }
    }

    /// Parses a display name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        SLOTS.into_iter().find(|s| s.name() == name)
    }
}

impl Legend {
    /// Returns the wire index.
    #[must_use]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Returns the display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Assassin => "Legendary Assassin",
            Self::Demon => "Legendary Demon",
            Self::Dwarf => "Legendary Dwarf",
            Self::Centaur => "Legendary Centaur",
            Self::Dragon => "Legendary Dragon",
            Self::Renegade => "Legendary Renegade",
            Self::Alliance => "Legendary Alliance",
            Self::Entity => "Legendary Entity",
        }
    }
}

impl fmt::Display for Profession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for Legend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_indices_match_discriminants() {
        for (i, p) in PROFESSIONS.iter().enumerate() {
            assert_eq!(usize::from(p.index()), i);
        }
        for (i, m) in GAME_MODES.iter().enumerate() {
            assert_eq!(usize::from(m.index()), i);
        }
        for (i, s) in SLOTS.iter().enumerate() {
            assert_eq!(usize::from(s.index()), i);
        }
        for (i, l) in LEGENDS.iter().enumerate() {
            assert_eq!(usize::from(l.index()), i);
        }
    }

    #[test]
    fn table_sizes() {
        assert_eq!(PROFESSIONS.len(), 9);
        assert_eq!(GAME_MODES.len(), 3);
        assert_eq!(SLOTS.len(), 16);
        assert_eq!(WEAPONS.len(), 19);
        assert_eq!(LEGENDS.len(), 8);
        assert!(STATS.len() <= MAX_STATS);
    }

    #[test]
    fn slot_partition() {
        let armor = SLOTS.iter().filter(|s| s.is_armor()).count();
        let trinkets = SLOTS.iter().filter(|s| s.is_trinket()).count();
        let weapons = SLOTS.iter().filter(|s| s.is_weapon()).count();
        assert_eq!((armor, trinkets, weapons), (6, 6, 4));
        assert_eq!(Slot::OffHand2.index(), 15);
    }

    #[test]
    fn stat_tables_are_prefixes() {
        let mut previous: &[&str] = &[];
        for version in WireVersion::ALL {
            let stats = WireTables::for_version(version).stats();
            assert!(stats.len() >= previous.len(), "{version} shrank the stat table");
            assert_eq!(&stats[..previous.len()], previous, "{version} reordered stats");
            previous = stats;
        }
    }

    #[test]
    fn frozen_stat_indices() {
        // These indices are baked into shared codes.
        let v3 = WireTables::for_version(WireVersion::V3);
        assert_eq!(v3.stat_index("Berserker"), Some(0));
        assert_eq!(v3.stat_index("Minstrel"), Some(17));
        assert_eq!(v3.stat_index("Zealot"), Some(34));
        assert_eq!(v3.stat_index("Dragon"), None);

        let v5 = WireTables::for_version(WireVersion::V5);
        assert_eq!(v5.stat_index("Dragon"), Some(35));
        assert_eq!(v5.stat_index("Demolisher"), None);

        let v6 = WireTables::for_version(WireVersion::V6);
        assert_eq!(v6.stat_index("Mender"), Some(43));
        assert_eq!(v6.stat(43), Some("Mender"));
        assert_eq!(v6.stat(44), None);
    }

    #[test]
    fn names_roundtrip() {
        for p in PROFESSIONS {
            assert_eq!(Profession::from_name(p.name()), Some(p));
        }
        for s in SLOTS {
            assert_eq!(Slot::from_name(s.name()), Some(s));
        }
        assert_eq!(GameMode::from_name("WvW"), Some(GameMode::WvW));
        assert_eq!(Profession::from_name("Bard"), None);
    }

    #[test]
    fn weapon_lookup() {
        let tables = WireTables::for_version(WireVersion::V6);
        assert_eq!(tables.weapon_index("Axe"), Some(0));
        assert_eq!(tables.weapon_index("HarpoonGun"), Some(18));
        assert_eq!(tables.weapon(18), Some("HarpoonGun"));
        assert_eq!(tables.weapon_index("Rapier"), None);
    }
}
