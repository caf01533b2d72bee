//! Sparse equipment rules: default stat inference and infusion pooling.

use wire::{Slot, SLOTS};

use crate::error::{CodecError, CodecResult};
use crate::types::{Build, Equipment, FALLBACK_STAT};

/// Armor and trinket slots that must share a stat for it to become the default.
pub const DEFAULT_STAT_THRESHOLD: usize = 8;

/// Returns the build-wide default stat.
///
/// This is the most frequent stat over the 12 armor and trinket slots when it
/// occurs at least [`DEFAULT_STAT_THRESHOLD`] times, otherwise
/// [`FALLBACK_STAT`]. Counting follows slot order and ties go to the stat
/// seen first, so the result does not depend on entry order.
pub fn default_stat(build: &Build) -> &str {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for slot in SLOTS.iter().filter(|slot| !slot.is_weapon()) {
        let Some(entry) = build.equipment(*slot) else {
            continue;
        };
        match counts.iter_mut().find(|(stat, _)| *stat == entry.stat) {
            Some((_, count)) => *count += 1,
            None => counts.push((entry.stat.as_str(), 1)),
        }
    }

    let mut best: Option<(&str, usize)> = None;
    for (stat, count) in counts {
        if best.map_or(true, |(_, top)| count > top) {
            best = Some((stat, count));
        }
    }
    match best {
        Some((stat, count)) if count >= DEFAULT_STAT_THRESHOLD => stat,
        _ => FALLBACK_STAT,
    }
}

/// Returns `true` if the entry carries nothing beyond the default stat and
/// can be left off the wire.
pub fn is_implied(entry: &Equipment, default_stat: &str) -> bool {
    entry.weapon_type.is_none()
        && entry.sigil1_id.is_none()
        && entry.sigil2_id.is_none()
        && entry.stat == default_stat
}

/// Returns the build's entries in slot order, rejecting duplicate slots.
pub(crate) fn ordered_equipment(build: &Build) -> CodecResult<Vec<&Equipment>> {
    let mut seen = [false; SLOTS.len()];
    for entry in &build.equipment {
        let index = usize::from(entry.slot.index());
        if seen[index] {
            return Err(CodecError::DuplicateSlot { slot: entry.slot });
        }
        seen[index] = true;
    }
    Ok(SLOTS
        .iter()
        .filter_map(|slot| build.equipment(*slot))
        .collect())
}

/// One infusion item ID and how many times it is equipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InfusionGroup {
    pub id: u32,
    pub count: usize,
}

/// Groups every infusion in the build by item ID, in first-seen slot order.
pub fn pool_infusions(build: &Build) -> Vec<InfusionGroup> {
    let mut groups: Vec<InfusionGroup> = Vec::new();
    for slot in SLOTS {
        let Some(entry) = build.equipment(slot) else {
            continue;
        };
        for id in entry.infusion_ids() {
            match groups.iter_mut().find(|group| group.id == id) {
                Some(group) => group.count += 1,
                None => groups.push(InfusionGroup { id, count: 1 }),
            }
        }
    }
    groups
}

/// Total infusion slots of the equipment a decoder will rebuild from `build`.
pub fn infusion_capacity(build: &Build) -> usize {
    SLOTS
        .iter()
        .map(|slot| {
            build.equipment(*slot).map_or_else(
                || Equipment::new(*slot, "").infusion_capacity(),
                Equipment::infusion_capacity,
            )
        })
        .sum()
}

/// Fills infusion slots greedily in slot order from the pooled groups.
///
/// `equipment` must be in slot order. Returns the number of infusions that
/// did not fit.
pub fn distribute_infusions(equipment: &mut [Equipment], groups: &[InfusionGroup]) -> usize {
    let mut pool = groups
        .iter()
        .flat_map(|group| std::iter::repeat(group.id).take(group.count));
    for entry in equipment.iter_mut() {
        entry.infusions = [None; 3];
    }
    for entry in equipment.iter_mut() {
        let capacity = entry.infusion_capacity();
        for infusion in entry.infusions.iter_mut().take(capacity) {
            let Some(id) = pool.next() else {
                return 0;
            };
            *infusion = Some(id);
        }
    }
    pool.count()
}

/// Decoded entries indexed by slot.
#[derive(Debug, Default)]
pub(crate) struct SlotTable {
    entries: [Option<Equipment>; 16],
}

impl SlotTable {
    pub(crate) fn insert(&mut self, entry: Equipment) -> CodecResult<()> {
        let index = usize::from(entry.slot.index());
        if self.entries[index].is_some() {
            return Err(CodecError::DuplicateSlot { slot: entry.slot });
        }
        self.entries[index] = Some(entry);
        Ok(())
    }

    /// Returns all 16 entries in slot order, synthesizing missing slots with
    /// `default_stat`.
    pub(crate) fn complete(self, default_stat: &str) -> Vec<Equipment> {
        self.entries
            .into_iter()
            .zip(SLOTS)
            .map(|(entry, slot): (Option<Equipment>, Slot)| {
                entry.unwrap_or_else(|| Equipment::new(slot, default_stat))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wire::{GameMode, Profession};

    fn build_with_stats(stats: &[(Slot, &str)]) -> Build {
        let mut build = Build::new(Profession::Guardian, GameMode::PvE);
        for (slot, stat) in stats {
            build.equipment_mut(*slot).unwrap().stat = (*stat).to_owned();
        }
        build
    }

    #[test]
    fn default_requires_threshold() {
        let slots: Vec<(Slot, &str)> = SLOTS[..7].iter().map(|s| (*s, "Minstrel")).collect();
        let build = build_with_stats(&slots);
        // 7 Minstrel, 5 Berserker
        assert_eq!(default_stat(&build), FALLBACK_STAT);

        let slots: Vec<(Slot, &str)> = SLOTS[..8].iter().map(|s| (*s, "Minstrel")).collect();
        let build = build_with_stats(&slots);
        assert_eq!(default_stat(&build), "Minstrel");
    }

    #[test]
    fn default_ignores_weapons() {
        let mut slots: Vec<(Slot, &str)> = SLOTS[..6].iter().map(|s| (*s, "Viper")).collect();
        slots.extend(SLOTS[12..].iter().map(|s| (*s, "Viper")));
        let build = build_with_stats(&slots);
        assert_eq!(default_stat(&build), FALLBACK_STAT);
    }

    #[test]
    fn default_is_order_independent() {
        let slots: Vec<(Slot, &str)> = SLOTS[..10].iter().map(|s| (*s, "Minstrel")).collect();
        let mut build = build_with_stats(&slots);
        let forward = default_stat(&build).to_owned();
        build.equipment.reverse();
        assert_eq!(default_stat(&build), forward);
    }

    #[test]
    fn implied_entries() {
        let plain = Equipment::new(Slot::Helm, "Minstrel");
        assert!(is_implied(&plain, "Minstrel"));
        assert!(!is_implied(&plain, "Berserker"));
        let weapon = Equipment::new(Slot::MainHand1, "Minstrel").weapon("Mace");
        assert!(!is_implied(&weapon, "Minstrel"));
        let sigil = Equipment::new(Slot::OffHand1, "Minstrel").sigils(None, Some(24_615));
        assert!(!is_implied(&sigil, "Minstrel"));
    }

    #[test]
    fn duplicate_slots_rejected() {
        let mut build = Build::new(Profession::Thief, GameMode::PvP);
        build.equipment.push(Equipment::new(Slot::Helm, "Viper"));
        assert_eq!(
            ordered_equipment(&build).unwrap_err(),
            CodecError::DuplicateSlot { slot: Slot::Helm }
        );
    }

    #[test]
    fn pool_groups_first_seen() {
        let mut build = Build::new(Profession::Guardian, GameMode::PvE);
        build.equipment_mut(Slot::Ring1).unwrap().infusions = [Some(2), Some(1), Some(2)];
        build.equipment_mut(Slot::Helm).unwrap().infusions = [Some(1), None, None];
        let groups = pool_infusions(&build);
        assert_eq!(
            groups,
            vec![
                InfusionGroup { id: 1, count: 2 },
                InfusionGroup { id: 2, count: 2 },
            ]
        );
    }

    #[test]
    fn distribute_fills_in_slot_order() {
        let mut equipment: Vec<Equipment> =
            SLOTS.iter().map(|slot| Equipment::new(*slot, "Viper")).collect();
        let groups = [InfusionGroup { id: 7, count: 9 }];
        let dropped = distribute_infusions(&mut equipment, &groups);
        assert_eq!(dropped, 0);
        // six armor pieces, amulet skipped, then three in the first ring
        for entry in &equipment[..6] {
            assert_eq!(entry.infusions, [Some(7), None, None]);
        }
        assert_eq!(equipment[6].infusions, [None; 3]);
        assert_eq!(equipment[7].infusions, [Some(7), Some(7), Some(7)]);
        assert_eq!(equipment[8].infusions, [None; 3]);
    }

    #[test]
    fn distribute_reports_overflow() {
        let mut equipment: Vec<Equipment> =
            SLOTS.iter().map(|slot| Equipment::new(*slot, "Viper")).collect();
        let build = Build::new(Profession::Guardian, GameMode::PvE);
        let capacity = infusion_capacity(&build);
        // 6 armor + 0 amulet + 6 rings + 2 accessories + 2 back + 4 weapons
        assert_eq!(capacity, 20);
        let groups = [InfusionGroup { id: 7, count: capacity + 3 }];
        assert_eq!(distribute_infusions(&mut equipment, &groups), 3);
    }

    #[test]
    fn slot_table_completes_in_order() {
        let mut table = SlotTable::default();
        table
            .insert(Equipment::new(Slot::OffHand2, "Viper").weapon("Torch"))
            .unwrap();
        assert!(table.insert(Equipment::new(Slot::OffHand2, "Viper")).is_err());
        let equipment = table.complete("Minstrel");
        assert_eq!(equipment.len(), 16);
        assert_eq!(equipment[0], Equipment::new(Slot::Helm, "Minstrel"));
        assert_eq!(equipment[15].weapon_type.as_deref(), Some("Torch"));
    }
}
