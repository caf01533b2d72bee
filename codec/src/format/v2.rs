//! Version 2: stats, weapons and sigils as text.
//!
//! ```text
//! u8 tag=2, u8 profession, u8 game mode
//! u8 count, count x { u8 slot, str stat, str weapon, str upgrade, u8 n, n x varint infusion }
//! 5 x varint skill, u8 count, count x { varint spec, 3 x varint trait }
//! varint rune, varint relic
//! ```
//!
//! The upgrade text is the sigil IDs in decimal joined by `+`.

use bitstream::{ByteReader, ByteWriter};
use wire::{TableKind, WireTables, WireVersion};

use super::common::{
    drop_mechanics, ensure_consumed, expect_tag, read_count, read_header, read_id_or_zero,
    read_infusions_inline, read_skills_fixed, read_trait_lines_fixed, write_count, write_header,
    write_id_or_zero, write_infusions_inline, write_skills_fixed, write_trait_lines_fixed,
};
use crate::equipment::{ordered_equipment, SlotTable};
use crate::error::{CodecResult, LimitKind};
use crate::limits::CodecLimits;
use crate::report::{FallbackWarning, Warnings};
use crate::types::{Build, Equipment, ProfessionMechanics, FALLBACK_STAT};

const VERSION: WireVersion = WireVersion::V2;

pub(crate) fn encode(build: &Build, warnings: &mut Warnings) -> CodecResult<Vec<u8>> {
    let equipment = ordered_equipment(build)?;
    let mut writer = ByteWriter::with_capacity(256);
    write_header(&mut writer, VERSION, build);

    write_count(&mut writer, "equipment count", equipment.len())?;
    for entry in equipment {
        writer.write_u8(entry.slot.index());
        writer.write_str(&entry.stat)?;
        writer.write_str(entry.weapon_type.as_deref().unwrap_or(""))?;
        writer.write_str(&upgrade_text(entry.sigil1_id, entry.sigil2_id))?;
        write_infusions_inline(&mut writer, entry);
    }

    write_skills_fixed(&mut writer, &build.skills);
    write_trait_lines_fixed(&mut writer, &build.specializations)?;
    write_id_or_zero(&mut writer, build.rune_id);
    write_id_or_zero(&mut writer, build.relic_id);
    drop_mechanics(build, VERSION, warnings);
    Ok(writer.finish())
}

pub(crate) fn decode(
    bytes: &[u8],
    limits: &CodecLimits,
    warnings: &mut Warnings,
) -> CodecResult<Build> {
    let tables = WireTables::for_version(VERSION);
    let mut reader = ByteReader::new(bytes);
    expect_tag(&mut reader, VERSION)?;
    let (profession, game_mode) = read_header(&mut reader, &tables)?;

    let count = read_count(
        &mut reader,
        LimitKind::EquipmentEntries,
        limits.max_equipment_entries,
    )?;
    let mut slots = SlotTable::default();
    for _ in 0..count {
        let index = reader.read_u8()?;
        let slot = tables.slot(index).ok_or(wire::DecodeError::InvalidTableIndex {
            table: TableKind::Slot,
            index,
        })?;
        let stat = reader.read_str(limits.max_string_len)?;
        let weapon = reader.read_str(limits.max_string_len)?;
        let upgrade = reader.read_str(limits.max_string_len)?;
        let infusions = read_infusions_inline(&mut reader)?;

        let (sigil1, sigil2) = parse_upgrade(&upgrade).unwrap_or_else(|| {
            warnings.push(FallbackWarning::UnparseableUpgrade {
                slot,
                text: upgrade.clone(),
            });
            (None, None)
        });
        let mut entry = Equipment::new(slot, stat)
            .sigils(sigil1, sigil2)
            .infusions(infusions);
        if !weapon.is_empty() {
            entry.weapon_type = Some(weapon);
        }
        slots.insert(entry)?;
    }

    let skills = read_skills_fixed(&mut reader)?;
    let specializations = read_trait_lines_fixed(&mut reader, limits)?;
    let rune_id = read_id_or_zero(&mut reader)?;
    let relic_id = read_id_or_zero(&mut reader)?;
    ensure_consumed(&reader)?;

    Ok(Build {
        profession,
        game_mode,
        equipment: slots.complete(FALLBACK_STAT),
        skills,
        specializations,
        rune_id,
        relic_id,
        mechanics: ProfessionMechanics::None,
    })
}

fn upgrade_text(sigil1: Option<u32>, sigil2: Option<u32>) -> String {
    match (sigil1, sigil2) {
        (None, None) => String::new(),
        (Some(first), None) => first.to_string(),
        (first, Some(second)) => {
            format!("{}+{second}", first.map(|id| id.to_string()).unwrap_or_default())
        }
    }
}

/// Parses upgrade text into sigil IDs; `None` if it is not a sigil list.
fn parse_upgrade(text: &str) -> Option<(Option<u32>, Option<u32>)> {
    fn part(text: &str) -> Option<Option<u32>> {
        let text = text.trim();
        if text.is_empty() {
            return Some(None);
        }
        text.parse::<u32>().ok().filter(|id| *id != 0).map(Some)
    }

    match text.split_once('+') {
        None => Some((part(text)?, None)),
        Some((first, second)) => Some((part(first)?, part(second)?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wire::{GameMode, Profession, Slot};

    #[test]
    fn upgrade_text_forms() {
        assert_eq!(upgrade_text(None, None), "");
        assert_eq!(upgrade_text(Some(24_615), None), "24615");
        assert_eq!(upgrade_text(Some(24_615), Some(24_868)), "24615+24868");
        assert_eq!(upgrade_text(None, Some(24_868)), "+24868");
    }

    #[test]
    fn upgrade_parse_forms() {
        assert_eq!(parse_upgrade(""), Some((None, None)));
        assert_eq!(parse_upgrade("24615"), Some((Some(24_615), None)));
        assert_eq!(
            parse_upgrade("24615+24868"),
            Some((Some(24_615), Some(24_868)))
        );
        assert_eq!(parse_upgrade("+24868"), Some((None, Some(24_868))));
        assert_eq!(parse_upgrade("Superior Sigil of Force"), None);
        assert_eq!(parse_upgrade("1+2+3"), None);
    }

    #[test]
    fn layout_starts_with_tag_and_header() {
        let build = Build::new(Profession::Mesmer, GameMode::WvW);
        let bytes = encode(&build, &mut Warnings::default()).unwrap();
        assert_eq!(&bytes[..4], &[2, 6, 2, 16]);
        // slot 0, "Berserker"
        assert_eq!(bytes[4], 0);
        assert_eq!(bytes[5], 9);
        assert_eq!(&bytes[6..15], b"Berserker");
    }

    #[test]
    fn text_upgrade_falls_back() {
        let mut writer = ByteWriter::new();
        writer.write_u8(2);
        writer.write_u8(Profession::Warrior.index());
        writer.write_u8(GameMode::PvE.index());
        writer.write_u8(1);
        writer.write_u8(Slot::MainHand1.index());
        writer.write_str("Berserker").unwrap();
        writer.write_str("Greatsword").unwrap();
        writer.write_str("Superior Sigil of Force").unwrap();
        writer.write_u8(0);
        for _ in 0..5 {
            writer.write_varu32(0);
        }
        writer.write_u8(0);
        writer.write_varu32(0);
        writer.write_varu32(0);
        let bytes = writer.finish();

        let mut warnings = Warnings::default();
        let build = decode(&bytes, &CodecLimits::default(), &mut warnings).unwrap();
        let weapon = build.equipment(Slot::MainHand1).unwrap();
        assert_eq!(weapon.weapon_type.as_deref(), Some("Greatsword"));
        assert_eq!(weapon.sigil1_id, None);
        assert_eq!(build.equipment.len(), 16);
        assert!(matches!(
            warnings.into_vec().as_slice(),
            [FallbackWarning::UnparseableUpgrade { slot: Slot::MainHand1, .. }]
        ));
    }
}
