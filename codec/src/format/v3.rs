//! Version 3: table indices with text escapes, sigils and infusions as IDs.
//!
//! ```text
//! u8 tag=3, u8 profession, u8 game mode
//! u8 count, count x { slot+stat, opt-entry weapon, varint sigil1, varint sigil2,
//!                     u8 n, n x varint infusion }
//! 5 x varint skill, u8 count, count x { varint spec, 3 x varint trait }
//! varint rune, varint relic
//! ```
//!
//! Versions 4 and 5 append to this body unchanged, except that version 5
//! reads stats against its own table.

use bitstream::{ByteReader, ByteWriter};
use wire::{
    read_optional_entry, read_slot_stat, write_optional_entry, write_slot_stat, TableKind,
    WireTables, WireVersion,
};

use super::common::{
    drop_mechanics, ensure_consumed, expect_tag, read_count, read_header, read_id_or_zero,
    read_infusions_inline, read_skills_fixed, read_trait_lines_fixed, stat_entry, stat_name,
    weapon_entry, weapon_name, write_count, write_header, write_id_or_zero,
    write_infusions_inline, write_skills_fixed, write_trait_lines_fixed,
};
use crate::equipment::{ordered_equipment, SlotTable};
use crate::error::{CodecResult, LimitKind};
use crate::limits::CodecLimits;
use crate::report::Warnings;
use crate::types::{Build, Equipment, ProfessionMechanics, FALLBACK_STAT};

const VERSION: WireVersion = WireVersion::V3;

pub(crate) fn encode(build: &Build, warnings: &mut Warnings) -> CodecResult<Vec<u8>> {
    let mut writer = ByteWriter::with_capacity(128);
    write_body(&mut writer, VERSION, build, warnings)?;
    drop_mechanics(build, VERSION, warnings);
    Ok(writer.finish())
}

pub(crate) fn decode(bytes: &[u8], limits: &CodecLimits) -> CodecResult<Build> {
    let mut reader = ByteReader::new(bytes);
    let build = read_body(&mut reader, VERSION, limits)?;
    ensure_consumed(&reader)?;
    Ok(build)
}

/// Writes the v3 body tagged as `version`, using that version's tables.
pub(super) fn write_body(
    writer: &mut ByteWriter,
    version: WireVersion,
    build: &Build,
    warnings: &mut Warnings,
) -> CodecResult<()> {
    let tables = WireTables::for_version(version);
    let equipment = ordered_equipment(build)?;
    write_header(writer, version, build);

    write_count(writer, "equipment count", equipment.len())?;
    for entry in equipment {
        let stat = stat_entry(&tables, Some(entry.slot), &entry.stat, warnings);
        write_slot_stat(writer, entry.slot, &stat)?;
        let weapon = entry
            .weapon_type
            .as_deref()
            .map(|weapon| weapon_entry(entry.slot, weapon, warnings));
        write_optional_entry(writer, weapon.as_ref(), TableKind::Weapon)?;
        write_id_or_zero(writer, entry.sigil1_id);
        write_id_or_zero(writer, entry.sigil2_id);
        write_infusions_inline(writer, entry);
    }

    write_skills_fixed(writer, &build.skills);
    write_trait_lines_fixed(writer, &build.specializations)?;
    write_id_or_zero(writer, build.rune_id);
    write_id_or_zero(writer, build.relic_id);
    Ok(())
}

/// Reads a v3 body tagged as `version`. Mechanics are left empty.
pub(super) fn read_body(
    reader: &mut ByteReader<'_>,
    version: WireVersion,
    limits: &CodecLimits,
) -> CodecResult<Build> {
    let tables = WireTables::for_version(version);
    expect_tag(reader, version)?;
    let (profession, game_mode) = read_header(reader, &tables)?;

    let count = read_count(
        reader,
        LimitKind::EquipmentEntries,
        limits.max_equipment_entries,
    )?;
    let mut slots = SlotTable::default();
    for _ in 0..count {
        let (slot, stat) = read_slot_stat(reader, limits.max_string_len)?;
        let stat = stat_name(&tables, stat)?;
        let weapon = read_optional_entry(reader, limits.max_string_len)?
            .map(weapon_name)
            .transpose()?;
        let sigil1 = read_id_or_zero(reader)?;
        let sigil2 = read_id_or_zero(reader)?;
        let infusions = read_infusions_inline(reader)?;

        let mut entry = Equipment::new(slot, stat)
            .sigils(sigil1, sigil2)
            .infusions(infusions);
        entry.weapon_type = weapon;
        slots.insert(entry)?;
    }

    let skills = read_skills_fixed(reader)?;
    let specializations = read_trait_lines_fixed(reader, limits)?;
    let rune_id = read_id_or_zero(reader)?;
    let relic_id = read_id_or_zero(reader)?;

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
