//! Field codecs shared by the frozen layouts.
//!
//! The fixed-width helpers (`*_fixed`, `*_inline`) are the v2..v5 field
//! layouts, which are byte-identical across those versions.

use bitstream::{ByteReader, ByteWriter};
use wire::{
    known_name, GameMode, Profession, Slot, TableEntry, TableKind, WireTables, WireVersion,
};

use crate::error::{CodecError, CodecResult, LimitKind};
use crate::limits::CodecLimits;
use crate::report::{FallbackWarning, Warnings};
use crate::types::{Build, Equipment, Skills, SpecializationChoice};

/// Writes the version tag, profession and game mode.
pub(super) fn write_header(writer: &mut ByteWriter, version: WireVersion, build: &Build) {
    if let Some(tag) = version.tag() {
        writer.write_u8(tag);
    }
    writer.write_u8(build.profession.index());
    writer.write_u8(build.game_mode.index());
}

/// Reads and checks the version tag.
pub(super) fn expect_tag(reader: &mut ByteReader<'_>, version: WireVersion) -> CodecResult<()> {
    let found = reader.read_u8()?;
    if version.tag() != Some(found) {
        return Err(CodecError::VersionMismatch {
            expected: version,
            found,
        });
    }
    Ok(())
}

/// Reads the profession and game mode that follow the tag.
pub(super) fn read_header(
    reader: &mut ByteReader<'_>,
    tables: &WireTables,
) -> CodecResult<(Profession, GameMode)> {
    let index = reader.read_u8()?;
    let profession = tables
        .profession(index)
        .ok_or(wire::DecodeError::InvalidTableIndex {
            table: TableKind::Profession,
            index,
        })?;
    let index = reader.read_u8()?;
    let game_mode = tables
        .game_mode(index)
        .ok_or(wire::DecodeError::InvalidTableIndex {
            table: TableKind::GameMode,
            index,
        })?;
    Ok((profession, game_mode))
}

/// Fails if any bytes are left.
pub(super) fn ensure_consumed(reader: &ByteReader<'_>) -> CodecResult<()> {
    if !reader.is_empty() {
        return Err(CodecError::TrailingBytes {
            remaining: reader.remaining(),
        });
    }
    Ok(())
}

/// Maps the zero "absent" marker to `None`.
pub(super) const fn nonzero(id: u32) -> Option<u32> {
    if id == 0 {
        None
    } else {
        Some(id)
    }
}

/// Writes an optional ID as a varint, `0` when absent.
pub(super) fn write_id_or_zero(writer: &mut ByteWriter, id: Option<u32>) {
    writer.write_varu32(id.unwrap_or(0));
}

/// Reads a varint where `0` means absent.
pub(super) fn read_id_or_zero(reader: &mut ByteReader<'_>) -> CodecResult<Option<u32>> {
    Ok(nonzero(reader.read_varu32()?))
}

/// Writes a one-byte count.
pub(super) fn write_count(
    writer: &mut ByteWriter,
    field: &'static str,
    count: usize,
) -> CodecResult<()> {
    let byte = u8::try_from(count).map_err(|_| CodecError::invalid(field, count))?;
    writer.write_u8(byte);
    Ok(())
}

/// Reads a one-byte count and checks it against `limit`.
pub(super) fn read_count(
    reader: &mut ByteReader<'_>,
    kind: LimitKind,
    limit: usize,
) -> CodecResult<usize> {
    let count = usize::from(reader.read_u8()?);
    CodecError::check_limit(kind, limit, count)?;
    Ok(count)
}

/// Resolves a stat name, warning if the table lacks it.
pub(super) fn stat_entry(
    tables: &WireTables,
    slot: Option<Slot>,
    stat: &str,
    warnings: &mut Warnings,
) -> TableEntry {
    let entry = TableEntry::resolve(tables.stats(), stat);
    if entry.is_unknown() {
        warnings.push(FallbackWarning::UnknownStat {
            slot,
            stat: stat.to_owned(),
        });
    }
    entry
}

/// Resolves a weapon type, warning if the table lacks it.
pub(super) fn weapon_entry(
    slot: Slot,
    weapon: &str,
    warnings: &mut Warnings,
) -> TableEntry {
    let entry = TableEntry::resolve(&wire::WEAPONS, weapon);
    if entry.is_unknown() {
        warnings.push(FallbackWarning::UnknownWeapon {
            slot,
            weapon: weapon.to_owned(),
        });
    }
    entry
}

/// Turns a decoded stat entry back into a name.
pub(super) fn stat_name(tables: &WireTables, entry: TableEntry) -> CodecResult<String> {
    match entry {
        TableEntry::Known(index) => {
            Ok(known_name(tables.stats(), TableKind::Stat, index)?.to_owned())
        }
        TableEntry::Unknown(name) => Ok(name),
    }
}

/// Turns a decoded weapon entry back into a name.
pub(super) fn weapon_name(entry: TableEntry) -> CodecResult<String> {
    match entry {
        TableEntry::Known(index) => {
            Ok(known_name(&wire::WEAPONS, TableKind::Weapon, index)?.to_owned())
        }
        TableEntry::Unknown(name) => Ok(name),
    }
}

/// Warns when the build's mechanics cannot be carried by `version`.
pub(super) fn drop_mechanics(build: &Build, version: WireVersion, warnings: &mut Warnings) {
    if !build.mechanics.is_empty() {
        warnings.push(FallbackWarning::MechanicsDropped {
            profession: build.mechanics.profession().unwrap_or(build.profession),
            version,
        });
    }
}

/// Writes heal, three utilities and elite as five varints.
pub(super) fn write_skills_fixed(writer: &mut ByteWriter, skills: &Skills) {
    for skill in skills.to_array() {
        write_id_or_zero(writer, skill);
    }
}

pub(super) fn read_skills_fixed(reader: &mut ByteReader<'_>) -> CodecResult<Skills> {
    let mut skills = [None; 5];
    for skill in &mut skills {
        *skill = read_id_or_zero(reader)?;
    }
    Ok(Skills::from_array(skills))
}

/// Writes trait lines with raw trait IDs.
pub(super) fn write_trait_lines_fixed(
    writer: &mut ByteWriter,
    specializations: &[SpecializationChoice],
) -> CodecResult<()> {
    write_count(writer, "specialization count", specializations.len())?;
    for spec in specializations {
        writer.write_varu32(spec.id);
        for choice in spec.traits {
            write_id_or_zero(writer, choice);
        }
    }
    Ok(())
}

pub(super) fn read_trait_lines_fixed(
    reader: &mut ByteReader<'_>,
    limits: &CodecLimits,
) -> CodecResult<Vec<SpecializationChoice>> {
    let count = read_count(reader, LimitKind::Specializations, limits.max_specializations)?;
    let mut specializations = Vec::with_capacity(count);
    for _ in 0..count {
        let id = reader.read_varu32()?;
        let mut traits = [None; 3];
        for choice in &mut traits {
            *choice = read_id_or_zero(reader)?;
        }
        specializations.push(SpecializationChoice::new(id, traits));
    }
    Ok(specializations)
}

/// Writes an entry's infusions as a count and that many varints.
pub(super) fn write_infusions_inline(writer: &mut ByteWriter, entry: &Equipment) {
    let ids: Vec<u32> = entry.infusion_ids().collect();
    // At most three, so the count always fits.
    writer.write_u8(ids.len() as u8);
    for id in ids {
        writer.write_varu32(id);
    }
}

pub(super) fn read_infusions_inline(reader: &mut ByteReader<'_>) -> CodecResult<[Option<u32>; 3]> {
    let count = reader.read_u8()?;
    if count > 3 {
        return Err(CodecError::invalid("infusion count", count));
    }
    let mut infusions = [None; 3];
    for infusion in infusions.iter_mut().take(usize::from(count)) {
        *infusion = Some(reader.read_varu32()?);
    }
    Ok(infusions)
}
