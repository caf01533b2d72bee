//! Version 6: the current layout.
//!
//! ```text
//! u8 tag=6, u8 profession, u8 game mode, flags(8) sections
//! [DEFAULT_STAT]    entry
//! [EQUIPMENT]       u8 count, count x { slot+stat, flags(3) { WEAPON, SIGIL1, SIGIL2 },
//!                                       [WEAPON] entry, [SIGIL1] varint, [SIGIL2] varint }
//! [SKILLS]          flags(5), varint per set skill
//! [SPECIALIZATIONS] u8 count, count x { varint spec, u8 p0 | p1 << 2 | p2 << 4 }
//! [RUNE]            varint
//! [RELIC]           varint
//! [MECHANICS]       profession-specific
//! [INFUSIONS]       u8 count, count x { u8 n, varint id }
//! ```
//!
//! Only entries that differ from the default stat or carry a weapon or sigil
//! are written. Trait choices are stored as their position within the tier
//! (3 = none) and resolved through the specialization catalog. Infusions are
//! pooled by item ID and handed back out in slot order on decode.

use bitstream::{ByteReader, ByteWriter, Flags};
use catalog::SpecializationCatalog;
use wire::{
    read_entry, read_slot_stat, write_entry, write_slot_stat, Legend, Profession, TableKind,
    WireTables, WireVersion,
};

use super::common::{
    drop_mechanics, ensure_consumed, expect_tag, read_count, read_header, stat_entry, stat_name,
    weapon_entry, weapon_name, write_count, write_header,
};
use crate::equipment::{
    default_stat, distribute_infusions, infusion_capacity, is_implied, ordered_equipment,
    pool_infusions, InfusionGroup, SlotTable,
};
use crate::error::{CodecError, CodecResult, LimitKind};
use crate::limits::CodecLimits;
use crate::report::{FallbackWarning, Warnings};
use crate::types::{
    Build, Equipment, ProfessionMechanics, Skills, SpecializationChoice, FALLBACK_STAT,
};

const VERSION: WireVersion = WireVersion::V6;

const SECTION_COUNT: usize = 8;
const EQUIPMENT: usize = 0;
const DEFAULT_STAT: usize = 1;
const SKILLS: usize = 2;
const SPECIALIZATIONS: usize = 3;
const RUNE: usize = 4;
const RELIC: usize = 5;
const MECHANICS: usize = 6;
const INFUSIONS: usize = 7;

const ENTRY_FIELDS: usize = 3;
const WEAPON: usize = 0;
const SIGIL1: usize = 1;
const SIGIL2: usize = 2;

/// Trait position meaning "no trait chosen in this tier".
const NO_TRAIT: u8 = 3;

pub(crate) fn encode(
    build: &Build,
    catalog: &SpecializationCatalog,
    warnings: &mut Warnings,
) -> CodecResult<Vec<u8>> {
    let tables = WireTables::for_version(VERSION);
    let equipment = ordered_equipment(build)?;
    let default = default_stat(build);
    let explicit: Vec<&Equipment> = equipment
        .into_iter()
        .filter(|entry| !is_implied(entry, default))
        .collect();
    let skills = build.skills.to_array();
    let mechanics = build.mechanics.for_profession(build.profession);
    let infusions = pool_infusions(build);

    let mut sections = Flags::new();
    sections.set(EQUIPMENT, !explicit.is_empty());
    sections.set(DEFAULT_STAT, default != FALLBACK_STAT);
    sections.set(SKILLS, skills.iter().any(Option::is_some));
    sections.set(SPECIALIZATIONS, !build.specializations.is_empty());
    sections.set(RUNE, build.rune_id.is_some());
    sections.set(RELIC, build.relic_id.is_some());
    sections.set(MECHANICS, mechanics.is_some());
    sections.set(INFUSIONS, !infusions.is_empty());

    let mut writer = ByteWriter::with_capacity(64);
    write_header(&mut writer, VERSION, build);
    writer.write_flags(sections, SECTION_COUNT)?;

    if sections.get(DEFAULT_STAT) {
        let entry = stat_entry(&tables, None, default, warnings);
        write_entry(&mut writer, &entry, TableKind::Stat)?;
    }
    if sections.get(EQUIPMENT) {
        tracing::trace!(entries = explicit.len(), default, "equipment section");
        write_count(&mut writer, "equipment count", explicit.len())?;
        for entry in explicit {
            write_equipment(&mut writer, &tables, entry, warnings)?;
        }
    }
    if sections.get(SKILLS) {
        let present: Vec<bool> = skills.iter().map(Option::is_some).collect();
        writer.write_flags(Flags::from_bools(&present), skills.len())?;
        for skill in skills.into_iter().flatten() {
            writer.write_varu32(skill);
        }
    }
    if sections.get(SPECIALIZATIONS) {
        write_count(
            &mut writer,
            "specialization count",
            build.specializations.len(),
        )?;
        for spec in &build.specializations {
            writer.write_varu32(spec.id);
            writer.write_u8(trait_positions(spec, catalog, warnings)?);
        }
    }
    if let Some(rune) = build.rune_id {
        writer.write_varu32(rune);
    }
    if let Some(relic) = build.relic_id {
        writer.write_varu32(relic);
    }
    match mechanics {
        Some(mechanics) => write_mechanics(&mut writer, mechanics)?,
        None => drop_mechanics(build, VERSION, warnings),
    }
    if sections.get(INFUSIONS) {
        let total: usize = infusions.iter().map(|group| group.count).sum();
        let capacity = infusion_capacity(build);
        if total > capacity {
            warnings.push(FallbackWarning::InfusionOverflow {
                dropped: total - capacity,
            });
        }
        write_count(&mut writer, "infusion group count", infusions.len())?;
        for group in &infusions {
            write_count(&mut writer, "infusion count", group.count)?;
            writer.write_varu32(group.id);
        }
    }

    Ok(writer.finish())
}

pub(crate) fn decode(
    bytes: &[u8],
    catalog: &SpecializationCatalog,
    limits: &CodecLimits,
    warnings: &mut Warnings,
) -> CodecResult<Build> {
    let tables = WireTables::for_version(VERSION);
    let mut reader = ByteReader::new(bytes);
    expect_tag(&mut reader, VERSION)?;
    let (profession, game_mode) = read_header(&mut reader, &tables)?;
    let sections = reader.read_flags(SECTION_COUNT)?;

    let default = if sections.get(DEFAULT_STAT) {
        let entry = read_entry(&mut reader, limits.max_string_len)?;
        stat_name(&tables, entry)?
    } else {
        FALLBACK_STAT.to_owned()
    };

    let mut slots = SlotTable::default();
    if sections.get(EQUIPMENT) {
        let count = read_count(
            &mut reader,
            LimitKind::EquipmentEntries,
            limits.max_equipment_entries,
        )?;
        for _ in 0..count {
            slots.insert(read_equipment(&mut reader, &tables, limits)?)?;
        }
    }

    let skills = if sections.get(SKILLS) {
        let present = reader.read_flags(5)?;
        let mut skills = [None; 5];
        for (index, skill) in skills.iter_mut().enumerate() {
            if present.get(index) {
                *skill = Some(reader.read_varu32()?);
            }
        }
        Skills::from_array(skills)
    } else {
        Skills::default()
    };

    let mut specializations = Vec::new();
    if sections.get(SPECIALIZATIONS) {
        let count = read_count(
            &mut reader,
            LimitKind::Specializations,
            limits.max_specializations,
        )?;
        for _ in 0..count {
            let id = reader.read_varu32()?;
            let positions = reader.read_u8()?;
            specializations.push(resolve_positions(id, positions, catalog)?);
        }
    }

    let rune_id = sections
        .get(RUNE)
        .then(|| reader.read_varu32())
        .transpose()?;
    let relic_id = sections
        .get(RELIC)
        .then(|| reader.read_varu32())
        .transpose()?;

    let mechanics = if sections.get(MECHANICS) {
        read_mechanics(&mut reader, profession, &tables)?
    } else {
        ProfessionMechanics::None
    };

    let mut groups = Vec::new();
    if sections.get(INFUSIONS) {
        let count = read_count(
            &mut reader,
            LimitKind::InfusionGroups,
            limits.max_infusion_groups,
        )?;
        for _ in 0..count {
            let count = usize::from(reader.read_u8()?);
            let id = reader.read_varu32()?;
            groups.push(InfusionGroup { id, count });
        }
    }
    ensure_consumed(&reader)?;

    let mut equipment = slots.complete(&default);
    let dropped = distribute_infusions(&mut equipment, &groups);
    if dropped > 0 {
        warnings.push(FallbackWarning::InfusionOverflow { dropped });
    }

    Ok(Build {
        profession,
        game_mode,
        equipment,
        skills,
        specializations,
        rune_id,
        relic_id,
        mechanics,
    })
}

fn write_equipment(
    writer: &mut ByteWriter,
    tables: &WireTables,
    entry: &Equipment,
    warnings: &mut Warnings,
) -> CodecResult<()> {
    let stat = stat_entry(tables, Some(entry.slot), &entry.stat, warnings);
    write_slot_stat(writer, entry.slot, &stat)?;

    let mut fields = Flags::new();
    fields.set(WEAPON, entry.weapon_type.is_some());
    fields.set(SIGIL1, entry.sigil1_id.is_some());
    fields.set(SIGIL2, entry.sigil2_id.is_some());
    writer.write_flags(fields, ENTRY_FIELDS)?;

    if let Some(weapon) = entry.weapon_type.as_deref() {
        let weapon = weapon_entry(entry.slot, weapon, warnings);
        write_entry(writer, &weapon, TableKind::Weapon)?;
    }
    if let Some(sigil) = entry.sigil1_id {
        writer.write_varu32(sigil);
    }
    if let Some(sigil) = entry.sigil2_id {
        writer.write_varu32(sigil);
    }
    Ok(())
}

fn read_equipment(
    reader: &mut ByteReader<'_>,
    tables: &WireTables,
    limits: &CodecLimits,
) -> CodecResult<Equipment> {
    let (slot, stat) = read_slot_stat(reader, limits.max_string_len)?;
    let mut entry = Equipment::new(slot, stat_name(tables, stat)?);
    let fields = reader.read_flags(ENTRY_FIELDS)?;
    if fields.get(WEAPON) {
        entry.weapon_type = Some(weapon_name(read_entry(reader, limits.max_string_len)?)?);
    }
    if fields.get(SIGIL1) {
        entry.sigil1_id = Some(reader.read_varu32()?);
    }
    if fields.get(SIGIL2) {
        entry.sigil2_id = Some(reader.read_varu32()?);
    }
    Ok(entry)
}

/// Packs a trait line's choices into one byte of 2-bit tier positions.
fn trait_positions(
    spec: &SpecializationChoice,
    catalog: &SpecializationCatalog,
    warnings: &mut Warnings,
) -> CodecResult<u8> {
    if catalog.get(spec.id).is_none() {
        return Err(CodecError::UnknownSpecialization { id: spec.id });
    }
    let mut packed = 0u8;
    for (tier, choice) in (0u8..).zip(spec.traits) {
        let position = match choice {
            None => NO_TRAIT,
            Some(trait_id) => catalog
                .position_in_tier(spec.id, tier, trait_id)
                .unwrap_or_else(|| {
                    warnings.push(FallbackWarning::TraitNotInTier {
                        specialization: spec.id,
                        tier,
                        trait_id,
                    });
                    0
                }),
        };
        packed |= position << (tier * 2);
    }
    Ok(packed)
}

/// Resolves a position byte back into trait IDs.
fn resolve_positions(
    id: u32,
    positions: u8,
    catalog: &SpecializationCatalog,
) -> CodecResult<SpecializationChoice> {
    if catalog.get(id).is_none() {
        return Err(CodecError::UnknownSpecialization { id });
    }
    if positions >> 6 != 0 {
        return Err(CodecError::invalid(
            "trait positions",
            format!("0x{positions:02X}"),
        ));
    }
    let mut traits = [None; 3];
    for (tier, choice) in (0u8..).zip(traits.iter_mut()) {
        let position = (positions >> (tier * 2)) & 0x03;
        if position == NO_TRAIT {
            continue;
        }
        let trait_id = catalog
            .trait_at(id, tier, position)
            .ok_or_else(|| CodecError::invalid("trait position", position))?;
        *choice = Some(trait_id);
    }
    Ok(SpecializationChoice::new(id, traits))
}

fn write_mechanics(writer: &mut ByteWriter, mechanics: &ProfessionMechanics) -> CodecResult<()> {
    match mechanics {
        ProfessionMechanics::None => {}
        ProfessionMechanics::Elementalist { familiar } => {
            writer.write_varu32(familiar.unwrap_or(0));
        }
        ProfessionMechanics::Revenant { legend1, legend2 } => {
            writer.write_u8(legend_byte(*legend1));
            writer.write_u8(legend_byte(*legend2));
        }
        ProfessionMechanics::Engineer { morphs } => write_optional_ids(writer, morphs)?,
        ProfessionMechanics::Ranger { pet1, pet2 } => write_optional_ids(writer, &[*pet1, *pet2])?,
    }
    Ok(())
}

fn read_mechanics(
    reader: &mut ByteReader<'_>,
    profession: Profession,
    tables: &WireTables,
) -> CodecResult<ProfessionMechanics> {
    let mechanics = match profession {
        Profession::Elementalist => ProfessionMechanics::Elementalist {
            familiar: Some(reader.read_varu32()?),
        },
        Profession::Revenant => ProfessionMechanics::Revenant {
            legend1: read_legend(reader, tables)?,
            legend2: read_legend(reader, tables)?,
        },
        Profession::Engineer => {
            let ids = read_optional_ids(reader, 3)?;
            ProfessionMechanics::Engineer {
                morphs: [ids[0], ids[1], ids[2]],
            }
        }
        Profession::Ranger => {
            let ids = read_optional_ids(reader, 2)?;
            ProfessionMechanics::Ranger {
                pet1: ids[0],
                pet2: ids[1],
            }
        }
        other => return Err(CodecError::invalid("mechanics section for", other)),
    };
    Ok(mechanics)
}

fn write_optional_ids(writer: &mut ByteWriter, ids: &[Option<u32>]) -> CodecResult<()> {
    let present: Vec<bool> = ids.iter().map(Option::is_some).collect();
    writer.write_flags(Flags::from_bools(&present), ids.len())?;
    for id in ids.iter().flatten() {
        writer.write_varu32(*id);
    }
    Ok(())
}

fn read_optional_ids(reader: &mut ByteReader<'_>, count: usize) -> CodecResult<Vec<Option<u32>>> {
    let present = reader.read_flags(count)?;
    let mut ids = Vec::with_capacity(count);
    for index in 0..count {
        let id = if present.get(index) {
            Some(reader.read_varu32()?)
        } else {
            None
        };
        ids.push(id);
    }
    Ok(ids)
}

fn legend_byte(legend: Option<Legend>) -> u8 {
    legend.map_or(0, |legend| legend.index() + 1)
}

fn read_legend(reader: &mut ByteReader<'_>, tables: &WireTables) -> CodecResult<Option<Legend>> {
    let byte = reader.read_u8()?;
    if byte == 0 {
        return Ok(None);
    }
    let legend = tables
        .legend(byte - 1)
        .ok_or(wire::DecodeError::InvalidTableIndex {
            table: TableKind::Legend,
            index: byte - 1,
        })?;
    Ok(Some(legend))
}
