//! Legacy layout: the whole build as a JSON object, without a tag byte.
//!
//! Equipment infusions are kept per entry. Profession mechanics did not exist
//! when this layout was in use and are dropped on encode.

use serde::{Deserialize, Serialize};
use wire::{GameMode, Profession, Slot, WireVersion};

use super::common::{drop_mechanics, nonzero};
use crate::equipment::{ordered_equipment, SlotTable};
use crate::error::{CodecError, CodecResult, LimitKind};
use crate::limits::CodecLimits;
use crate::report::Warnings;
use crate::types::{
    Build, Equipment, ProfessionMechanics, Skills, SpecializationChoice, FALLBACK_STAT,
};

const VERSION: WireVersion = WireVersion::LegacyJson;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyBuild {
    profession: String,
    #[serde(default)]
    game_mode: Option<String>,
    #[serde(default)]
    equipment: Vec<LegacyEquipment>,
    #[serde(default)]
    skills: LegacySkills,
    #[serde(default)]
    traits: Vec<LegacyTraitLine>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    rune_id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    relic_id: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyEquipment {
    slot: String,
    stat: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    weapon_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sigil1_id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sigil2_id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    infusion1_id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    infusion2_id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    infusion3_id: Option<u32>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacySkills {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    heal: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    utility1: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    utility2: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    utility3: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    elite: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyTraitLine {
    specialization_id: u32,
    #[serde(default)]
    choices: [Option<u32>; 3],
}

pub(crate) fn encode(build: &Build, warnings: &mut Warnings) -> CodecResult<Vec<u8>> {
    let equipment = ordered_equipment(build)?
        .into_iter()
        .map(|entry| LegacyEquipment {
            slot: entry.slot.name().to_owned(),
            stat: entry.stat.clone(),
            weapon_type: entry.weapon_type.clone(),
            sigil1_id: entry.sigil1_id,
            sigil2_id: entry.sigil2_id,
            infusion1_id: entry.infusions[0],
            infusion2_id: entry.infusions[1],
            infusion3_id: entry.infusions[2],
        })
        .collect();
    let skills = &build.skills;
    let legacy = LegacyBuild {
        profession: build.profession.name().to_owned(),
        game_mode: Some(build.game_mode.name().to_owned()),
        equipment,
        skills: LegacySkills {
            heal: skills.heal,
            utility1: skills.utilities[0],
            utility2: skills.utilities[1],
            utility3: skills.utilities[2],
            elite: skills.elite,
        },
        traits: build
            .specializations
            .iter()
            .map(|spec| LegacyTraitLine {
                specialization_id: spec.id,
                choices: spec.traits,
            })
            .collect(),
        rune_id: build.rune_id,
        relic_id: build.relic_id,
    };
    drop_mechanics(build, VERSION, warnings);
    serde_json::to_vec(&legacy).map_err(|err| CodecError::LegacyJson {
        message: err.to_string(),
    })
}

pub(crate) fn decode(bytes: &[u8], limits: &CodecLimits) -> CodecResult<Build> {
    let legacy: LegacyBuild =
        serde_json::from_slice(bytes).map_err(|err| CodecError::LegacyJson {
            message: err.to_string(),
        })?;
    CodecError::check_limit(
        LimitKind::EquipmentEntries,
        limits.max_equipment_entries,
        legacy.equipment.len(),
    )?;
    CodecError::check_limit(
        LimitKind::Specializations,
        limits.max_specializations,
        legacy.traits.len(),
    )?;

    let profession = Profession::from_name(&legacy.profession)
        .ok_or_else(|| CodecError::invalid("profession", &legacy.profession))?;
    let game_mode = match legacy.game_mode.as_deref() {
        None => GameMode::default(),
        Some(name) => {
            GameMode::from_name(name).ok_or_else(|| CodecError::invalid("game mode", name))?
        }
    };

    let mut slots = SlotTable::default();
    for entry in legacy.equipment {
        let slot =
            Slot::from_name(&entry.slot).ok_or_else(|| CodecError::invalid("slot", &entry.slot))?;
        let mut decoded = Equipment::new(slot, entry.stat)
            .sigils(entry.sigil1_id.and_then(nonzero), entry.sigil2_id.and_then(nonzero))
            .infusions(compact([
                entry.infusion1_id,
                entry.infusion2_id,
                entry.infusion3_id,
            ]));
        decoded.weapon_type = entry.weapon_type.filter(|weapon| !weapon.is_empty());
        slots.insert(decoded)?;
    }

    let skills = legacy.skills;
    let build = Build {
        profession,
        game_mode,
        equipment: slots.complete(FALLBACK_STAT),
        skills: Skills::from_array([
            skills.heal,
            skills.utility1,
            skills.utility2,
            skills.utility3,
            skills.elite,
        ]),
        specializations: legacy
            .traits
            .into_iter()
            .map(|line| SpecializationChoice::new(line.specialization_id, line.choices))
            .collect(),
        rune_id: legacy.rune_id.and_then(nonzero),
        relic_id: legacy.relic_id.and_then(nonzero),
        mechanics: ProfessionMechanics::None,
    };
    limits.check_build(&build)?;
    Ok(build)
}

/// Moves present infusions to the front, dropping zero IDs.
fn compact(infusions: [Option<u32>; 3]) -> [Option<u32>; 3] {
    let mut out = [None; 3];
    for (slot, id) in out
        .iter_mut()
        .zip(infusions.into_iter().flatten().filter(|id| *id != 0))
    {
        *slot = Some(id);
    }
    out
}
