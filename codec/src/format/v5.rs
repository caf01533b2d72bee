//! Version 5: the v3 body with the v5 stat table, then a mechanics block
//! keyed by profession.
//!
//! ```text
//! <v3 body, tag=5>
//! Elementalist: varint familiar
//! Revenant:     u8 legend1, u8 legend2 (0 = none, else index + 1)
//! Engineer:     3 x varint morph
//! Ranger:       2 x varint pet
//! others:       nothing
//! ```

use bitstream::{ByteReader, ByteWriter};
use wire::{Legend, Profession, TableKind, WireTables, WireVersion};

use super::common::{drop_mechanics, ensure_consumed, read_id_or_zero, write_id_or_zero};
use super::v3::{read_body, write_body};
use crate::error::CodecResult;
use crate::limits::CodecLimits;
use crate::report::Warnings;
use crate::types::{Build, ProfessionMechanics};

const VERSION: WireVersion = WireVersion::V5;

pub(crate) fn encode(build: &Build, warnings: &mut Warnings) -> CodecResult<Vec<u8>> {
    let mut writer = ByteWriter::with_capacity(128);
    write_body(&mut writer, VERSION, build, warnings)?;

    let mechanics = build.mechanics.for_profession(build.profession);
    if mechanics.is_none() {
        drop_mechanics(build, VERSION, warnings);
    }
    match build.profession {
        Profession::Elementalist => {
            let familiar = match mechanics {
                Some(ProfessionMechanics::Elementalist { familiar }) => *familiar,
                _ => None,
            };
            write_id_or_zero(&mut writer, familiar);
        }
        Profession::Revenant => {
            let (legend1, legend2) = match mechanics {
                Some(ProfessionMechanics::Revenant { legend1, legend2 }) => (*legend1, *legend2),
                _ => (None, None),
            };
            writer.write_u8(legend_byte(legend1));
            writer.write_u8(legend_byte(legend2));
        }
        Profession::Engineer => {
            let morphs = match mechanics {
                Some(ProfessionMechanics::Engineer { morphs }) => *morphs,
                _ => [None; 3],
            };
            for morph in morphs {
                write_id_or_zero(&mut writer, morph);
            }
        }
        Profession::Ranger => {
            let (pet1, pet2) = match mechanics {
                Some(ProfessionMechanics::Ranger { pet1, pet2 }) => (*pet1, *pet2),
                _ => (None, None),
            };
            write_id_or_zero(&mut writer, pet1);
            write_id_or_zero(&mut writer, pet2);
        }
        _ => {}
    }
    Ok(writer.finish())
}

pub(crate) fn decode(bytes: &[u8], limits: &CodecLimits) -> CodecResult<Build> {
    let tables = WireTables::for_version(VERSION);
    let mut reader = ByteReader::new(bytes);
    let mut build = read_body(&mut reader, VERSION, limits)?;

    let mechanics = match build.profession {
        Profession::Elementalist => ProfessionMechanics::Elementalist {
            familiar: read_id_or_zero(&mut reader)?,
        },
        Profession::Revenant => ProfessionMechanics::Revenant {
            legend1: read_legend(&mut reader, &tables)?,
            legend2: read_legend(&mut reader, &tables)?,
        },
        Profession::Engineer => ProfessionMechanics::Engineer {
            morphs: [
                read_id_or_zero(&mut reader)?,
                read_id_or_zero(&mut reader)?,
                read_id_or_zero(&mut reader)?,
            ],
        },
        Profession::Ranger => ProfessionMechanics::Ranger {
            pet1: read_id_or_zero(&mut reader)?,
            pet2: read_id_or_zero(&mut reader)?,
        },
        _ => ProfessionMechanics::None,
    };
    ensure_consumed(&reader)?;

    if !mechanics.is_empty() {
        build.mechanics = mechanics;
    }
    Ok(build)
}

fn legend_byte(legend: Option<Legend>) -> u8 {
    legend.map_or(0, |legend| legend.index() + 1)
}

fn read_legend(reader: &mut ByteReader<'_>, tables: &WireTables) -> CodecResult<Option<Legend>> {
    match reader.read_u8()? {
        0 => Ok(None),
        byte => tables
            .legend(byte - 1)
            .map(Some)
            .ok_or_else(|| {
                wire::DecodeError::InvalidTableIndex {
                    table: TableKind::Legend,
                    index: byte - 1,
                }
                .into()
            }),
    }
}
