//! Version 4: the v3 body followed by the Elementalist familiar.
//!
//! ```text
//! <v3 body, tag=4>
//! varint familiar (0 = none)
//! ```

use bitstream::{ByteReader, ByteWriter};
use wire::{Profession, WireVersion};

use super::common::{drop_mechanics, ensure_consumed, read_id_or_zero, write_id_or_zero};
use super::v3::{read_body, write_body};
use crate::error::CodecResult;
use crate::limits::CodecLimits;
use crate::report::Warnings;
use crate::types::{Build, ProfessionMechanics};

const VERSION: WireVersion = WireVersion::V4;

pub(crate) fn encode(build: &Build, warnings: &mut Warnings) -> CodecResult<Vec<u8>> {
    let mut writer = ByteWriter::with_capacity(128);
    write_body(&mut writer, VERSION, build, warnings)?;
    match build.mechanics.for_profession(build.profession) {
        Some(ProfessionMechanics::Elementalist { familiar }) => {
            write_id_or_zero(&mut writer, *familiar);
        }
        _ => {
            writer.write_varu32(0);
            drop_mechanics(build, VERSION, warnings);
        }
    }
    Ok(writer.finish())
}

pub(crate) fn decode(bytes: &[u8], limits: &CodecLimits) -> CodecResult<Build> {
    let mut reader = ByteReader::new(bytes);
    let mut build = read_body(&mut reader, VERSION, limits)?;
    let familiar = read_id_or_zero(&mut reader)?;
    ensure_consumed(&reader)?;

    if familiar.is_some() {
        if build.profession == Profession::Elementalist {
            build.mechanics = ProfessionMechanics::Elementalist { familiar };
        } else {
            tracing::trace!(profession = %build.profession, "ignoring familiar");
        }
    }
    Ok(build)
}
