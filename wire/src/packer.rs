//! Slot+stat packing.
//!
//! A slot and a known stat share two bytes:
//!
//! ```text
//! byte 1: [ stat 5..4 | 0 0 | slot 3..0 ]
//! byte 2: [ stat 3..0 | 0 0 0 0 ]
//! ```
//!
//! A stat the table lacks is written as the raw slot byte, [`ESCAPE`] and a
//! length-prefixed name. The second byte of the packed form is at most
//! `0xF0`, so a reader can tell the two forms apart by peeking.

use bitstream::{ByteReader, ByteWriter};

use crate::entry::{TableEntry, ESCAPE};
use crate::error::{DecodeError, EncodeError, TableKind, WireResult};
use crate::tables::{Slot, MAX_STATS, SLOTS};

/// Packs a slot index and a stat index into two bytes.
pub fn pack_slot_stat(slot: u8, stat: u8) -> Result<[u8; 2], EncodeError> {
    if usize::from(slot) >= SLOTS.len() {
        return Err(EncodeError::IndexOutOfRange {
            table: TableKind::Slot,
            index: usize::from(slot),
        });
    }
    if usize::from(stat) >= MAX_STATS {
        return Err(EncodeError::IndexOutOfRange {
            table: TableKind::Stat,
            index: usize::from(stat),
        });
    }
    let first = slot | ((stat >> 4) & 0x03) << 6;
    let second = (stat & 0x0F) << 4;
    Ok([first, second])
}

/// Unpacks two bytes written by [`pack_slot_stat`] into `(slot, stat)`.
///
/// Bits outside the two fields must be zero.
pub fn unpack_slot_stat(bytes: [u8; 2]) -> WireResult<(u8, u8)> {
    let [first, second] = bytes;
    if first & 0x30 != 0 || second & 0x0F != 0 {
        return Err(DecodeError::InvalidSlotStat { first, second });
    }
    let slot = first & 0x0F;
    let stat = ((first >> 6) << 4) | (second >> 4);
    Ok((slot, stat))
}

/// Writes a slot and its stat, packed when the stat is known.
pub fn write_slot_stat(
    writer: &mut ByteWriter,
    slot: Slot,
    stat: &TableEntry,
) -> Result<(), EncodeError> {
    match stat {
        TableEntry::Known(index) => {
            let packed = pack_slot_stat(slot.index(), *index)?;
            writer.write_bytes(&packed);
        }
        TableEntry::Unknown(name) => {
            writer.write_u8(slot.index());
            writer.write_u8(ESCAPE);
            writer.write_str(name)?;
        }
    }
    Ok(())
}

/// Reads a slot and stat written by [`write_slot_stat`].
///
/// A known stat index is returned as-is; checking it against the version's
/// stat table is the caller's job.
pub fn read_slot_stat(
    reader: &mut ByteReader<'_>,
    max_len: usize,
) -> WireResult<(Slot, TableEntry)> {
    let first = reader.read_u8()?;
    // An empty stream here is a truncation, reported by the read below.
    if reader.peek_u8() == Some(ESCAPE) {
        reader.read_u8()?;
        let slot = slot_at(first)?;
        let name = reader.read_str(max_len)?;
        return Ok((slot, TableEntry::Unknown(name)));
    }
    let second = reader.read_u8()?;
    let (slot, stat) = unpack_slot_stat([first, second])?;
    Ok((slot_at(slot)?, TableEntry::Known(stat)))
}

fn slot_at(index: u8) -> WireResult<Slot> {
    SLOTS
        .get(usize::from(index))
        .copied()
        .ok_or(DecodeError::InvalidTableIndex {
            table: TableKind::Slot,
            index,
        })
}
