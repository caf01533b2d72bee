//! Table entries: a frozen-table index with a string escape.

use bitstream::{ByteReader, ByteWriter};

use crate::error::{DecodeError, EncodeError, TableKind, WireResult};

/// Byte that introduces an escaped string in place of a table index.
pub const ESCAPE: u8 = 0xFF;

/// A value that is either a frozen-table index or a name the table lacks.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TableEntry {
    /// Index into the version's frozen table.
    Known(u8),
    /// Name with no table index, carried verbatim.
    Unknown(String),
}

impl TableEntry {
    /// Resolves `name` against `table`, falling back to the escaped form.
    #[must_use]
    pub fn resolve(table: &[&str], name: &str) -> Self {
        table
            .iter()
            .position(|entry| *entry == name)
            .and_then(|index| u8::try_from(index).ok())
            .filter(|index| *index < ESCAPE - 1)
            .map_or_else(|| Self::Unknown(name.to_owned()), Self::Known)
    }

    /// Returns the name this entry stands for.
    ///
    /// Returns `None` if a known index is outside `table`.
    #[must_use]
    pub fn name<'a>(&'a self, table: &[&'static str]) -> Option<&'a str> {
        match self {
            Self::Known(index) => table.get(usize::from(*index)).copied(),
            Self::Unknown(name) => Some(name.as_str()),
        }
    }

    /// Returns `true` for the escaped form.
    #[must_use]
    pub const fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown(_))
    }
}

/// Writes an entry as an index byte, or `ESCAPE` followed by a string.
pub fn write_entry(
    writer: &mut ByteWriter,
    entry: &TableEntry,
    table: TableKind,
) -> Result<(), EncodeError> {
    match entry {
        TableEntry::Known(index) => {
            if *index >= ESCAPE {
                return Err(EncodeError::IndexOutOfRange {
                    table,
                    index: usize::from(*index),
                });
            }
            writer.write_u8(*index);
        }
        TableEntry::Unknown(name) => {
            writer.write_u8(ESCAPE);
            writer.write_str(name)?;
        }
    }
    Ok(())
}

/// Reads an entry written by [`write_entry`].
pub fn read_entry(reader: &mut ByteReader<'_>, max_len: usize) -> WireResult<TableEntry> {
    let byte = reader.read_u8()?;
    if byte == ESCAPE {
        return Ok(TableEntry::Unknown(reader.read_str(max_len)?));
    }
    Ok(TableEntry::Known(byte))
}

/// Writes an optional entry: `0` for absent, index+1, or the escaped form.
pub fn write_optional_entry(
    writer: &mut ByteWriter,
    entry: Option<&TableEntry>,
    table: TableKind,
) -> Result<(), EncodeError> {
    match entry {
        None => writer.write_u8(0),
        Some(TableEntry::Known(index)) => {
            if *index >= ESCAPE - 1 {
                return Err(EncodeError::IndexOutOfRange {
                    table,
                    index: usize::from(*index),
                });
            }
            writer.write_u8(*index + 1);
        }
        Some(unknown @ TableEntry::Unknown(_)) => write_entry(writer, unknown, table)?,
    }
    Ok(())
}

/// Reads an optional entry written by [`write_optional_entry`].
pub fn read_optional_entry(
    reader: &mut ByteReader<'_>,
    max_len: usize,
) -> WireResult<Option<TableEntry>> {
    match reader.read_u8()? {
        0 => Ok(None),
        ESCAPE => Ok(Some(TableEntry::Unknown(reader.read_str(max_len)?))),
        byte => Ok(Some(TableEntry::Known(byte - 1))),
    }
}

/// Looks up a known index in `table`, reporting an out-of-range index.
pub fn known_name(table: &[&'static str], kind: TableKind, index: u8) -> WireResult<&'static str> {
    table
        .get(usize::from(index))
        .copied()
        .ok_or(DecodeError::InvalidTableIndex { table: kind, index })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::WEAPONS;
    use bitstream::StreamError;

    fn write(entry: &TableEntry) -> Vec<u8> {
        let mut writer = ByteWriter::new();
        write_entry(&mut writer, entry, TableKind::Weapon).unwrap();
        writer.finish()
    }

    #[test]
    fn resolve_known_and_unknown() {
        assert_eq!(TableEntry::resolve(&WEAPONS, "Dagger"), TableEntry::Known(1));
        assert_eq!(
            TableEntry::resolve(&WEAPONS, "Rapier"),
            TableEntry::Unknown("Rapier".to_owned())
        );
    }

    #[test]
    fn known_entry_is_one_byte() {
        assert_eq!(write(&TableEntry::Known(5)), vec![5]);
    }

    #[test]
    fn unknown_entry_is_escaped() {
        let bytes = write(&TableEntry::Unknown("Rapier".to_owned()));
        assert_eq!(bytes[0], ESCAPE);
        assert_eq!(bytes[1], 6);
        assert_eq!(&bytes[2..], b"Rapier");

        let mut reader = ByteReader::new(&bytes);
        let entry = read_entry(&mut reader, 64).unwrap();
        assert_eq!(entry, TableEntry::Unknown("Rapier".to_owned()));
        assert!(reader.is_empty());
    }

    #[test]
    fn escape_index_rejected() {
        let mut writer = ByteWriter::new();
        let err =
            write_entry(&mut writer, &TableEntry::Known(ESCAPE), TableKind::Stat).unwrap_err();
        assert!(matches!(err, EncodeError::IndexOutOfRange { index: 255, .. }));
    }

    #[test]
    fn optional_entry_forms() {
        let mut writer = ByteWriter::new();
        write_optional_entry(&mut writer, None, TableKind::Weapon).unwrap();
        write_optional_entry(&mut writer, Some(&TableEntry::Known(0)), TableKind::Weapon).unwrap();
        write_optional_entry(
            &mut writer,
            Some(&TableEntry::Unknown("Rapier".to_owned())),
            TableKind::Weapon,
        )
        .unwrap();
        let bytes = writer.finish();
        assert_eq!(&bytes[..3], &[0, 1, ESCAPE]);

        let mut reader = ByteReader::new(&bytes);
        assert_eq!(read_optional_entry(&mut reader, 64).unwrap(), None);
        assert_eq!(
            read_optional_entry(&mut reader, 64).unwrap(),
            Some(TableEntry::Known(0))
        );
        assert_eq!(
            read_optional_entry(&mut reader, 64).unwrap(),
            Some(TableEntry::Unknown("Rapier".to_owned()))
        );
        assert!(reader.is_empty());
    }

    #[test]
    fn escaped_string_respects_limit() {
        let bytes = write(&TableEntry::Unknown("Rapier".to_owned()));
        let mut reader = ByteReader::new(&bytes);
        let err = read_entry(&mut reader, 3).unwrap_err();
        assert_eq!(
            err,
            DecodeError::Stream(StreamError::StringTooLong { len: 6, max: 3 })
        );
    }

    #[test]
    fn known_name_out_of_range() {
        assert_eq!(known_name(&WEAPONS, TableKind::Weapon, 18), Ok("HarpoonGun"));
        assert_eq!(
            known_name(&WEAPONS, TableKind::Weapon, 19),
            Err(DecodeError::InvalidTableIndex {
                table: TableKind::Weapon,
                index: 19
            })
        );
    }
}
