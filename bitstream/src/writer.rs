//! Byte-level writer for encoding build payloads.

use crate::error::{StreamError, StreamResult};
use crate::flags::{Flags, MAX_FLAGS};

/// A growable writer for byte-aligned build payloads.
///
/// Writes are accumulated in an internal buffer. Call [`finish`](Self::finish)
/// to get the final byte buffer.
#[derive(Debug, Default)]
pub struct ByteWriter {
    bytes: Vec<u8>,
}

impl ByteWriter {
    /// Creates a new empty `ByteWriter`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new `ByteWriter` with pre-allocated capacity.
    #[must_use]
    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(bytes),
        }
    }

    /// Returns the number of bytes written so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` if nothing has been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Writes a single byte.
    pub fn write_u8(&mut self, value: u8) {
        self.bytes.push(value);
    }

    /// Writes raw bytes.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.bytes.extend_from_slice(bytes);
    }

    /// Writes a varint: 7-bit groups, least significant first, high bit set
    /// on every byte except the last. Zero is a single zero byte.
    pub fn write_varu32(&mut self, mut value: u32) {
        loop {
            let mut byte = (value & 0x7F) as u8;
            value >>= 7;
            if value != 0 {
                byte |= 0x80;
            }
            self.bytes.push(byte);
            if value == 0 {
                break;
            }
        }
    }

    /// Writes a varint from a wider integer.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::ValueOutOfRange`] if `value` exceeds `u32::MAX`.
    pub fn write_varu64(&mut self, value: u64) -> StreamResult<()> {
        let value = u32::try_from(value).map_err(|_| StreamError::ValueOutOfRange { value })?;
        self.write_varu32(value);
        Ok(())
    }

    /// Writes `count` flags as one byte (up to 8) or two bytes (low byte first).
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::InvalidFlagCount`] if `count > 16`.
    pub fn write_flags(&mut self, flags: Flags, count: usize) -> StreamResult<()> {
        if count > MAX_FLAGS {
            return Err(StreamError::InvalidFlagCount {
                count,
                max: MAX_FLAGS,
            });
        }
        let [low, high] = flags.raw().to_le_bytes();
        self.bytes.push(low);
        if Flags::byte_len(count) == 2 {
            self.bytes.push(high);
        }
        Ok(())
    }

    /// Writes a length-prefixed UTF-8 string. An empty string is a single
    /// zero byte.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::ValueOutOfRange`] if the string is longer than
    /// `u32::MAX` bytes.
    pub fn write_str(&mut self, value: &str) -> StreamResult<()> {
        self.write_varu64(value.len() as u64)?;
        self.bytes.extend_from_slice(value.as_bytes());
        Ok(())
    }

    /// Finishes writing and returns the byte buffer.
    #[must_use]
    pub fn finish(self) -> Vec<u8> {
        self.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_writer() {
        let writer = ByteWriter::new();
        assert_eq!(writer.len(), 0);
        assert!(writer.is_empty());
        assert!(writer.finish().is_empty());
    }

    #[test]
    fn varint_zero_is_single_byte() {
        let mut writer = ByteWriter::new();
        writer.write_varu32(0);
        assert_eq!(writer.finish(), vec![0x00]);
    }

    #[test]
    fn varint_single_group() {
        let mut writer = ByteWriter::new();
        writer.write_varu32(127);
        assert_eq!(writer.finish(), vec![0x7F]);
    }

    #[test]
    fn varint_multi_group() {
        let mut writer = ByteWriter::new();
        writer.write_varu32(300);
        assert_eq!(writer.finish(), vec![0xAC, 0x02]);
    }

    #[test]
    fn varint_max() {
        let mut writer = ByteWriter::new();
        writer.write_varu32(u32::MAX);
        assert_eq!(writer.finish(), vec![0xFF, 0xFF, 0xFF, 0xFF, 0x0F]);
    }

    #[test]
    fn varu64_out_of_range() {
        let mut writer = ByteWriter::new();
        let err = writer.write_varu64(u64::from(u32::MAX) + 1).unwrap_err();
        assert!(matches!(err, StreamError::ValueOutOfRange { .. }));
    }

    #[test]
    fn flags_single_byte() {
        let mut writer = ByteWriter::new();
        let flags = Flags::new().with(0, true).with(7, true);
        writer.write_flags(flags, 8).unwrap();
        assert_eq!(writer.finish(), vec![0b1000_0001]);
    }

    #[test]
    fn flags_two_bytes_low_first() {
        let mut writer = ByteWriter::new();
        let flags = Flags::new().with(1, true).with(9, true);
        writer.write_flags(flags, 10).unwrap();
        assert_eq!(writer.finish(), vec![0b0000_0010, 0b0000_0010]);
    }

    #[test]
    fn flags_too_many() {
        let mut writer = ByteWriter::new();
        let err = writer.write_flags(Flags::new(), 17).unwrap_err();
        assert!(matches!(
            err,
            StreamError::InvalidFlagCount { count: 17, max: 16 }
        ));
    }

    #[test]
    fn string_is_length_prefixed() {
        let mut writer = ByteWriter::new();
        writer.write_str("Minstrel").unwrap();
        let bytes = writer.finish();
        assert_eq!(bytes[0], 8);
        assert_eq!(&bytes[1..], b"Minstrel");
    }

    #[test]
    fn empty_string_is_zero_byte() {
        let mut writer = ByteWriter::new();
        writer.write_str("").unwrap();
        assert_eq!(writer.finish(), vec![0x00]);
    }
}
