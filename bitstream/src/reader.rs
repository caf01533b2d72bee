//! Byte-level reader with bounded operations.

use crate::error::{StreamError, StreamResult};
use crate::flags::{Flags, MAX_FLAGS};

const VARINT_MAX_BYTES: usize = 5;

/// A byte-level reader for decoding build payloads.
///
/// All read operations are bounds-checked and return errors on failure.
/// The reader never panics on malformed input.
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    /// Creates a new `ByteReader` from a byte slice.
    #[must_use]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Returns the number of bytes remaining to read.
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    /// Returns `true` if there are no more bytes to read.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Returns the current byte position.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Returns the next byte without consuming it.
    #[must_use]
    pub fn peek_u8(&self) -> Option<u8> {
        self.data.get(self.pos).copied()
    }

    /// Reads a single byte.
    pub fn read_u8(&mut self) -> StreamResult<u8> {
        self.ensure_bytes(1)?;
        let value = self.data[self.pos];
        self.pos += 1;
        Ok(value)
    }

    /// Reads `len` raw bytes.
    pub fn read_bytes(&mut self, len: usize) -> StreamResult<&'a [u8]> {
        self.ensure_bytes(len)?;
        let bytes = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    /// Reads a varint `u32`.
    ///
    /// At most five bytes are consumed; a fifth byte with a continuation bit
    /// or bits above bit 31 is rejected.
    pub fn read_varu32(&mut self) -> StreamResult<u32> {
        let mut result = 0u32;
        for index in 0..VARINT_MAX_BYTES {
            let byte = self.read_u8()?;
            if index == VARINT_MAX_BYTES - 1 && byte > 0x0F {
                return Err(StreamError::InvalidVarint);
            }
            result |= u32::from(byte & 0x7F) << (7 * index);
            if byte & 0x80 == 0 {
                return Ok(result);
            }
        }
        Err(StreamError::InvalidVarint)
    }

    /// Reads `count` flags (one byte for up to 8, two bytes otherwise).
    pub fn read_flags(&mut self, count: usize) -> StreamResult<Flags> {
        if count > MAX_FLAGS {
            return Err(StreamError::InvalidFlagCount {
                count,
                max: MAX_FLAGS,
            });
        }
        let low = self.read_u8()?;
        let high = if Flags::byte_len(count) == 2 {
            self.read_u8()?
        } else {
            0
        };
        Ok(Flags::from_raw(u16::from_le_bytes([low, high])))
    }

    /// Reads a length-prefixed UTF-8 string of at most `max_len` bytes.
    pub fn read_str(&mut self, max_len: usize) -> StreamResult<String> {
        let len = self.read_varu32()? as usize;
        if len > max_len {
            return Err(StreamError::StringTooLong { len, max: max_len });
        }
        let position = self.pos;
        let bytes = self.read_bytes(len)?;
        std::str::from_utf8(bytes)
            .map(str::to_owned)
            .map_err(|_| StreamError::InvalidUtf8 { position })
    }

    fn ensure_bytes(&self, bytes: usize) -> StreamResult<()> {
        let available = self.remaining();
        if bytes > available {
            return Err(StreamError::UnexpectedEof {
                requested: bytes,
                available,
            });
        }
        Ok(())
    }
}
