//! Error types for byte stream operations.

use std::fmt;

/// Result type for byte stream operations.
pub type StreamResult<T> = Result<T, StreamError>;

/// Errors that can occur during byte-level encoding/decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamError {
    /// Attempted to read past the end of the buffer.
    UnexpectedEof {
        /// Number of bytes requested.
        requested: usize,
        /// Number of bytes available.
        available: usize,
    },

    /// A varint ran longer than five bytes or overflowed 32 bits.
    InvalidVarint,

    /// Too many flags for a one- or two-byte flag field.
    InvalidFlagCount {
        /// The flag count provided.
        count: usize,
        /// Maximum allowed flag count.
        max: usize,
    },

    /// A length-prefixed string exceeded the caller's limit.
    StringTooLong {
        /// Declared string length in bytes.
        len: usize,
        /// Maximum allowed length in bytes.
        max: usize,
    },

    /// A length-prefixed string was not valid UTF-8.
    InvalidUtf8 {
        /// Byte offset of the string body.
        position: usize,
    },

    /// Value does not fit in the 32-bit varint range.
    ValueOutOfRange {
        /// The value that was out of range.
        value: u64,
    },
}

impl fmt::Display for StreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedEof {
                requested,
                available,
            } => {
                write!(
                    f,
                    "attempted to read {requested} bytes but only {available} bytes available"
                )
            }
            Self::InvalidVarint => write!(f, "invalid varint"),
            Self::InvalidFlagCount { count, max } => {
                write!(f, "invalid flag count {count}, maximum allowed is {max}")
            }
            Self::StringTooLong { len, max } => {
                write!(f, "string of {len} bytes exceeds limit of {max} bytes")
            }
            Self::InvalidUtf8 { position } => {
                write!(f, "invalid utf-8 in string at byte {position}")
            }
            Self::ValueOutOfRange { value } => {
                write!(f, "value {value} cannot be represented as a 32-bit varint")
            }
        }
    }
}

impl std::error::Error for StreamError {}
