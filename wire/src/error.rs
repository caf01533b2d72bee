//! Error types for wire format operations.

use std::fmt;

use bitstream::StreamError;

/// Result type for wire decoding operations.
pub type WireResult<T> = Result<T, DecodeError>;

/// Errors that can occur while decoding wire values.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DecodeError {
    /// Underlying byte stream error (truncation, bad varint, bad string).
    Stream(StreamError),

    /// An index does not exist in the frozen table for this version.
    InvalidTableIndex { table: TableKind, index: u8 },

    /// Slot+stat bytes carry bits outside their fields.
    InvalidSlotStat { first: u8, second: u8 },
}

/// The frozen table an index refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    Profession,
    GameMode,
    Slot,
    Stat,
    Weapon,
    Legend,
}

/// Errors that can occur during encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// Underlying byte stream error.
    Stream(StreamError),

    /// An index does not fit the field it is packed into.
    IndexOutOfRange { table: TableKind, index: usize },
}

/// Errors from the compression and text-encoding layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The code is empty after trimming.
    EmptyCode,

    /// The code is longer than the configured limit.
    CodeTooLong { len: usize, limit: usize },

    /// The code is not valid base64.
    InvalidBase64 { message: String },

    /// The compressed stream is corrupt or truncated.
    Inflate { message: String },

    /// The inflated payload exceeds the configured limit.
    PayloadTooLarge { limit: usize },

    /// Compression failed.
    Deflate { message: String },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stream(err) => write!(f, "stream error: {err}"),
            Self::InvalidTableIndex { table, index } => {
                write!(f, "invalid {table} index {index}")
            }
            Self::InvalidSlotStat { first, second } => {
                write!(
                    f,
                    "invalid slot+stat packing: 0x{first:02X} 0x{second:02X}"
                )
            }
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Profession => "profession",
            Self::GameMode => "game mode",
            Self::Slot => "slot",
            Self::Stat => "stat",
            Self::Weapon => "weapon",
            Self::Legend => "legend",
        };
        write!(f, "{name}")
    }
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stream(err) => write!(f, "stream error: {err}"),
            Self::IndexOutOfRange { table, index } => {
                write!(f, "{table} index {index} does not fit its wire field")
            }
        }
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyCode => write!(f, "build code is empty"),
            Self::CodeTooLong { len, limit } => {
                write!(f, "build code of {len} characters exceeds limit of {limit}")
            }
            Self::InvalidBase64 { message } => write!(f, "invalid base64: {message}"),
            Self::Inflate { message } => write!(f, "corrupt compressed payload: {message}"),
            Self::PayloadTooLarge { limit } => {
                write!(f, "inflated payload exceeds limit of {limit} bytes")
            }
            Self::Deflate { message } => write!(f, "compression failed: {message}"),
        }
    }
}

impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Stream(e) => Some(e),
            _ => None,
        }
    }
}

impl std::error::Error for EncodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Stream(e) => Some(e),
            Self::IndexOutOfRange { .. } => None,
        }
    }
}

impl std::error::Error for TransportError {}

impl From<StreamError> for DecodeError {
    fn from(err: StreamError) -> Self {
        Self::Stream(err)
    }
}

impl From<StreamError> for EncodeError {
    fn from(err: StreamError) -> Self {
        Self::Stream(err)
    }
}
