//! Error types for codec operations.

use std::fmt;

use bitstream::StreamError;
use wire::{Slot, TransportError, WireVersion};

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors that can occur while encoding or decoding a build.
///
/// Every variant is fatal: no partially decoded build is ever returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// The code is not valid base64 or its compressed stream is corrupt.
    #[error("malformed build code: {0}")]
    MalformedTransport(#[from] TransportError),

    /// The leading byte is no supported version tag and the payload is not legacy JSON.
    #[error("unknown wire version tag 0x{tag:02X}")]
    UnknownVersion { tag: u8 },

    /// A read ran past the end of the payload.
    #[error("payload truncated: needed {requested} more bytes, {available} available")]
    Truncated { requested: usize, available: usize },

    /// The payload violates the wire layout of its version.
    #[error("malformed payload: {0}")]
    Malformed(wire::DecodeError),

    /// A frozen decoder was handed another version's payload.
    #[error("{expected} decoder cannot read a payload tagged 0x{found:02X}")]
    VersionMismatch { expected: WireVersion, found: u8 },

    /// A specialization is missing from the catalog.
    #[error("specialization {id} is not in the catalog")]
    UnknownSpecialization { id: u32 },

    /// Bytes remained after a complete decode.
    #[error("{remaining} trailing bytes after payload")]
    TrailingBytes { remaining: usize },

    /// A count or length exceeds the configured limit.
    #[error("{kind} limit exceeded: {actual} > {limit}")]
    LimitsExceeded {
        kind: LimitKind,
        limit: usize,
        actual: usize,
    },

    /// A field holds a value the build model cannot represent.
    #[error("invalid {field}: {value}")]
    InvalidField { field: &'static str, value: String },

    /// The same equipment slot appears twice.
    #[error("equipment slot {slot} appears more than once")]
    DuplicateSlot { slot: Slot },

    /// The build could not be written in the requested layout.
    #[error("cannot encode build: {0}")]
    Encode(wire::EncodeError),

    /// Legacy JSON serialization failed.
    #[error("legacy JSON: {message}")]
    LegacyJson { message: String },
}

/// Specific limit that was exceeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitKind {
    EquipmentEntries,
    Specializations,
    InfusionGroups,
    StringLength,
}

impl fmt::Display for LimitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::EquipmentEntries => "equipment entries",
            Self::Specializations => "specializations",
            Self::InfusionGroups => "infusion groups",
            Self::StringLength => "string length",
        };
        f.write_str(name)
    }
}

impl From<wire::DecodeError> for CodecError {
    fn from(err: wire::DecodeError) -> Self {
        match err {
            wire::DecodeError::Stream(StreamError::UnexpectedEof {
                requested,
                available,
            }) => Self::Truncated {
                requested,
                available,
            },
            other => Self::Malformed(other),
        }
    }
}

impl From<StreamError> for CodecError {
    fn from(err: StreamError) -> Self {
        wire::DecodeError::Stream(err).into()
    }
}

impl From<wire::EncodeError> for CodecError {
    fn from(err: wire::EncodeError) -> Self {
        Self::Encode(err)
    }
}

impl CodecError {
    pub(crate) fn invalid(field: &'static str, value: impl fmt::Display) -> Self {
        Self::InvalidField {
            field,
            value: value.to_string(),
        }
    }

    pub(crate) fn check_limit(kind: LimitKind, limit: usize, actual: usize) -> CodecResult<()> {
        if actual > limit {
            return Err(Self::LimitsExceeded {
                kind,
                limit,
                actual,
            });
        }
        Ok(())
    }
}
