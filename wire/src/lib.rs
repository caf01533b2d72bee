//! Wire vocabulary and URL transport for the buildlink codec.
//!
//! This crate owns everything about the byte layout that is not a whole
//! build: version tags, the frozen enumeration tables, the table-entry escape,
//! slot+stat packing, and the compression/base64 wrapper that turns a payload
//! into a URL-safe code. It does not know what a build is.
//!
//! # Design Principles
//!
//! - **Frozen tables** - Table indices are append-only; a released index never changes.
//! - **Explicit escapes** - A value missing from a table is a
//!   [`TableEntry::Unknown`], not a magic byte.
//! - **Bounded decoding** - Code length and inflated size are checked against [`Limits`].

mod entry;
mod error;
mod limits;
mod packer;
mod tables;
mod transport;
mod version;

pub use entry::{
    known_name, read_entry, read_optional_entry, write_entry, write_optional_entry, TableEntry,
    ESCAPE,
};
pub use error::{DecodeError, EncodeError, TableKind, TransportError, WireResult};
pub use limits::Limits;
pub use packer::{pack_slot_stat, read_slot_stat, unpack_slot_stat, write_slot_stat};
pub use tables::{
    GameMode, Legend, Profession, Slot, WireTables, GAME_MODES, LEGENDS, MAX_STATS, PROFESSIONS,
    SLOTS, STATS, WEAPONS,
};
pub use transport::{
    compress, decode_base64, decode_transport, encode_base64, encode_transport, inflate,
};
pub use version::{ParseVersionError, WireVersion, LEGACY_JSON_LEAD};
