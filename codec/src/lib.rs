//! Versioned encoding and decoding of shareable build codes.
//!
//! This crate ties together `bitstream`, `wire` and `catalog` into the full
//! build codec: a [`Build`] goes in, a URL-safe code comes out, and any code
//! written by any released version decodes back to a [`Build`].
//!
//! # Features
//!
//! - Six frozen layouts (legacy JSON and binary v2..v6), each with its own
//!   decoder; new codes are always written as [`WireVersion::CURRENT`]
//! - Sparse equipment with a build-wide default stat
//! - Trait choices stored as tier positions through a [`SpecializationCatalog`]
//! - Pooled infusions redistributed in slot order
//! - Fallbacks reported as [`FallbackWarning`]s instead of failing
//!
//! # Design Principles
//!
//! - **Frozen layouts** - A released version's decoder never changes.
//! - **Fail loudly** - Malformed input is an error, never a partial build.
//! - **Deterministic** - The same build always yields the same code.

mod dispatch;
mod equipment;
mod error;
mod format;
mod limits;
mod report;
mod slug;
mod types;

pub use catalog::SpecializationCatalog;
pub use dispatch::{
    decode_build, decode_payload, decode_payload_as, detect_version, encode_build,
    encode_build_as, encode_payload,
};
pub use equipment::{
    default_stat, distribute_infusions, infusion_capacity, is_implied, pool_infusions,
    InfusionGroup, DEFAULT_STAT_THRESHOLD,
};
pub use error::{CodecError, CodecResult, LimitKind};
pub use limits::CodecLimits;
pub use report::{DecodeReport, EncodeReport, EncodedPayload, FallbackWarning};
pub use slug::build_slug;
pub use types::{
    Build, Equipment, ProfessionMechanics, Skills, SpecializationChoice, FALLBACK_STAT,
    TWO_HANDED_WEAPONS,
};
pub use wire::{GameMode, Legend, Limits as WireLimits, Profession, Slot, WireVersion, SLOTS};
