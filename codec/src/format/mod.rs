//! Frozen wire layouts, one module per version.
//!
//! A layout module is never edited once its version has shipped. New fields go
//! into a new version with its own module.

mod common;
mod legacy;
mod v2;
mod v3;
mod v4;
mod v5;
mod v6;

use catalog::SpecializationCatalog;
use wire::WireVersion;

use crate::error::CodecResult;
use crate::limits::CodecLimits;
use crate::report::Warnings;
use crate::types::Build;

/// Encodes `build` with the layout frozen for `version`.
pub(crate) fn encode(
    version: WireVersion,
    build: &Build,
    catalog: &SpecializationCatalog,
    warnings: &mut Warnings,
) -> CodecResult<Vec<u8>> {
    match version {
        WireVersion::LegacyJson => legacy::encode(build, warnings),
        WireVersion::V2 => v2::encode(build, warnings),
        WireVersion::V3 => v3::encode(build, warnings),
        WireVersion::V4 => v4::encode(build, warnings),
        WireVersion::V5 => v5::encode(build, warnings),
        WireVersion::V6 => v6::encode(build, catalog, warnings),
    }
}

/// Decodes `bytes` with the layout frozen for `version`.
///
/// The binary decoders check their own tag, so handing one a payload of
/// another version fails with `VersionMismatch`.
pub(crate) fn decode(
    version: WireVersion,
    bytes: &[u8],
    catalog: &SpecializationCatalog,
    limits: &CodecLimits,
    warnings: &mut Warnings,
) -> CodecResult<Build> {
    match version {
        WireVersion::LegacyJson => legacy::decode(bytes, limits),
        WireVersion::V2 => v2::decode(bytes, limits, warnings),
        WireVersion::V3 => v3::decode(bytes, limits),
        WireVersion::V4 => v4::decode(bytes, limits),
        WireVersion::V5 => v5::decode(bytes, limits),
        WireVersion::V6 => v6::decode(bytes, catalog, limits, warnings),
    }
}
