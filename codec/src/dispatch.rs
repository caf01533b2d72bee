//! Version dispatch and the top-level encode/decode entry points.

use catalog::SpecializationCatalog;
use wire::{Limits, WireVersion};

use crate::error::{CodecError, CodecResult};
use crate::format;
use crate::limits::CodecLimits;
use crate::report::{DecodeReport, EncodeReport, EncodedPayload, Warnings};
use crate::types::Build;

/// Returns the version a payload claims by its first byte.
///
/// Any byte that is not a binary tag is reported as legacy JSON; whether it
/// actually parses is only known after decoding.
#[must_use]
pub fn detect_version(bytes: &[u8]) -> Option<WireVersion> {
    let tag = *bytes.first()?;
    Some(WireVersion::from_tag(tag).unwrap_or(WireVersion::LegacyJson))
}

/// Serializes `build` into an uncompressed payload of `version`.
///
/// Builds that a decoder with [`CodecLimits::default`] would reject fail with
/// [`CodecError::LimitsExceeded`].
pub fn encode_payload(
    build: &Build,
    version: WireVersion,
    catalog: &SpecializationCatalog,
) -> CodecResult<EncodedPayload> {
    CodecLimits::default().check_build(build)?;
    let mut warnings = Warnings::default();
    let bytes = format::encode(version, build, catalog, &mut warnings)?;
    tracing::debug!(%version, payload_len = bytes.len(), "encoded payload");
    Ok(EncodedPayload {
        bytes,
        version,
        warnings: warnings.into_vec(),
    })
}

/// Encodes `build` into a shareable code using the layout of `version`.
pub fn encode_build_as(
    build: &Build,
    version: WireVersion,
    catalog: &SpecializationCatalog,
) -> CodecResult<EncodeReport> {
    let payload = encode_payload(build, version, catalog)?;
    let code = wire::encode_transport(&payload.bytes)?;
    tracing::debug!(
        %version,
        payload_len = payload.bytes.len(),
        code_len = code.len(),
        "encoded build code"
    );
    Ok(EncodeReport {
        code,
        version,
        payload_len: payload.bytes.len(),
        warnings: payload.warnings,
    })
}

/// Encodes `build` into a shareable code using the current version.
pub fn encode_build(build: &Build, catalog: &SpecializationCatalog) -> CodecResult<String> {
    encode_build_as(build, WireVersion::CURRENT, catalog).map(|report| report.code)
}

/// Decodes an uncompressed payload, picking the decoder from its first byte.
///
/// Tags 2 through 6 select the frozen binary decoder of that version. Any
/// other payload is tried as legacy JSON and is rejected with
/// [`CodecError::UnknownVersion`] when it does not parse.
pub fn decode_payload(
    bytes: &[u8],
    catalog: &SpecializationCatalog,
    limits: &CodecLimits,
) -> CodecResult<DecodeReport> {
    let Some(&tag) = bytes.first() else {
        return Err(CodecError::Truncated {
            requested: 1,
            available: 0,
        });
    };

    let mut warnings = Warnings::default();
    let (version, build) = match WireVersion::from_tag(tag) {
        Some(version) => {
            tracing::debug!(%version, payload_len = bytes.len(), "dispatching payload");
            let build = format::decode(version, bytes, catalog, limits, &mut warnings)?;
            (version, build)
        }
        None => {
            let version = WireVersion::LegacyJson;
            match format::decode(version, bytes, catalog, limits, &mut warnings) {
                Ok(build) => (version, build),
                Err(CodecError::LegacyJson { message }) => {
                    tracing::debug!(tag, %message, "payload is neither tagged nor legacy JSON");
                    return Err(CodecError::UnknownVersion { tag });
                }
                Err(err) => return Err(err),
            }
        }
    };

    Ok(DecodeReport {
        build,
        version,
        warnings: warnings.into_vec(),
    })
}

/// Decodes an uncompressed payload with one specific frozen decoder.
pub fn decode_payload_as(
    bytes: &[u8],
    version: WireVersion,
    catalog: &SpecializationCatalog,
    limits: &CodecLimits,
) -> CodecResult<DecodeReport> {
    let mut warnings = Warnings::default();
    let build = format::decode(version, bytes, catalog, limits, &mut warnings)?;
    Ok(DecodeReport {
        build,
        version,
        warnings: warnings.into_vec(),
    })
}

/// Decodes a shareable code.
pub fn decode_build(
    code: &str,
    catalog: &SpecializationCatalog,
    transport: &Limits,
    limits: &CodecLimits,
) -> CodecResult<DecodeReport> {
    let bytes = wire::decode_transport(code, transport)?;
    decode_payload(&bytes, catalog, limits)
}
