//! Inspection and debugging helpers for build codes.
//!
//! This crate backs the `buildlink` CLI:
//!
//! - Break a code down into transport sizes, version and raw payload
//! - Compare how large a build is in every wire version
//! - Render decoded builds for humans
//!
//! # Design Principles
//!
//! - **First-class tooling** - These tools are part of the product, not afterthoughts.
//! - **Human-readable output** - Make it easy to understand what the codec is doing.

use std::fmt::Write as _;

use anyhow::{Context, Result};
use codec::{
    decode_payload, detect_version, encode_build_as, Build, CodecLimits, DecodeReport,
    SpecializationCatalog, WireVersion,
};
use serde::Serialize;

/// Section names of a v6 payload, in flag bit order.
const V6_SECTIONS: [&str; 8] = [
    "equipment",
    "default-stat",
    "skills",
    "specializations",
    "rune",
    "relic",
    "mechanics",
    "infusions",
];

/// Breakdown of a code's transport layers and payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InspectReport {
    pub code_len: usize,
    pub compressed_len: usize,
    pub payload_len: usize,
    /// Version claimed by the first payload byte.
    pub version: Option<WireVersion>,
    /// Sections flagged present, for v6 payloads.
    pub sections: Vec<&'static str>,
    pub payload: Vec<u8>,
}

/// Decodes a code's transport layers without interpreting the payload.
pub fn inspect_code(code: &str, limits: &wire::Limits) -> Result<InspectReport> {
    let code = code.trim();
    let compressed = wire::decode_base64(code).context("decode base64")?;
    let payload = wire::inflate(&compressed, limits.max_payload_bytes).context("inflate payload")?;
    let version = detect_version(&payload);
    let sections = match (version, payload.get(3)) {
        (Some(WireVersion::V6), Some(flags)) => V6_SECTIONS
            .iter()
            .enumerate()
            .filter(|(bit, _)| *flags & (1u8 << bit) != 0)
            .map(|(_, name)| *name)
            .collect(),
        _ => Vec::new(),
    };
    Ok(InspectReport {
        code_len: code.len(),
        compressed_len: compressed.len(),
        payload_len: payload.len(),
        version,
        sections,
        payload,
    })
}

/// Payload and code size of one build in one version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SizeRow {
    pub version: WireVersion,
    pub payload_len: usize,
    pub code_len: usize,
    pub warnings: usize,
}

/// Encodes `build` in every version and reports the sizes, oldest first.
pub fn size_table(build: &Build, catalog: &SpecializationCatalog) -> Result<Vec<SizeRow>> {
    WireVersion::ALL
        .into_iter()
        .map(|version| {
            let report = encode_build_as(build, version, catalog)
                .with_context(|| format!("encode as {version}"))?;
            Ok(SizeRow {
                version,
                payload_len: report.payload_len,
                code_len: report.code.len(),
                warnings: report.warnings.len(),
            })
        })
        .collect()
}

/// Decodes a raw payload, as `inspect` would show it, into a build.
pub fn decode_raw(bytes: &[u8], catalog: &SpecializationCatalog) -> Result<DecodeReport> {
    decode_payload(bytes, catalog, &CodecLimits::default()).context("decode payload")
}

/// Renders bytes as space-separated hex, 16 per line.
#[must_use]
pub fn hex_dump(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 3);
    for (index, chunk) in bytes.chunks(16).enumerate() {
        if index > 0 {
            out.push('\n');
        }
        let _ = write!(out, "{:04x}:", index * 16);
        for byte in chunk {
            let _ = write!(out, " {byte:02x}");
        }
    }
    out
}

/// Renders a decoded build for reading in a terminal.
#[must_use]
pub fn format_decode_pretty(report: &DecodeReport) -> String {
    let build = &report.build;
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} / {} ({})",
        build.profession, build.game_mode.name(), report.version
    );
    let _ = writeln!(out, "equipment:");
    for entry in &build.equipment {
        let _ = write!(out, "  {:<10} {}", entry.slot.name(), entry.stat);
        if let Some(weapon) = &entry.weapon_type {
            let _ = write!(out, " {weapon}");
        }
        let sigils: Vec<String> = [entry.sigil1_id, entry.sigil2_id]
            .into_iter()
            .flatten()
            .map(|id| id.to_string())
            .collect();
        if !sigils.is_empty() {
            let _ = write!(out, " sigils [{}]", sigils.join(", "));
        }
        let infusions: Vec<String> = entry.infusion_ids().map(|id| id.to_string()).collect();
        if !infusions.is_empty() {
            let _ = write!(out, " infusions [{}]", infusions.join(", "));
        }
        out.push('\n');
    }
    let skills: Vec<String> = build
        .skills
        .to_array()
        .into_iter()
        .map(|skill| skill.map_or_else(|| "-".to_owned(), |id| id.to_string()))
        .collect();
    let _ = writeln!(out, "skills: {}", skills.join(" "));
    for spec in &build.specializations {
        let traits: Vec<String> = spec
            .traits
            .into_iter()
            .map(|choice| choice.map_or_else(|| "-".to_owned(), |id| id.to_string()))
            .collect();
        let _ = writeln!(out, "specialization {}: {}", spec.id, traits.join(" "));
    }
    if let Some(rune) = build.rune_id {
        let _ = writeln!(out, "rune: {rune}");
    }
    if let Some(relic) = build.relic_id {
        let _ = writeln!(out, "relic: {relic}");
    }
    if !build.mechanics.is_empty() {
        let _ = writeln!(out, "mechanics: {:?}", build.mechanics);
    }
    if !report.warnings.is_empty() {
        let _ = writeln!(out, "warnings:");
        for warning in &report.warnings {
            let _ = writeln!(out, "  {warning}");
        }
    }
    out
}
