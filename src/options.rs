//! Option parsing shared by the `vhsum` tool
//!
//! Everything here is a pure function of its input so the command-line
//! front end stays a thin layer over it.

use std::path::Path;

use thiserror::Error;

use crate::algorithm::{Tier, TierRequest, Width};

/// Invalid command-line option values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionError {
    #[error("invalid seed '{0}': expected a 32-bit decimal or 0x-prefixed hex value")]
    InvalidSeed(String),

    #[error("unknown tier '{0}': expected auto, scalar, sse2, avx2 or avx512")]
    InvalidTier(String),

    #[error("--tag does not support --text mode")]
    TagWithText,
}

/// Parse a seed given as decimal (`4249647517`) or hex (`0xfd4c799d`).
pub fn parse_seed(s: &str) -> Result<u32, OptionError> {
    let s = s.trim();
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => s.parse::<u32>(),
    };
    parsed.map_err(|_| OptionError::InvalidSeed(s.to_string()))
}

/// Parse a tier name as printed by [`Tier::name`], or `auto`.
pub fn parse_tier(s: &str) -> Result<TierRequest, OptionError> {
    if s.eq_ignore_ascii_case("auto") {
        return Ok(TierRequest::Auto);
    }
    Tier::ALL
        .into_iter()
        .find(|tier| s.eq_ignore_ascii_case(tier.name()))
        .map(TierRequest::Pinned)
        .ok_or_else(|| OptionError::InvalidTier(s.to_string()))
}

/// Width implied by the name the tool was started as.
///
/// `vh64sum` hashes at 64 bits, `vh1024sum` at 1024 bits, and anything
/// without a width in its name at the default 32 bits.
pub fn width_from_program_name(program: &Path) -> Width {
    let name = program
        .file_stem()
        .map(|s| s.to_string_lossy())
        .unwrap_or_default();

    // Widest first so "1024" is not read as "102" + "4"
    [Width::W1024, Width::W512, Width::W256, Width::W128, Width::W64]
        .into_iter()
        .find(|width| name.contains(&width.bits().to_string()))
        .unwrap_or_default()
}

/// How file contents are labelled in default-style output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadMode {
    #[default]
    Text,
    Binary,
}

impl ReadMode {
    /// Resolve `--binary`, `--text` and `--tag`.
    ///
    /// Tagged output always reads in binary mode and cannot be combined with
    /// an explicit `--text`.
    pub fn resolve(binary: bool, text: bool, tag: bool) -> Result<Self, OptionError> {
        if tag && text {
            return Err(OptionError::TagWithText);
        }
        if binary || tag {
            Ok(ReadMode::Binary)
        } else {
            Ok(ReadMode::Text)
        }
    }

    /// Marker character printed between digest and file name
    pub fn marker(self) -> char {
        match self {
            ReadMode::Binary => '*',
            ReadMode::Text => ' ',
        }
    }
}
