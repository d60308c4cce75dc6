//! VectorHash Algorithm Parameters
//!
//! Every size used by the algorithm is derived from the digest width. The
//! internal register is never narrower than 512 bits so that even a 32-bit
//! digest is folded down from a 2048-bit state.

use crate::error::Error;

/// Seed used by the `vhsum` tool when none is given
pub const DEFAULT_SEED: u32 = 0xfd4c_799d;

/// Width of the widest hardware register used by any tier (in bits)
pub const HW_REGISTER_BITS: usize = 512;

/// Number of lane states in the hash state
pub const LANES: usize = 4;

/// Largest register word count (1024-bit digest)
pub const MAX_REGISTER_WORDS: usize = 2 * 1024 / 32;

/// Largest block size in bytes
pub const MAX_BLOCK_BYTES: usize = LANES * MAX_REGISTER_WORDS * 4;

/// Largest digest size in 32-bit words
pub const MAX_DIGEST_WORDS: usize = 1024 / 32;

/// Algorithm version
pub const VERSION: &str = "0.2";

/// Digest width of a VectorHash.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Width {
    #[default]
    W32,
    W64,
    W128,
    W256,
    W512,
    W1024,
}

impl Width {
    /// All supported widths, narrowest first.
    pub const ALL: [Width; 6] = [
        Width::W32,
        Width::W64,
        Width::W128,
        Width::W256,
        Width::W512,
        Width::W1024,
    ];

    /// Validate a raw bit count.
    ///
    /// The width must be a power of two between 32 and 1024 inclusive.
    pub const fn from_bits(bits: usize) -> Result<Self, Error> {
        match bits {
            32 => Ok(Width::W32),
            64 => Ok(Width::W64),
            128 => Ok(Width::W128),
            256 => Ok(Width::W256),
            512 => Ok(Width::W512),
            1024 => Ok(Width::W1024),
            _ => Err(Error::InvalidWidth(bits)),
        }
    }

    /// Digest width in bits
    #[inline]
    pub const fn bits(self) -> usize {
        match self {
            Width::W32 => 32,
            Width::W64 => 64,
            Width::W128 => 128,
            Width::W256 => 256,
            Width::W512 => 512,
            Width::W1024 => 1024,
        }
    }

    /// Digest size in bytes
    #[inline]
    pub const fn bytes(self) -> usize {
        self.bits() / 8
    }

    /// Number of 32-bit words in the digest
    #[inline]
    pub const fn digest_words(self) -> usize {
        self.bits() / 32
    }

    /// Width of the virtual register holding one lane state (in bits)
    #[inline]
    pub const fn register_bits(self) -> usize {
        let doubled = 2 * self.bits();
        if doubled > HW_REGISTER_BITS {
            doubled
        } else {
            HW_REGISTER_BITS
        }
    }

    /// Number of 32-bit words in one lane state (`N`, at least 16)
    #[inline]
    pub const fn register_words(self) -> usize {
        self.register_bits() / 32
    }

    /// Size of one input block in bytes (`4 * N` words)
    #[inline]
    pub const fn block_bytes(self) -> usize {
        LANES * self.register_words() * 4
    }

    /// Number of provisional words produced by the width fold
    #[inline]
    pub const fn logical_state_words(self) -> usize {
        let words = self.digest_words();
        if words > LANES { words } else { LANES }
    }

    /// Length of the hex rendering of the digest
    #[inline]
    pub const fn hex_len(self) -> usize {
        self.bits() / 4
    }
}

impl TryFrom<usize> for Width {
    type Error = Error;

    fn try_from(bits: usize) -> Result<Self, Self::Error> {
        Width::from_bits(bits)
    }
}

impl core::fmt::Display for Width {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "VH{}", self.bits())
    }
}
