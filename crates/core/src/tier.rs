//! Execution tiers and tier selection

use tracing::trace;

/// Execution tier, ordered from narrowest to widest.
///
/// A tier fixes how many 32-bit words are mixed per operation and the
/// alignment the input buffer needs for the tier to read it in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
    /// One word at a time, no alignment requirement
    Scalar,
    /// Four words per 128-bit register (SSE2)
    Width128,
    /// Eight words per 256-bit register (AVX2)
    Width256,
    /// Sixteen words per 512-bit register (AVX-512F)
    Width512,
}

impl Tier {
    /// All tiers, narrowest first.
    pub const ALL: [Tier; 4] = [Tier::Scalar, Tier::Width128, Tier::Width256, Tier::Width512];

    /// Required buffer alignment in bytes (0 for none)
    #[inline]
    pub const fn alignment(self) -> usize {
        match self {
            Tier::Scalar => 0,
            Tier::Width128 => 16,
            Tier::Width256 => 32,
            Tier::Width512 => 64,
        }
    }

    /// Mask applied to a buffer address; the tier fits when the result is 0
    #[inline]
    pub const fn alignment_mask(self) -> usize {
        match self {
            Tier::Scalar => 0,
            Tier::Width128 => 0x0f,
            Tier::Width256 => 0x1f,
            Tier::Width512 => 0x3f,
        }
    }

    /// 32-bit words mixed per operation
    #[inline]
    pub const fn lane_words(self) -> usize {
        match self {
            Tier::Scalar => 1,
            Tier::Width128 => 4,
            Tier::Width256 => 8,
            Tier::Width512 => 16,
        }
    }

    #[inline]
    pub const fn is_aligned(self, address: usize) -> bool {
        address & self.alignment_mask() == 0
    }

    /// Next narrower tier
    #[inline]
    pub const fn downgrade(self) -> Option<Tier> {
        match self {
            Tier::Scalar => None,
            Tier::Width128 => Some(Tier::Scalar),
            Tier::Width256 => Some(Tier::Width128),
            Tier::Width512 => Some(Tier::Width256),
        }
    }

    /// Short name, matching the instruction set used on x86
    pub const fn name(self) -> &'static str {
        match self {
            Tier::Scalar => "scalar",
            Tier::Width128 => "sse2",
            Tier::Width256 => "avx2",
            Tier::Width512 => "avx512",
        }
    }
}

impl core::fmt::Display for Tier {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// How the caller wants the tier chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TierRequest {
    /// Widest tier the hardware offers
    #[default]
    Auto,
    /// At most this tier, regardless of hardware
    Pinned(Tier),
}

impl From<Tier> for TierRequest {
    fn from(tier: Tier) -> Self {
        TierRequest::Pinned(tier)
    }
}

/// Pick the tier for a buffer starting at `address`.
///
/// The upper bound is the pinned tier, or `hardware_max` for
/// [`TierRequest::Auto`]. From there the tier is lowered until the address
/// satisfies its alignment. Scalar always fits, so this never fails.
pub fn select_tier(request: TierRequest, hardware_max: Tier, address: usize) -> Tier {
    let bound = match request {
        TierRequest::Auto => hardware_max,
        TierRequest::Pinned(tier) => tier,
    };

    let mut tier = bound;
    while !tier.is_aligned(address) {
        match tier.downgrade() {
            Some(lower) => tier = lower,
            None => break,
        }
    }

    if tier != bound {
        trace!(
            from = bound.name(),
            to = tier.name(),
            address,
            "buffer alignment forced a narrower tier"
        );
    }
    tier
}
