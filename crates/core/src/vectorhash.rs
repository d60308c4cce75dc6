//! VectorHash driver
//!
//! A hash runs in three steps:
//!
//! 1. Seed expansion into four lane states of `N` words each.
//! 2. Absorption: every full block of the input, then the padded tail, goes
//!    through the mixing round on the tier picked for the buffer.
//! 3. Finalization: diffusion across lanes and the fold to the digest width.
//!
//! The tier only changes how many words are processed at once. The digest is
//! the same for every tier, every alignment and every CPU.

use tracing::{debug, trace};

use crate::block::Blocks;
use crate::caps::Capabilities;
use crate::digest::Digest;
use crate::error::Error;
use crate::finalize::finalize;
use crate::lanes;
use crate::params::{DEFAULT_SEED, Width};
use crate::state::HashState;
use crate::tier::{Tier, TierRequest, select_tier};

/// Reusable VectorHash configuration.
///
/// Holds the width, seed, tier request and the capability set; hashing
/// itself keeps no state between calls, so one value can be shared freely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VectorHash {
    width: Width,
    seed: u32,
    request: TierRequest,
    caps: Capabilities,
}

impl VectorHash {
    /// Create a hasher for `width` with the default seed, automatic tier
    /// selection and the capabilities of the running CPU.
    pub fn new(width: Width) -> Self {
        let caps = Capabilities::detect();
        debug!(
            width = width.bits(),
            max_tier = caps.max_tier().name(),
            "VectorHash configured"
        );
        Self {
            width,
            seed: DEFAULT_SEED,
            request: TierRequest::Auto,
            caps,
        }
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    /// Cap the tier. Alignment may still lower it per buffer.
    pub fn with_tier(mut self, request: impl Into<TierRequest>) -> Self {
        self.request = request.into();
        self
    }

    /// Replace the detected capabilities, e.g. with a masked set.
    pub fn with_capabilities(mut self, caps: Capabilities) -> Self {
        self.caps = caps;
        self
    }

    #[inline]
    pub fn width(&self) -> Width {
        self.width
    }

    #[inline]
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Tier that [`VectorHash::hash`] would use for `input`.
    pub fn tier_for(&self, input: &[u8]) -> Tier {
        select_tier(self.request, self.caps.max_tier(), input.as_ptr() as usize)
    }

    /// Compute the digest of `input`.
    pub fn hash(&self, input: &[u8]) -> Digest {
        digest(input, self.seed, self.width, self.tier_for(input), &self.caps)
    }
}

impl Default for VectorHash {
    fn default() -> Self {
        Self::new(Width::default())
    }
}

fn digest(input: &[u8], seed: u32, width: Width, tier: Tier, caps: &Capabilities) -> Digest {
    let mut state = HashState::new(seed, width);
    let blocks = Blocks::new(input, width, tier);
    trace!(
        len = input.len(),
        blocks = blocks.count(),
        tier = tier.name(),
        width = width.bits(),
        "absorbing"
    );
    lanes::absorb(&mut state, &blocks, caps);
    finalize(&mut state, input.len())
}

/// Hash `input` on the widest tier the CPU and the buffer allow.
///
/// ```rust
/// use vectorhash_core::{DEFAULT_SEED, Width, hash};
///
/// let digest = hash(b"", DEFAULT_SEED, Width::W32);
/// assert_eq!(digest.to_hex(), "7647d9bd");
/// ```
pub fn hash(input: &[u8], seed: u32, width: Width) -> Digest {
    let caps = Capabilities::detect();
    hash_with(input, seed, width, TierRequest::Auto, &caps)
}

/// Hash `input` with an explicit tier request and capability set.
pub fn hash_with(
    input: &[u8],
    seed: u32,
    width: Width,
    request: TierRequest,
    caps: &Capabilities,
) -> Digest {
    let tier = select_tier(request, caps.max_tier(), input.as_ptr() as usize);
    digest(input, seed, width, tier, caps)
}

/// Hash `input` with the width given as a bit count.
///
/// # Errors
/// [`Error::InvalidWidth`] unless `bits` is 32, 64, 128, 256, 512 or 1024.
pub fn hash_bits(input: &[u8], seed: u32, bits: usize) -> Result<Digest, Error> {
    let width = Width::from_bits(bits)?;
    Ok(hash(input, seed, width))
}
