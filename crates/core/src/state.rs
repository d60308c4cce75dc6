//! Lane states and seed expansion

use crate::params::{LANES, MAX_REGISTER_WORDS, Width};
use crate::primitives::mix;

/// One lane of the hash state.
///
/// Storage is sized for the widest register and aligned for 512-bit loads;
/// only the first `register_words` entries are live.
#[derive(Clone, PartialEq, Eq)]
#[repr(C, align(64))]
pub(crate) struct LaneState {
    words: [u32; MAX_REGISTER_WORDS],
}

impl LaneState {
    /// Fill `n` words with the current seed, then advance the seed.
    #[inline]
    pub(crate) fn expand(seed: &mut u32, n: usize) -> Self {
        let mut words = [0u32; MAX_REGISTER_WORDS];
        words[..n].fill(*seed);
        *seed = mix(*seed);
        Self { words }
    }
}

/// The four lane states (h1..h4) of one hash invocation.
#[derive(Clone, PartialEq, Eq)]
pub(crate) struct HashState {
    lanes: [LaneState; LANES],
    width: Width,
}

impl HashState {
    /// Derive four distinct lane states from a single seed.
    pub(crate) fn new(seed: u32, width: Width) -> Self {
        let n = width.register_words();
        let mut seed = seed;
        let h1 = LaneState::expand(&mut seed, n);
        let h2 = LaneState::expand(&mut seed, n);
        let h3 = LaneState::expand(&mut seed, n);
        let h4 = LaneState::expand(&mut seed, n);
        Self {
            lanes: [h1, h2, h3, h4],
            width,
        }
    }

    #[inline(always)]
    pub(crate) fn width(&self) -> Width {
        self.width
    }

    /// Live words per lane (`N`)
    #[inline(always)]
    pub(crate) fn register_words(&self) -> usize {
        self.width.register_words()
    }

    /// Live words of all four lanes
    #[inline(always)]
    pub(crate) fn lanes(&self) -> [&[u32]; LANES] {
        let n = self.register_words();
        let [h1, h2, h3, h4] = &self.lanes;
        [&h1.words[..n], &h2.words[..n], &h3.words[..n], &h4.words[..n]]
    }

    /// Mutable live words of all four lanes
    #[inline(always)]
    pub(crate) fn lanes_mut(&mut self) -> [&mut [u32]; LANES] {
        let n = self.register_words();
        let [h1, h2, h3, h4] = &mut self.lanes;
        [
            &mut h1.words[..n],
            &mut h2.words[..n],
            &mut h3.words[..n],
            &mut h4.words[..n],
        ]
    }
}

impl core::fmt::Debug for HashState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("HashState")
            .field("width", &self.width)
            .field("lanes", &self.lanes())
            .finish()
    }
}
