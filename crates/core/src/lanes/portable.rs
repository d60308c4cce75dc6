//! Portable array backend for the SIMD group sizes
//!
//! Runs the 128/256/512-bit tiers on hardware that lacks the matching
//! instructions. The compiler is free to auto-vectorize the fixed-size loops.

use super::Lanes;
use crate::block::Blocks;
use crate::round;
use crate::state::HashState;

/// `W` words processed as one group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Portable<const W: usize>([u32; W]);

impl<const W: usize> Portable<W> {
    #[inline(always)]
    fn map(self, f: impl Fn(u32) -> u32) -> Self {
        Self(self.0.map(f))
    }
}

impl<const W: usize> Lanes for Portable<W> {
    const WORDS: usize = W;

    #[inline(always)]
    unsafe fn load_words(src: &[u32]) -> Self {
        let mut words = [0u32; W];
        words.copy_from_slice(&src[..W]);
        Self(words)
    }

    #[inline(always)]
    unsafe fn load_le_bytes(src: &[u8]) -> Self {
        let mut words = [0u32; W];
        for (word, bytes) in words.iter_mut().zip(src[..4 * W].chunks_exact(4)) {
            *word = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        }
        Self(words)
    }

    #[inline(always)]
    unsafe fn store_words(self, dst: &mut [u32]) {
        dst[..W].copy_from_slice(&self.0);
    }

    #[inline(always)]
    unsafe fn xor(self, rhs: Self) -> Self {
        let mut out = self.0;
        for (word, other) in out.iter_mut().zip(rhs.0) {
            *word ^= other;
        }
        Self(out)
    }

    #[inline(always)]
    unsafe fn rotate_left(self, n: u32) -> Self {
        self.map(|word| word.rotate_left(n))
    }

    #[inline(always)]
    unsafe fn shift_left(self, n: u32) -> Self {
        self.map(|word| word << n)
    }
}

pub(crate) fn absorb<const W: usize>(state: &mut HashState, blocks: &Blocks<'_>) {
    // SAFETY: array groups only use integer operations and bounds-checked
    // slice accesses; they have no alignment or CPU feature requirements.
    unsafe { round::absorb::<Portable<W>>(state, blocks) }
}
