//! Scalar backend: one word per group

use super::Lanes;
use crate::block::Blocks;
use crate::round;
use crate::state::HashState;

impl Lanes for u32 {
    const WORDS: usize = 1;

    #[inline(always)]
    unsafe fn load_words(src: &[u32]) -> Self {
        src[0]
    }

    #[inline(always)]
    unsafe fn load_le_bytes(src: &[u8]) -> Self {
        let mut word = [0u8; 4];
        word.copy_from_slice(&src[..4]);
        u32::from_le_bytes(word)
    }

    #[inline(always)]
    unsafe fn store_words(self, dst: &mut [u32]) {
        dst[0] = self;
    }

    #[inline(always)]
    unsafe fn xor(self, rhs: Self) -> Self {
        self ^ rhs
    }

    #[inline(always)]
    unsafe fn rotate_left(self, n: u32) -> Self {
        u32::rotate_left(self, n)
    }

    #[inline(always)]
    unsafe fn shift_left(self, n: u32) -> Self {
        self << n
    }
}

pub(crate) fn absorb(state: &mut HashState, blocks: &Blocks<'_>) {
    // SAFETY: the scalar group uses plain integer operations and bounds-checked
    // slice accesses; it has no alignment or CPU feature requirements.
    unsafe { round::absorb::<u32>(state, blocks) }
}
