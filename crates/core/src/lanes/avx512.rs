//! AVX-512F backend: sixteen words per `__m512i`
//!
//! AVX-512F has a native variable rotate, so no shift/or pair is needed.

#[cfg(target_arch = "x86")]
use core::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use core::arch::x86_64::*;

use super::Lanes;
use crate::block::Blocks;
use crate::caps::Capabilities;
use crate::round;
use crate::state::HashState;
use crate::tier::Tier;

#[derive(Clone, Copy)]
pub(crate) struct Avx512Lanes(__m512i);

impl Lanes for Avx512Lanes {
    const WORDS: usize = 16;

    #[inline(always)]
    unsafe fn load_words(src: &[u32]) -> Self {
        debug_assert!(src.len() >= Self::WORDS);
        debug_assert_eq!(src.as_ptr() as usize & 63, 0);
        unsafe { Self(_mm512_load_epi32(src.as_ptr() as *const i32)) }
    }

    #[inline(always)]
    unsafe fn load_le_bytes(src: &[u8]) -> Self {
        debug_assert!(src.len() >= 4 * Self::WORDS);
        debug_assert_eq!(src.as_ptr() as usize & 63, 0);
        unsafe { Self(_mm512_load_epi32(src.as_ptr() as *const i32)) }
    }

    #[inline(always)]
    unsafe fn store_words(self, dst: &mut [u32]) {
        debug_assert!(dst.len() >= Self::WORDS);
        unsafe { _mm512_store_epi32(dst.as_mut_ptr() as *mut i32, self.0) }
    }

    #[inline(always)]
    unsafe fn xor(self, rhs: Self) -> Self {
        unsafe { Self(_mm512_xor_si512(self.0, rhs.0)) }
    }

    #[inline(always)]
    unsafe fn rotate_left(self, n: u32) -> Self {
        unsafe { Self(_mm512_rolv_epi32(self.0, _mm512_set1_epi32(n as i32))) }
    }

    #[inline(always)]
    unsafe fn shift_left(self, n: u32) -> Self {
        unsafe { Self(_mm512_sll_epi32(self.0, _mm_cvtsi32_si128(n as i32))) }
    }
}

#[target_feature(enable = "avx512f")]
unsafe fn absorb_avx512(state: &mut HashState, blocks: &Blocks<'_>) {
    unsafe { round::absorb::<Avx512Lanes>(state, blocks) }
}

/// Returns `false` without touching `state` when AVX-512F is unavailable.
pub(crate) fn absorb(state: &mut HashState, blocks: &Blocks<'_>, caps: &Capabilities) -> bool {
    if !caps.supports_width512() {
        return false;
    }
    assert!(blocks.tier() >= Tier::Width512, "blocks not aligned for this backend");
    // SAFETY: AVX-512F support was established by `Capabilities::detect`, and
    // `Blocks` only exists for buffers aligned for the tier.
    unsafe { absorb_avx512(state, blocks) };
    true
}
