//! AVX2 backend: eight words per `__m256i`

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
pub(crate) struct Avx2Lanes(__m256i);

impl Lanes for Avx2Lanes {
    const WORDS: usize = 8;

    #[inline(always)]
    unsafe fn load_words(src: &[u32]) -> Self {
        debug_assert!(src.len() >= Self::WORDS);
        debug_assert_eq!(src.as_ptr() as usize & 31, 0);
        unsafe { Self(_mm256_load_si256(src.as_ptr() as *const __m256i)) }
    }

    #[inline(always)]
    unsafe fn load_le_bytes(src: &[u8]) -> Self {
        debug_assert!(src.len() >= 4 * Self::WORDS);
        debug_assert_eq!(src.as_ptr() as usize & 31, 0);
        unsafe { Self(_mm256_load_si256(src.as_ptr() as *const __m256i)) }
    }

    #[inline(always)]
    unsafe fn store_words(self, dst: &mut [u32]) {
        debug_assert!(dst.len() >= Self::WORDS);
        unsafe { _mm256_store_si256(dst.as_mut_ptr() as *mut __m256i, self.0) }
    }

    #[inline(always)]
    unsafe fn xor(self, rhs: Self) -> Self {
        unsafe { Self(_mm256_xor_si256(self.0, rhs.0)) }
    }

    #[inline(always)]
    unsafe fn rotate_left(self, n: u32) -> Self {
        unsafe {
            let left = _mm256_sll_epi32(self.0, _mm_cvtsi32_si128(n as i32));
            let right = _mm256_srl_epi32(self.0, _mm_cvtsi32_si128((32 - n) as i32));
            Self(_mm256_or_si256(left, right))
        }
    }

    #[inline(always)]
    unsafe fn shift_left(self, n: u32) -> Self {
        unsafe { Self(_mm256_sll_epi32(self.0, _mm_cvtsi32_si128(n as i32))) }
    }
}

#[target_feature(enable = "avx2")]
unsafe fn absorb_avx2(state: &mut HashState, blocks: &Blocks<'_>) {
    unsafe { round::absorb::<Avx2Lanes>(state, blocks) }
}

/// Returns `false` without touching `state` when AVX2 is unavailable.
pub(crate) fn absorb(state: &mut HashState, blocks: &Blocks<'_>, caps: &Capabilities) -> bool {
    if !caps.supports_width256() {
        return false;
    }
    assert!(blocks.tier() >= Tier::Width256, "blocks not aligned for this backend");
    // SAFETY: AVX2 support was established by `Capabilities::detect`, and
    // `Blocks` only exists for buffers aligned for the tier.
    unsafe { absorb_avx2(state, blocks) };
    true
}
