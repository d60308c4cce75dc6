//! The mixing round, written once for every word-group backend
//!
//! One block is consumed by four chained sub-steps over the lane ring
//! (h1,h2) -> (h2,h3) -> (h3,h4) -> (h4,h1). Each sub-step reads one
//! `N`-word slice of the block:
//!
//! ```text
//! s      = A ^ B ^ slice
//! A_next = rotl(A, 11) ^ s ^ (s << 14)
//! B_next = rotl(s, 19)
//! ```
//!
//! All operations are word-local, so the four sub-steps can run group by
//! group: every group of words goes through the whole chain before the next
//! group is loaded, and no group ever sees another group's words.

use crate::block::Blocks;
use crate::lanes::Lanes;
use crate::params::LANES;
use crate::state::HashState;

#[inline(always)]
unsafe fn sub_step<L: Lanes>(a: L, b: L, slice: L) -> (L, L) {
    unsafe {
        let s = a.xor(b).xor(slice);
        let a = a.rotate_left(11).xor(s).xor(s.shift_left(14));
        (a, s.rotate_left(19))
    }
}

/// Mix one full block into the state.
///
/// # Safety
/// `block` is `4 * N` bytes long and aligned for `L`; the CPU supports `L`.
#[inline(always)]
pub(crate) unsafe fn mix_block<L: Lanes>(state: &mut HashState, block: &[u8]) {
    let n = state.register_words();
    let slice_bytes = 4 * n;
    assert_eq!(block.len(), LANES * slice_bytes, "block does not match state width");
    debug_assert_eq!(n % L::WORDS, 0);

    let [h1, h2, h3, h4] = state.lanes_mut();
    for g in (0..n).step_by(L::WORDS) {
        let offset = 4 * g;
        unsafe {
            let mut a = L::load_words(&h1[g..]);
            let mut b = L::load_words(&h2[g..]);
            let mut c = L::load_words(&h3[g..]);
            let mut d = L::load_words(&h4[g..]);

            (a, b) = sub_step(a, b, L::load_le_bytes(&block[offset..]));
            (b, c) = sub_step(b, c, L::load_le_bytes(&block[slice_bytes + offset..]));
            (c, d) = sub_step(c, d, L::load_le_bytes(&block[2 * slice_bytes + offset..]));
            (d, a) = sub_step(d, a, L::load_le_bytes(&block[3 * slice_bytes + offset..]));

            a.store_words(&mut h1[g..]);
            b.store_words(&mut h2[g..]);
            c.store_words(&mut h3[g..]);
            d.store_words(&mut h4[g..]);
        }
    }
}

/// Mix every full block, then the padded tail block.
///
/// # Safety
/// `blocks` was built for a tier whose alignment suits `L`; the CPU
/// supports `L`.
#[inline(always)]
pub(crate) unsafe fn absorb<L: Lanes>(state: &mut HashState, blocks: &Blocks<'_>) {
    assert_eq!(state.width(), blocks.width(), "blocks built for another width");
    for block in blocks.full() {
        unsafe { mix_block::<L>(state, block) };
    }
    unsafe { mix_block::<L>(state, blocks.tail()) };
}
