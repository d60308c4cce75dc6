//! Word-group backends for the mixing round
//!
//! Every tier runs the same generic round body (see `round.rs`); what differs
//! is how many 32-bit words are processed per operation and which
//! instructions do it. A backend only has to provide xor, rotate, shift and
//! the two loads.
//!
//! The native SIMD backends are compiled on x86 only. On other targets they
//! are replaced by stubs that always decline, and the portable array backend
//! of the same group size runs instead.

use tracing::trace;

use crate::block::Blocks;
use crate::caps::Capabilities;
use crate::state::HashState;
use crate::tier::Tier;

pub(crate) mod portable;
pub(crate) mod scalar;

/// A group of 32-bit words that the round body processes as one unit.
///
/// Each word of the group is transformed independently, which is what makes
/// every group size produce identical results.
pub(crate) trait Lanes: Copy {
    /// Number of 32-bit words in one group
    const WORDS: usize;

    /// Load a group from the hash state.
    ///
    /// # Safety
    /// `src` holds at least `WORDS` words and, for SIMD groups, is aligned to
    /// `4 * WORDS` bytes. The CPU supports the backend's instructions.
    unsafe fn load_words(src: &[u32]) -> Self;

    /// Load a group of little-endian words from input bytes.
    ///
    /// # Safety
    /// `src` holds at least `4 * WORDS` bytes and, for SIMD groups, is aligned
    /// to `4 * WORDS` bytes. The CPU supports the backend's instructions.
    unsafe fn load_le_bytes(src: &[u8]) -> Self;

    /// Store a group back into the hash state.
    ///
    /// # Safety
    /// Same requirements as [`Lanes::load_words`].
    unsafe fn store_words(self, dst: &mut [u32]);

    /// # Safety
    /// The CPU supports the backend's instructions.
    unsafe fn xor(self, rhs: Self) -> Self;

    /// Rotate every word left by `n` (0 < n < 32).
    ///
    /// # Safety
    /// The CPU supports the backend's instructions.
    unsafe fn rotate_left(self, n: u32) -> Self;

    /// Shift every word left by `n` (n < 32).
    ///
    /// # Safety
    /// The CPU supports the backend's instructions.
    unsafe fn shift_left(self, n: u32) -> Self;
}

macro_rules! native_backends {
    ($(#[cfg($cond:meta)] mod $name:ident;)+) => {
        $(
            #[cfg($cond)]
            pub(crate) mod $name;

            #[cfg(not($cond))]
            pub(crate) mod $name {
                pub(crate) fn absorb(
                    _: &mut crate::state::HashState,
                    _: &crate::block::Blocks<'_>,
                    _: &crate::caps::Capabilities,
                ) -> bool {
                    false
                }
            }
        )+
    };
}

native_backends! {
    #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
    mod sse2;

    #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
    mod avx2;

    #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
    mod avx512;
}

/// Run every block through the mixing round of the tier `blocks` was built for.
///
/// SIMD tiers use native instructions when `caps` reports them and fall back
/// to the portable group of the same width otherwise.
pub(crate) fn absorb(state: &mut HashState, blocks: &Blocks<'_>, caps: &Capabilities) {
    let tier = blocks.tier();
    match tier {
        Tier::Scalar => scalar::absorb(state, blocks),
        Tier::Width128 => {
            if !sse2::absorb(state, blocks, caps) {
                trace!(tier = tier.name(), "native backend unavailable, using portable lanes");
                portable::absorb::<4>(state, blocks);
            }
        }
        Tier::Width256 => {
            if !avx2::absorb(state, blocks, caps) {
                trace!(tier = tier.name(), "native backend unavailable, using portable lanes");
                portable::absorb::<8>(state, blocks);
            }
        }
        Tier::Width512 => {
            if !avx512::absorb(state, blocks, caps) {
                trace!(tier = tier.name(), "native backend unavailable, using portable lanes");
                portable::absorb::<16>(state, blocks);
            }
        }
    }
}
