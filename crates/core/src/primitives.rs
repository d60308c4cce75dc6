//! Scalar word primitives for VectorHash
//!
//! These are the only arithmetic building blocks of the algorithm. The SIMD
//! backends re-express `rotl`, `xor` and `<<` lane by lane; the finalizer
//! uses `mix` and `add` directly.

/// Default second operand of [`mix`]
pub const MIX_CONSTANT: u32 = 0xd86b_048b;

/// Rotate a 32-bit word left by `r` bits
#[inline(always)]
pub const fn rotl(x: u32, r: u32) -> u32 {
    x.rotate_left(r)
}

/// Addition modulo 2^32
#[inline(always)]
pub const fn add(a: u32, b: u32) -> u32 {
    a.wrapping_add(b)
}

/// Word-mix primitive with the default constant as second operand.
///
/// Used to advance the seed between lanes and to avalanche single words
/// during finalization.
#[inline(always)]
pub const fn mix(a: u32) -> u32 {
    mix_with(a, MIX_CONSTANT)
}

/// Word-mix primitive combining two words.
///
/// ```text
/// b  ^= a
/// a'  = rotl(a, 11) ^ b ^ rotl(b, 13)
/// b'  = rotl(b, 19)
/// out = a' + b'   (mod 2^32)
/// ```
#[inline(always)]
pub const fn mix_with(a: u32, b: u32) -> u32 {
    let b = b ^ a;
    let a = rotl(a, 11) ^ b ^ rotl(b, 13);
    let b = rotl(b, 19);
    add(a, b)
}

/// Copy `src` into the front of `block` and fill the rest with a running
/// byte counter 1, 2, 3, ... (mod 256).
///
/// The counter keeps trailing zero bytes of the input distinguishable from
/// padding.
#[inline]
pub fn pad_block(src: &[u8], block: &mut [u8]) {
    debug_assert!(src.len() <= block.len());
    let (head, tail) = block.split_at_mut(src.len());
    head.copy_from_slice(src);
    for (counter, byte) in (1u32..).zip(tail.iter_mut()) {
        *byte = (counter & 0xff) as u8;
    }
}
