//! C FFI bindings
//!
//! Return codes: `0` success, `-1` invalid width, `-2` null pointer,
//! `-3` invalid tier code.

use core::ffi::c_int;
use core::slice;

use crate::{Capabilities, Tier, TierRequest, Width, hash_with};

const OK: c_int = 0;
const ERR_WIDTH: c_int = -1;
const ERR_NULL: c_int = -2;
const ERR_TIER: c_int = -3;

fn tier_request(code: c_int) -> Option<TierRequest> {
    match code {
        -1 => Some(TierRequest::Auto),
        0 => Some(TierRequest::Pinned(Tier::Scalar)),
        1 => Some(TierRequest::Pinned(Tier::Width128)),
        2 => Some(TierRequest::Pinned(Tier::Width256)),
        3 => Some(TierRequest::Pinned(Tier::Width512)),
        _ => None,
    }
}

fn tier_code(tier: Tier) -> c_int {
    match tier {
        Tier::Scalar => 0,
        Tier::Width128 => 1,
        Tier::Width256 => 2,
        Tier::Width512 => 3,
    }
}

/// Compute the VectorHash of `len` bytes at `buf` on the automatically
/// selected tier.
/// - buf: input bytes (may be null when `len` is 0)
/// - seed: hash seed
/// - out: buffer of at least `hash_width / 8` bytes for the digest
/// - hash_width: digest width in bits (32, 64, 128, 256, 512 or 1024)
///
/// # Safety
/// `buf` must be valid for `len` bytes of reads and `out` for
/// `hash_width / 8` bytes of writes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn vectorhash(
    buf: *const u8,
    len: usize,
    seed: u32,
    out: *mut u8,
    hash_width: u32,
) -> c_int {
    unsafe { vectorhash_with_tier(buf, len, seed, out, hash_width, -1) }
}

/// Same as [`vectorhash`], with the tier capped by `tier`:
/// `-1` auto, `0` scalar, `1` 128-bit, `2` 256-bit, `3` 512-bit.
///
/// # Safety
/// Same requirements as [`vectorhash`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn vectorhash_with_tier(
    buf: *const u8,
    len: usize,
    seed: u32,
    out: *mut u8,
    hash_width: u32,
    tier: c_int,
) -> c_int {
    let Ok(width) = Width::from_bits(hash_width as usize) else {
        return ERR_WIDTH;
    };
    let Some(request) = tier_request(tier) else {
        return ERR_TIER;
    };
    if out.is_null() || (buf.is_null() && len != 0) {
        return ERR_NULL;
    }

    unsafe {
        let input: &[u8] = if len == 0 {
            &[]
        } else {
            slice::from_raw_parts(buf, len)
        };
        let digest = hash_with(input, seed, width, request, &Capabilities::detect());

        let output = slice::from_raw_parts_mut(out, width.bytes());
        digest.write_le_bytes(output);
    }
    OK
}

/// Widest tier the running CPU supports natively (`0` to `3`).
#[unsafe(no_mangle)]
pub extern "C" fn vectorhash_detected_tier() -> c_int {
    tier_code(Capabilities::detect().max_tier())
}
