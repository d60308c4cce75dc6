//! # VectorHash Core Algorithm
//!
//! A seeded, non-cryptographic checksum with digests of 32 to 1024 bits,
//! built to run on wide SIMD registers while producing the same output on
//! every instruction set.
//!
//! **v0.2.0**
//!
//! ## Features
//!
//! - **Six widths**: 32, 64, 128, 256, 512 and 1024-bit digests
//! - **Tier independent**: scalar, SSE2, AVX2 and AVX-512 agree bit for bit
//! - **Alignment aware**: an unaligned buffer runs on a narrower tier instead
//!   of failing
//! - **No allocation** in the hash path; `no_std` with `alloc`
//!
//! ## Algorithm Outline
//!
//! - 4 lane states of `N = max(2 * width, 512) / 32` words, expanded from the seed
//! - Input consumed in blocks of `16 * N` bytes, last block padded with a
//!   byte counter
//! - One mixing round per block: xor, rotate and shift only
//! - Length injection, cross-lane diffusion, then a fold to `width / 32` words
//!
//! ## Example
//!
//! ```rust
//! use vectorhash_core::{DEFAULT_SEED, Tier, VectorHash, Width, hash};
//!
//! // Single-shot hashing on the best tier for this CPU
//! let digest = hash(b"input data", DEFAULT_SEED, Width::W128);
//! println!("{digest}");
//!
//! // Reusable hasher pinned to a tier
//! let hasher = VectorHash::new(Width::W128).with_tier(Tier::Scalar);
//! assert_eq!(hasher.hash(b"input data"), digest);
//! ```
//!
//! ## no_std Support
//!
//! This crate supports `no_std` environments with the `alloc` crate:
//!
//! ```toml
//! [dependencies]
//! vectorhash-core = { version = "0.2", default-features = false }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

mod block;
mod caps;
mod digest;
mod error;
mod finalize;
mod lanes;
mod params;
mod primitives;
mod round;
mod state;
mod tier;
mod vectorhash;

#[cfg(feature = "std")]
mod ffi;

pub use caps::Capabilities;
pub use digest::Digest;
pub use error::Error;
pub use params::*;
pub use primitives::{MIX_CONSTANT, add, mix, mix_with, rotl};
pub use tier::{Tier, TierRequest, select_tier};
pub use vectorhash::{VectorHash, hash, hash_bits, hash_with};

#[cfg(feature = "std")]
pub use ffi::{vectorhash, vectorhash_detected_tier, vectorhash_with_tier};

#[cfg(test)]
mod tests;
