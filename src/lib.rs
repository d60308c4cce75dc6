//! VectorHash Library
//!
//! Helpers around the VectorHash algorithm for tools that checksum files.
//!
//! # Overview
//!
//! VectorHash is a seeded, non-cryptographic checksum with 32 to 1024-bit
//! digests. It runs on scalar code or on 128, 256 and 512-bit SIMD
//! registers and gives the same digest on all of them. The algorithm itself
//! lives in `vectorhash-core` and is re-exported here as [`algorithm`].
//!
//! # Features
//!
//! - [`input::Input`]: memory-mapped regular files, with a 64-byte aligned
//!   [`buffer::AlignedBuffer`] for stdin and unmappable inputs, so the widest
//!   tier applies
//! - [`checksum::ChecksumLine`]: coreutils-compatible output lines
//! - [`options`]: seed, tier and width parsing for the `vhsum` tool
//!
//! # Example
//!
//! ```rust
//! use vectorhash::algorithm::{VectorHash, Width};
//! use vectorhash::buffer::AlignedBuffer;
//! use vectorhash::checksum::{ChecksumLine, LineStyle};
//!
//! let data = AlignedBuffer::from_slice(b"");
//! let digest = VectorHash::new(Width::W32).hash(&data);
//!
//! let line = ChecksumLine::new(&digest, "empty", LineStyle::default());
//! assert_eq!(line.to_string(), "7647d9bd  empty\n");
//! ```

use std::io::{self, Read};
use std::path::Path;

// Re-export the core algorithm
pub use vectorhash_core as algorithm;

#[cfg(feature = "cli")]
pub mod batch;
pub mod buffer;
pub mod checksum;
pub mod input;
pub mod options;

// Convenience re-exports
pub use algorithm::{DEFAULT_SEED, Digest, Tier, TierRequest, VectorHash, Width, hash};

/// Read `reader` to the end into aligned memory and hash it.
pub fn digest_reader<R: Read>(hasher: &VectorHash, reader: R) -> io::Result<Digest> {
    digest_input(hasher, &input::Input::read(reader)?)
}

/// Hash the file at `path`; `-` is standard input.
pub fn digest_path(hasher: &VectorHash, path: &Path) -> io::Result<Digest> {
    let input = if path == Path::new("-") {
        input::Input::read(io::stdin().lock())?
    } else {
        input::Input::open(path)?
    };
    digest_input(hasher, &input)
}

fn digest_input(hasher: &VectorHash, input: &input::Input) -> io::Result<Digest> {
    tracing::debug!(
        len = input.len(),
        mapped = input.is_mapped(),
        tier = hasher.tier_for(input).name(),
        "hashing input"
    );
    Ok(hasher.hash(input))
}
