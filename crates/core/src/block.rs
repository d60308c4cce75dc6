//! Block splitting and padding
//!
//! The input is consumed in place as whole blocks. Whatever is left (possibly
//! nothing) is copied into an aligned scratch block and padded with a byte
//! counter, and that block is always mixed once more after the full ones.

use core::slice::ChunksExact;

use crate::params::{MAX_BLOCK_BYTES, Width};
use crate::primitives::pad_block;
use crate::tier::Tier;

/// Scratch block holding the padded tail, aligned for every tier.
#[repr(C, align(64))]
pub(crate) struct PaddedBlock {
    bytes: [u8; MAX_BLOCK_BYTES],
}

impl PaddedBlock {
    fn new(rest: &[u8], block_bytes: usize) -> Self {
        let mut block = Self {
            bytes: [0u8; MAX_BLOCK_BYTES],
        };
        pad_block(rest, &mut block.bytes[..block_bytes]);
        block
    }
}

/// Input viewed as whole blocks plus the padded tail.
///
/// This is the only place where the input buffer is inspected for alignment;
/// everything downstream trusts the tier stored here.
pub(crate) struct Blocks<'a> {
    full: &'a [u8],
    tail: PaddedBlock,
    width: Width,
    tier: Tier,
}

impl<'a> Blocks<'a> {
    /// Split `input` into blocks for `width`.
    ///
    /// # Panics
    /// If `input` is not aligned for `tier`. The tier selector never picks
    /// such a tier, so this is a broken internal contract.
    pub(crate) fn new(input: &'a [u8], width: Width, tier: Tier) -> Self {
        assert!(
            tier.is_aligned(input.as_ptr() as usize),
            "input at {:p} is not aligned for the {} tier",
            input.as_ptr(),
            tier.name()
        );

        let block_bytes = width.block_bytes();
        let full_len = input.len() - input.len() % block_bytes;
        let (full, rest) = input.split_at(full_len);

        Self {
            full,
            tail: PaddedBlock::new(rest, block_bytes),
            width,
            tier,
        }
    }

    #[inline(always)]
    pub(crate) fn width(&self) -> Width {
        self.width
    }

    #[inline(always)]
    pub(crate) fn tier(&self) -> Tier {
        self.tier
    }

    /// Whole blocks taken directly from the input
    #[inline(always)]
    pub(crate) fn full(&self) -> ChunksExact<'a, u8> {
        self.full.chunks_exact(self.width.block_bytes())
    }

    /// The padded final block
    #[inline(always)]
    pub(crate) fn tail(&self) -> &[u8] {
        &self.tail.bytes[..self.width.block_bytes()]
    }

    /// Number of blocks that will be mixed, tail included
    pub(crate) fn count(&self) -> usize {
        self.full.len() / self.width.block_bytes() + 1
    }
}
