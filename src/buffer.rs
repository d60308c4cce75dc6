//! 64-byte aligned input buffer
//!
//! File contents read into a plain `Vec<u8>` usually land on a 16-byte
//! boundary, which would keep the 256 and 512-bit tiers from running.
//! `AlignedBuffer` stores bytes in 64-byte aligned chunks so every tier can
//! read the data in place.

use std::io::{self, Read};
use std::ops::Deref;

const ALIGN: usize = 64;
const READ_CHUNK: usize = 64 * 1024;

#[derive(Clone, Copy)]
#[repr(C, align(64))]
struct Chunk([u8; ALIGN]);

const EMPTY: Chunk = Chunk([0u8; ALIGN]);

/// Owned byte buffer whose first byte is 64-byte aligned.
#[derive(Clone, Default)]
pub struct AlignedBuffer {
    chunks: Vec<Chunk>,
    len: usize,
}

impl AlignedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy `data` into a new aligned buffer.
    pub fn from_slice(data: &[u8]) -> Self {
        let mut buf = Self {
            chunks: vec![EMPTY; data.len().div_ceil(ALIGN)],
            len: data.len(),
        };
        buf.storage_mut()[..data.len()].copy_from_slice(data);
        buf
    }

    /// Read `reader` to the end.
    pub fn from_reader<R: Read>(mut reader: R) -> io::Result<Self> {
        let mut buf = Self::new();
        loop {
            if buf.len == buf.capacity() {
                buf.grow();
            }
            let len = buf.len;
            match reader.read(&mut buf.storage_mut()[len..]) {
                Ok(0) => break,
                Ok(n) => buf.len += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(buf)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.storage()[..self.len]
    }

    fn capacity(&self) -> usize {
        self.chunks.len() * ALIGN
    }

    fn grow(&mut self) {
        let extra = (self.chunks.len()).max(READ_CHUNK / ALIGN);
        self.chunks.resize(self.chunks.len() + extra, EMPTY);
    }

    fn storage(&self) -> &[u8] {
        // SAFETY: `Chunk` is a `repr(C)` byte array whose size equals its
        // alignment, so the chunks form one contiguous, initialized byte run.
        unsafe { std::slice::from_raw_parts(self.chunks.as_ptr().cast::<u8>(), self.capacity()) }
    }

    fn storage_mut(&mut self) -> &mut [u8] {
        let capacity = self.capacity();
        // SAFETY: see `storage`.
        unsafe { std::slice::from_raw_parts_mut(self.chunks.as_mut_ptr().cast::<u8>(), capacity) }
    }
}

impl Deref for AlignedBuffer {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl AsRef<[u8]> for AlignedBuffer {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl std::fmt::Debug for AlignedBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlignedBuffer").field("len", &self.len).finish()
    }
}
