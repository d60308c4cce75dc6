//! Digest value and its renderings

#[cfg(not(feature = "std"))]
use alloc::string::String;
#[cfg(not(feature = "std"))]
use alloc::vec;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use core::fmt;

use crate::error::Error;
use crate::params::{MAX_DIGEST_WORDS, Width};

/// A finished VectorHash digest.
///
/// The digest is a sequence of `width / 32` words. The hex rendering prints
/// each word as 8 lowercase hex digits, first word first; the raw byte form
/// stores each word little-endian.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digest {
    width: Width,
    words: [u32; MAX_DIGEST_WORDS],
}

impl Digest {
    pub(crate) fn from_words(width: Width, words: &[u32]) -> Self {
        debug_assert_eq!(words.len(), width.digest_words());
        let mut all = [0u32; MAX_DIGEST_WORDS];
        all[..words.len()].copy_from_slice(words);
        Self { width, words: all }
    }

    /// Parse a hex digest of the given width.
    ///
    /// Accepts upper or lower case. The string must be exactly
    /// `width.hex_len()` characters long.
    pub fn from_hex(width: Width, s: &str) -> Result<Self, Error> {
        if s.len() != width.hex_len() {
            return Err(Error::InvalidDigestLength {
                expected: width.hex_len(),
                actual: s.len(),
            });
        }

        let mut bytes = [0u8; 4 * MAX_DIGEST_WORDS];
        hex::decode_to_slice(s, &mut bytes[..width.bytes()])?;

        let mut words = [0u32; MAX_DIGEST_WORDS];
        for (word, be) in words.iter_mut().zip(bytes[..width.bytes()].chunks_exact(4)) {
            *word = u32::from_be_bytes([be[0], be[1], be[2], be[3]]);
        }
        Ok(Self { width, words })
    }

    #[inline]
    pub fn width(&self) -> Width {
        self.width
    }

    /// Digest words in output order
    #[inline]
    pub fn words(&self) -> &[u32] {
        &self.words[..self.width.digest_words()]
    }

    /// Write the little-endian bytes of every word into `out`.
    ///
    /// # Panics
    /// If `out` is shorter than `width.bytes()`.
    pub fn write_le_bytes(&self, out: &mut [u8]) {
        assert!(
            out.len() >= self.width.bytes(),
            "output buffer of {} bytes too small for {}",
            out.len(),
            self.width
        );
        for (word, dst) in self.words().iter().zip(out.chunks_exact_mut(4)) {
            dst.copy_from_slice(&word.to_le_bytes());
        }
    }

    /// Raw digest bytes (little-endian words)
    pub fn to_le_bytes(&self) -> Vec<u8> {
        let mut out = vec![0u8; self.width.bytes()];
        self.write_le_bytes(&mut out);
        out
    }

    /// Lowercase hex, as printed by `vhsum`
    pub fn to_hex(&self) -> String {
        let be: Vec<u8> = self.words().iter().flat_map(|w| w.to_be_bytes()).collect();
        hex::encode(be)
    }
}

impl fmt::LowerHex for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for word in self.words() {
            write!(f, "{word:08x}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(self, f)
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({}, {:x})", self.width, self)
    }
}
