//! File input for hashing
//!
//! Regular files are memory-mapped: mappings start on a page boundary, so
//! every tier applies and nothing is copied. Standard input, pipes, empty
//! files and anything the OS refuses to map are read into an
//! [`AlignedBuffer`] instead.

use std::fs::File;
use std::io::{self, Read};
use std::ops::Deref;
use std::path::Path;

use memmap2::Mmap;
use tracing::debug;

use crate::buffer::AlignedBuffer;

/// Bytes of one input, mapped or buffered.
#[derive(Debug)]
pub enum Input {
    Mapped(Mmap),
    Buffered(AlignedBuffer),
}

impl Input {
    /// Open `path`, mapping it when it is a non-empty regular file.
    pub fn open(path: &Path) -> io::Result<Self> {
        let file = File::open(path)?;
        let metadata = file.metadata()?;
        if !metadata.is_file() || metadata.len() == 0 {
            return Self::read(file);
        }

        // SAFETY: the mapping is read-only and dropped once the digest is
        // computed. Truncating the file while it is hashed is outside what a
        // checksum tool can guard against, as with any mmap-based reader.
        match unsafe { Mmap::map(&file) } {
            Ok(map) => Ok(Input::Mapped(map)),
            Err(e) => {
                debug!(path = %path.display(), error = %e, "mmap failed, reading instead");
                Self::read(file)
            }
        }
    }

    /// Read `reader` to the end into aligned memory.
    pub fn read<R: Read>(reader: R) -> io::Result<Self> {
        AlignedBuffer::from_reader(reader).map(Input::Buffered)
    }

    pub fn is_mapped(&self) -> bool {
        matches!(self, Input::Mapped(_))
    }
}

impl Deref for Input {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            Input::Mapped(map) => &map[..],
            Input::Buffered(buf) => buf.as_slice(),
        }
    }
}
