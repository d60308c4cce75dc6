//! Checksum line formatting
//!
//! Two layouts are supported, both compatible with the coreutils `*sum`
//! family:
//!
//! ```text
//! 7647d9bd  empty.txt              default, text mode
//! 7647d9bd *empty.txt              default, binary mode
//! VH32 (empty.txt) = 7647d9bd      tagged
//! ```
//!
//! A file name containing a backslash or newline is escaped, and the whole
//! line is then prefixed with a backslash. Zero-terminated output is never
//! escaped.

use std::borrow::Cow;
use std::fmt;

use crate::algorithm::Digest;
use crate::options::ReadMode;

/// Output layout settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LineStyle {
    /// BSD-style `VH<w> (<name>) = <hex>` lines
    pub tagged: bool,
    pub mode: ReadMode,
    /// End lines with NUL instead of newline
    pub zero_terminated: bool,
}

/// One output line, terminator included.
#[derive(Debug, Clone, Copy)]
pub struct ChecksumLine<'a> {
    digest: &'a Digest,
    name: &'a str,
    style: LineStyle,
}

impl<'a> ChecksumLine<'a> {
    pub fn new(digest: &'a Digest, name: &'a str, style: LineStyle) -> Self {
        Self {
            digest,
            name,
            style,
        }
    }
}

/// Escape `\` and newline in a file name.
pub fn escape_name(name: &str) -> Cow<'_, str> {
    if !name.contains(['\\', '\n']) {
        return Cow::Borrowed(name);
    }
    let mut out = String::with_capacity(name.len() + 2);
    for c in name.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

impl fmt::Display for ChecksumLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = if self.style.zero_terminated {
            Cow::Borrowed(self.name)
        } else {
            escape_name(self.name)
        };
        if matches!(name, Cow::Owned(_)) {
            f.write_str("\\")?;
        }

        if self.style.tagged {
            write!(
                f,
                "VH{} ({}) = {}",
                self.digest.width().bits(),
                name,
                self.digest
            )?;
        } else {
            write!(f, "{} {}{}", self.digest, self.style.mode.marker(), name)?;
        }

        f.write_str(if self.style.zero_terminated { "\0" } else { "\n" })
    }
}
