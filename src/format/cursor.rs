//! Sequential little-endian reads over an in-memory buffer.
//!
//! DICOM explicit-VR little-endian files are decoded as one linear pass
//! over a resident buffer. [`ByteCursor`] wraps the buffer with a mutable
//! position and bounds-checks every advancement: a read that cannot be
//! satisfied returns [`Truncated`] and leaves the position untouched.
//!
//! The buffer is a [`Bytes`] handle, so slicing a value out of it
//! ([`ByteCursor::take`]) is zero-copy.

use bytes::Bytes;

use crate::error::Truncated;

// =============================================================================
// ByteCursor
// =============================================================================

/// A bounds-checked forward reader over an immutable byte buffer.
///
/// All multi-byte reads are little-endian, the only byte order this crate
/// supports. The cursor never reads past the end of the buffer and never
/// advances on a failed read.
#[derive(Debug, Clone)]
pub struct ByteCursor {
    data: Bytes,
    pos: usize,
}

impl ByteCursor {
    /// Create a cursor positioned at the start of `data`.
    pub fn new(data: Bytes) -> Self {
        Self { data, pos: 0 }
    }

    /// Current read position in bytes from the start of the buffer.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left between the position and the end of the buffer.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    /// Total buffer length.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the underlying buffer is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Move the position to an absolute offset.
    ///
    /// The offset is clamped to the buffer length so the cursor can never
    /// point past the end.
    pub fn seek(&mut self, offset: usize) {
        self.pos = offset.min(self.data.len());
    }

    /// Move the position backwards by `n` bytes, saturating at zero.
    ///
    /// Used by the defensive resynchronization paths when an expected item
    /// marker does not appear (4 bytes in sequences, 8 in pixel data).
    pub fn rewind(&mut self, n: usize) {
        self.pos = self.pos.saturating_sub(n);
    }

    /// Advance past `n` bytes without looking at them.
    pub fn skip(&mut self, n: usize) -> Result<(), Truncated> {
        self.check(n)?;
        self.pos += n;
        Ok(())
    }

    /// Read a little-endian u16 and advance by 2.
    pub fn read_u16_le(&mut self) -> Result<u16, Truncated> {
        self.check(2)?;
        let v = u16::from_le_bytes([self.data[self.pos], self.data[self.pos + 1]]);
        self.pos += 2;
        Ok(v)
    }

    /// Read a little-endian u32 and advance by 4.
    pub fn read_u32_le(&mut self) -> Result<u32, Truncated> {
        self.check(4)?;
        let v = u32::from_le_bytes([
            self.data[self.pos],
            self.data[self.pos + 1],
            self.data[self.pos + 2],
            self.data[self.pos + 3],
        ]);
        self.pos += 4;
        Ok(v)
    }

    /// Read `n` bytes as a trimmed ASCII string and advance by `n`.
    ///
    /// Decoding is best-effort: non-ASCII input yields an empty string
    /// rather than an error, so a malformed text field can never abort the
    /// parse. Leading and trailing whitespace and control characters
    /// (DICOM pads text values with spaces and NULs) are trimmed.
    pub fn read_str(&mut self, n: usize) -> Result<String, Truncated> {
        let raw = self.take(n)?;
        Ok(decode_trimmed_ascii(&raw))
    }

    /// Take `n` bytes as a zero-copy slice of the buffer and advance by `n`.
    pub fn take(&mut self, n: usize) -> Result<Bytes, Truncated> {
        self.check(n)?;
        let slice = self.data.slice(self.pos..self.pos + n);
        self.pos += n;
        Ok(slice)
    }

    /// Peek at the next `n` bytes without advancing.
    pub fn peek(&self, n: usize) -> Option<&[u8]> {
        if self.remaining() >= n {
            Some(&self.data[self.pos..self.pos + n])
        } else {
            None
        }
    }

    #[inline]
    fn check(&self, needed: usize) -> Result<(), Truncated> {
        let remaining = self.remaining();
        if remaining < needed {
            return Err(Truncated {
                offset: self.pos,
                needed,
                remaining,
            });
        }
        Ok(())
    }
}

/// Decode bytes as ASCII, trimming whitespace and control characters.
///
/// Returns an empty string when the input is not ASCII.
fn decode_trimmed_ascii(raw: &[u8]) -> String {
    if !raw.is_ascii() {
        return String::new();
    }
    let text: &str = std::str::from_utf8(raw).unwrap_or_default();
    text.trim_matches(|c: char| c.is_ascii_whitespace() || c.is_ascii_control())
        .to_string()
}

// =============================================================================
// Tests
// =============================================================================
