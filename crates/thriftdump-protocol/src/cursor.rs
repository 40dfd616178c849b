//! Forward-only byte cursor.
//!
//! [`ByteCursor`] is the only thing in this crate that indexes into the raw
//! message buffer. Every reader above it (primitives, collections, structs,
//! the envelope) goes through [`ByteCursor::read_exact`].
//!
//! ```text
//!   buf: [80 01 00 01 00 00 00 04 70 69 6e 67 ...]
//!                    ^
//!                    position (only ever moves right)
//! ```

use crate::error::{DecodeError, DecodeResult};

/// Sequential reader over an in-memory message buffer.
///
/// There is no seeking and no peeking: the decoder is single pass. The
/// position never decreases and never exceeds `buf.len()`.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    buf: &'a [u8],
    position: usize,
}

impl<'a> ByteCursor<'a> {
    /// Creates a cursor positioned at the start of `buf`.
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, position: 0 }
    }

    /// Current read offset from the start of the buffer.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Number of unread bytes.
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.position
    }

    /// Returns `true` once every byte has been consumed.
    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }

    /// Returns the next `n` bytes and advances past them.
    ///
    /// # Errors
    /// Returns [`DecodeError::TruncatedInput`] if fewer than `n` bytes
    /// remain. The position is left untouched in that case.
    pub fn read_exact(&mut self, n: usize) -> DecodeResult<&'a [u8]> {
        let remaining = self.remaining();
        if n > remaining {
            return Err(DecodeError::TruncatedInput {
                offset: self.position,
                needed: n,
                remaining,
            });
        }
        let start = self.position;
        self.position += n;
        Ok(&self.buf[start..self.position])
    }

    /// Reads exactly `N` bytes into a fixed-size array.
    pub(crate) fn read_array<const N: usize>(&mut self) -> DecodeResult<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_exact(N)?);
        Ok(out)
    }
}
