//! Scalar readers for the binary protocol.
//!
//! All integers are big-endian two's complement. Strings are an `i32`
//! byte length followed by that many UTF-8 bytes.

use crate::cursor::ByteCursor;
use crate::error::{DecodeError, DecodeResult};

impl ByteCursor<'_> {
    /// Reads one byte; any nonzero value is `true`.
    pub fn read_bool(&mut self) -> DecodeResult<bool> {
        Ok(self.read_byte()? != 0)
    }

    pub fn read_byte(&mut self) -> DecodeResult<u8> {
        let [b] = self.read_array::<1>()?;
        Ok(b)
    }

    pub fn read_i16(&mut self) -> DecodeResult<i16> {
        self.read_array().map(i16::from_be_bytes)
    }

    pub fn read_i32(&mut self) -> DecodeResult<i32> {
        self.read_array().map(i32::from_be_bytes)
    }

    pub fn read_i64(&mut self) -> DecodeResult<i64> {
        self.read_array().map(i64::from_be_bytes)
    }

    /// Reads an IEEE-754 binary64 value.
    pub fn read_double(&mut self) -> DecodeResult<f64> {
        self.read_array().map(f64::from_be_bytes)
    }

    /// Reads an `i32` length prefix and rejects negative values.
    ///
    /// Shared by strings and collection counts.
    pub fn read_length(&mut self) -> DecodeResult<usize> {
        let offset = self.position();
        let length = self.read_i32()?;
        usize::try_from(length).map_err(|_| DecodeError::InvalidLength { length, offset })
    }

    /// Reads a length-prefixed UTF-8 string.
    ///
    /// # Errors
    /// - [`DecodeError::InvalidLength`] for a negative length
    /// - [`DecodeError::TruncatedInput`] if the body is short
    /// - [`DecodeError::InvalidEncoding`] if the body is not UTF-8
    pub fn read_string(&mut self) -> DecodeResult<String> {
        let length = self.read_length()?;
        let offset = self.position();
        let bytes = self.read_exact(length)?;
        std::str::from_utf8(bytes)
            .map(str::to_owned)
            .map_err(|source| DecodeError::InvalidEncoding { offset, source })
    }
}
