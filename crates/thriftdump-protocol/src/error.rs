//! Error and warning types for the decoder.
//!
//! Every error carries the byte offset at which the offending read started.
//! Once a decode goes wrong there is no way to resynchronize with the
//! stream (payload length depends on the type tag), so the offset is the
//! most useful thing we can hand back to whoever is staring at a hex dump.

use std::str::Utf8Error;

use serde::{Deserialize, Serialize};

/// Errors that abort a decode.
///
/// All of these are fatal to the current decode call and propagate
/// unchanged through every level of struct/collection recursion. No
/// partially decoded message is ever returned alongside one of them.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// Fewer bytes remain than a fixed-width or length-prefixed read needs.
    #[error(
        "truncated input at offset {offset}: needed {needed} bytes, {remaining} remaining"
    )]
    TruncatedInput {
        offset: usize,
        needed: usize,
        remaining: usize,
    },

    /// A string length or collection count was negative.
    #[error("invalid length {length} at offset {offset}")]
    InvalidLength { length: i32, offset: usize },

    /// String bytes are not valid UTF-8.
    #[error("invalid utf-8 string at offset {offset}: {source}")]
    InvalidEncoding {
        offset: usize,
        #[source]
        source: Utf8Error,
    },

    /// A type tag byte has no entry in the type registry.
    #[error("unknown type tag {code} at offset {offset}")]
    UnknownType { code: u8, offset: usize },

    /// The message type in the envelope is not call, reply or oneway.
    #[error("unknown message kind {kind} at offset {offset}")]
    UnknownMessageKind { kind: i16, offset: usize },

    /// Structs or collections are nested deeper than the configured limit.
    #[error("maximum nesting depth {max_depth} exceeded at offset {offset}")]
    MaxDepthExceeded { max_depth: usize, offset: usize },
}

impl DecodeError {
    /// Byte offset of the read that failed.
    pub fn offset(&self) -> usize {
        match self {
            Self::TruncatedInput { offset, .. }
            | Self::InvalidLength { offset, .. }
            | Self::InvalidEncoding { offset, .. }
            | Self::UnknownType { offset, .. }
            | Self::UnknownMessageKind { offset, .. }
            | Self::MaxDepthExceeded { offset, .. } => *offset,
        }
    }
}

/// Convenience alias used by every reader in this crate.
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Recoverable oddities noticed while decoding.
///
/// Warnings do not stop the decode. They are collected on the
/// [`DecodedMessage`](crate::DecodedMessage) and logged through `tracing`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DecodeWarning {
    /// The envelope version was not the strict binary protocol marker.
    VersionMismatch { expected: i16, found: i16 },
}

impl std::fmt::Display for DecodeWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::VersionMismatch { expected, found } => write!(
                f,
                "unexpected version {found:#06x} (expected {expected:#06x})",
                found = *found as u16,
                expected = *expected as u16,
            ),
        }
    }
}
