//! Decoder configuration.

use serde::{Deserialize, Serialize};

/// Default limit on struct/collection nesting.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Knobs for a single decode call.
///
/// `#[serde(default)]` lets a config file specify only the fields it
/// cares about; anything missing falls back to [`DecoderConfig::default`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoderConfig {
    /// How many structs/collections may be nested below the top-level
    /// argument struct. The top-level struct itself is depth 0.
    ///
    /// The binary protocol puts no bound on nesting, but an unbounded
    /// recursive walk lets a hostile buffer exhaust the stack. Exceeding
    /// this limit fails the decode with
    /// [`DecodeError::MaxDepthExceeded`](crate::DecodeError::MaxDepthExceeded).
    pub max_depth: usize,
}

impl DecoderConfig {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}
