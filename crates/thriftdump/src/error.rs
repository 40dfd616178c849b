//! Unified error type for the thriftdump facade.

use std::path::PathBuf;

use thriftdump_protocol::DecodeError;

/// Errors produced while rendering a decoded message.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// JSON serialization failed.
    #[cfg(feature = "json")]
    #[error("json render failed: {0}")]
    Json(#[from] serde_json::Error),

    /// The requested output format name is not one we know.
    #[error("unknown output format {0:?} (expected \"text\" or \"json\")")]
    UnknownFormat(String),
}

/// Top-level error that wraps everything that can go wrong for one input.
///
/// The `#[from]` attributes let `?` lift decoder and renderer errors
/// straight into this type.
#[derive(Debug, thiserror::Error)]
pub enum ThriftdumpError {
    /// Reading the input file failed.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The bytes are not a well-formed binary protocol message.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The decoded message could not be rendered.
    #[error(transparent)]
    Report(#[from] ReportError),

    /// The blocking decode task panicked or was cancelled.
    #[error("decode task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
