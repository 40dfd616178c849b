//! Reading inputs and decoding them.
//!
//! Decoding needs the whole message in memory, so each input is read in
//! full first. Inputs are independent: a failure on one is reported for
//! that input only, and the rest of the batch carries on.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures_util::future::join_all;
use thriftdump_protocol::{DecodedMessage, DecoderConfig, decode_with_config};

use crate::ThriftdumpError;

/// Decodes an in-memory buffer.
pub fn inspect_bytes(
    bytes: &[u8],
    config: &DecoderConfig,
) -> Result<DecodedMessage, ThriftdumpError> {
    Ok(decode_with_config(bytes, config)?)
}

/// Reads `path` completely and decodes it.
///
/// # Errors
/// [`ThriftdumpError::Io`] if the file cannot be read,
/// [`ThriftdumpError::Decode`] if its contents are malformed.
pub fn inspect_file(
    path: impl AsRef<Path>,
    config: &DecoderConfig,
) -> Result<DecodedMessage, ThriftdumpError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| ThriftdumpError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), len = bytes.len(), "read input");
    inspect_bytes(&bytes, config)
}

/// Outcome for one input of a batch.
#[derive(Debug)]
pub struct Inspection {
    pub path: PathBuf,
    pub result: Result<DecodedMessage, ThriftdumpError>,
}

/// Decodes every file concurrently on the blocking thread pool.
///
/// Results come back in the same order as `paths`, whatever order the
/// decodes finish in. Each decode has its own cursor and struct table, so
/// nothing is shared between tasks except the read-only config.
pub async fn inspect_files<I, P>(paths: I, config: DecoderConfig) -> Vec<Inspection>
where
    I: IntoIterator<Item = P>,
    P: Into<PathBuf>,
{
    let config = Arc::new(config);
    let tasks = paths.into_iter().map(|path| {
        let path: PathBuf = path.into();
        let config = Arc::clone(&config);
        async move {
            let task_path = path.clone();
            let result =
                tokio::task::spawn_blocking(move || inspect_file(&task_path, &config)).await;
            let result = match result {
                Ok(inner) => inner,
                Err(join_err) => Err(ThriftdumpError::from(join_err)),
            };
            if let Err(e) = &result {
                tracing::debug!(path = %path.display(), error = %e, "inspection failed");
            }
            Inspection { path, result }
        }
    });
    join_all(tasks).await
}
