use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::config::ExtractOptions;
use crate::error::{Error, Result};
use super::{extract_bytes, Dataset, DatasetKind};

/// A dataset being decoded on its own thread.
pub struct DecodeJob {
    kind: DatasetKind,
    handle: JoinHandle<Result<Dataset>>,
}

impl DecodeJob {
    #[inline] pub fn kind(&self) -> DatasetKind { self.kind }

    /// Block until the decode finishes.
    pub fn join(self) -> Result<Dataset> {
        let kind = self.kind;
        self.handle.join().map_err(|_| Error::WorkerPanicked(kind))?
    }
}

/// Decode `bytes` as `kind` on a dedicated background thread.
pub fn spawn_decode(bytes: Arc<[u8]>, kind: DatasetKind, options: ExtractOptions) -> Result<DecodeJob> {
    let handle = thread::Builder::new()
        .name(format!("decode-{kind}"))
        .spawn(move || {
            let started = std::time::Instant::now();
            let result = extract_bytes(&bytes, kind, &options);
            match &result {
                Ok(dataset) => tracing::debug!(%kind, features = dataset.len(), elapsed = ?started.elapsed(), "decode finished"),
                Err(err) => tracing::warn!(%kind, error = %err, "decode failed"),
            }
            result
        })?;
    Ok(DecodeJob { kind, handle })
}
