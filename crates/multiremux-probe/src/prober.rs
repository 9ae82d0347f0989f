//! The [`StreamProbe`] trait defining the interface for clip stream probing.

use std::path::Path;

use async_trait::async_trait;
use multiremux_common::StreamDescriptor;

use crate::Result;

/// Something that can list the streams inside a clip file.
///
/// Implementations must be safe to share across tasks (`Send + Sync`).
/// Callers should bound each call with their own timeout; a probe is free to
/// take as long as the underlying tool does.
#[async_trait]
pub trait StreamProbe: Send + Sync {
    /// Human-readable name identifying this probe implementation.
    fn name(&self) -> &'static str;

    /// List the streams in the file at `path` with their language tags.
    async fn probe(&self, path: &Path) -> Result<Vec<StreamDescriptor>>;
}
