//! Clip file size resolution.

use crate::layout::clip_path;
use crate::mpls::PlayItem;
use std::path::Path;
use tracing::debug;

/// Sizes of the clips referenced by a playlist.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClipSizes {
    /// Sum of the sizes of every referenced clip that exists.
    pub total_bytes: u64,
    /// Clip ids whose file was not found, in play item order.
    pub missing: Vec<String>,
}

/// Add up the on-disk size of each play item's clip.
///
/// A clip referenced by several play items is counted once per item. Missing
/// clips contribute nothing and are listed in [`ClipSizes::missing`].
pub fn resolve_clip_sizes(
    stream_dir: &Path,
    items: &[PlayItem],
    media_extension: &str,
) -> ClipSizes {
    let mut sizes = ClipSizes::default();

    for item in items {
        let path = clip_path(stream_dir, &item.clip_id, media_extension);
        match std::fs::metadata(&path) {
            Ok(meta) if meta.is_file() => sizes.total_bytes += meta.len(),
            _ => {
                debug!(clip = %path.display(), "Clip file not found");
                sizes.missing.push(item.clip_id.clone());
            }
        }
    }

    sizes
}
