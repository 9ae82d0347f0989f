//! Discovery of the `BDMV/PLAYLIST` and `BDMV/STREAM` directories.

use multiremux_common::paths::{
    has_extension, is_bdmv_dir_name, BDMV_DIR, PLAYLIST_DIR, STREAM_DIR,
};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Located directories of a disc structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscLayout {
    pub bdmv_dir: PathBuf,
    pub playlist_dir: PathBuf,
    pub stream_dir: PathBuf,
}

impl DiscLayout {
    /// Locate the disc directories under `root`.
    ///
    /// `root` may be the disc folder (containing `BDMV`) or the `BDMV`
    /// directory itself. Returns `None` when `BDMV`, `PLAYLIST` or `STREAM` is
    /// missing; most folders handed to a scanner are not discs, so this is
    /// not an error.
    pub fn locate(root: &Path) -> Option<Self> {
        let bdmv_dir = if is_bdmv_dir_name(root) {
            root.to_path_buf()
        } else {
            root.join(BDMV_DIR)
        };

        if !bdmv_dir.is_dir() {
            info!(path = %root.display(), "No BDMV directory found");
            return None;
        }

        let playlist_dir = bdmv_dir.join(PLAYLIST_DIR);
        let stream_dir = bdmv_dir.join(STREAM_DIR);
        if !playlist_dir.is_dir() || !stream_dir.is_dir() {
            info!(
                path = %bdmv_dir.display(),
                has_playlist = playlist_dir.is_dir(),
                has_stream = stream_dir.is_dir(),
                "BDMV directory is missing PLAYLIST or STREAM"
            );
            return None;
        }

        Some(Self {
            bdmv_dir,
            playlist_dir,
            stream_dir,
        })
    }

    /// List playlist files with the given extension, in directory order.
    pub fn playlists(&self, extension: &str) -> Vec<PathBuf> {
        let mut found = Vec::new();

        for entry in WalkDir::new(&self.playlist_dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(dir = %self.playlist_dir.display(), error = %e, "Failed to read playlist entry");
                    continue;
                }
            };

            if entry.file_type().is_file() && has_extension(entry.path(), extension) {
                found.push(entry.into_path());
            }
        }

        debug!(dir = %self.playlist_dir.display(), count = found.len(), "Enumerated playlists");
        found
    }

    /// Path of the clip file a play item refers to.
    pub fn clip_path(&self, clip_id: &str, media_extension: &str) -> PathBuf {
        clip_path(&self.stream_dir, clip_id, media_extension)
    }
}

/// `<stream_dir>/<clip_id>.<media_extension>`.
pub fn clip_path(stream_dir: &Path, clip_id: &str, media_extension: &str) -> PathBuf {
    stream_dir.join(format!(
        "{clip_id}.{}",
        media_extension.trim_start_matches('.')
    ))
}
