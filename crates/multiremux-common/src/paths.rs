//! Path utilities for the BDMV directory layout.
//!
//! A Blu-ray movie structure keeps its playlists in `BDMV/PLAYLIST/*.mpls`
//! and the clips they reference in `BDMV/STREAM/*.m2ts`. These helpers name
//! those directories and classify files by extension.

use std::path::Path;

/// Top-level disc movie directory.
pub const BDMV_DIR: &str = "BDMV";

/// Playlist directory beneath [`BDMV_DIR`].
pub const PLAYLIST_DIR: &str = "PLAYLIST";

/// Clip directory beneath [`BDMV_DIR`].
pub const STREAM_DIR: &str = "STREAM";

/// Default playlist file extension.
pub const PLAYLIST_EXTENSION: &str = "mpls";

/// Default clip (MPEG-2 transport stream) extension.
pub const MEDIA_EXTENSION: &str = "m2ts";

/// Check whether `path` has the given extension, ignoring case.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use multiremux_common::paths::has_extension;
///
/// assert!(has_extension(Path::new("00001.M2TS"), "m2ts"));
/// assert!(!has_extension(Path::new("00001"), "m2ts"));
/// ```
pub fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(extension.trim_start_matches('.')))
        .unwrap_or(false)
}

/// Check if a path has the default playlist extension.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use multiremux_common::paths::is_playlist_file;
///
/// assert!(is_playlist_file(Path::new("BDMV/PLAYLIST/00800.mpls")));
/// assert!(!is_playlist_file(Path::new("BDMV/STREAM/00001.m2ts")));
/// ```
pub fn is_playlist_file(path: &Path) -> bool {
    has_extension(path, PLAYLIST_EXTENSION)
}

/// Check whether a path's final component is the `BDMV` directory name.
pub fn is_bdmv_dir_name(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| n == BDMV_DIR)
        .unwrap_or(false)
}
