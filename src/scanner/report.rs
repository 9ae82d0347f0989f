//! Scan results: titles and the issues met while producing them.

use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Where a title's language set came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageSource {
    /// Read from the clip's stream tags.
    Detected,
    /// Substituted from the configured defaults.
    Fallback,
}

/// One selectable playback program on the disc.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Title {
    /// Zero-based position after sorting.
    pub id: usize,
    /// Playlist file name, e.g. `00800.mpls`.
    pub source_filename: String,
    pub playlist_path: PathBuf,
    pub duration_seconds: f64,
    /// Sum of the sizes of the clip files that exist.
    pub size_bytes: u64,
    /// Clip ids in play order.
    pub clips: Vec<String>,
    pub audio_languages: BTreeSet<String>,
    pub subtitle_languages: BTreeSet<String>,
    pub audio_source: LanguageSource,
    pub subtitle_source: LanguageSource,
}

impl Title {
    /// True when either language set is a substituted default.
    pub fn uses_fallback_languages(&self) -> bool {
        self.audio_source == LanguageSource::Fallback
            || self.subtitle_source == LanguageSource::Fallback
    }
}

/// A non-fatal problem recorded during a scan.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScanIssue {
    /// `BDMV/PLAYLIST` or `BDMV/STREAM` is absent under the root.
    StructureMissing { root: PathBuf },

    /// The playlist could not be read to the end.
    MalformedPlaylist {
        playlist: String,
        reason: String,
        items_kept: usize,
    },

    /// A referenced clip file does not exist; it adds nothing to the size.
    ClipFileMissing { playlist: String, clip_id: String },

    /// The probe tool could not be started.
    ProbeUnavailable { playlist: String, reason: String },

    /// The probe ran but failed or returned unusable output.
    ProbeFailed { playlist: String, reason: String },

    /// The probe did not answer within the configured limit.
    ProbeTimeout { playlist: String, timeout_secs: f64 },
}

impl ScanIssue {
    pub(crate) fn probe_timeout(playlist: impl Into<String>, after: Duration) -> Self {
        Self::ProbeTimeout {
            playlist: playlist.into(),
            timeout_secs: after.as_secs_f64(),
        }
    }

    /// The playlist this issue concerns, if any.
    pub fn playlist(&self) -> Option<&str> {
        match self {
            Self::StructureMissing { .. } => None,
            Self::MalformedPlaylist { playlist, .. }
            | Self::ClipFileMissing { playlist, .. }
            | Self::ProbeUnavailable { playlist, .. }
            | Self::ProbeFailed { playlist, .. }
            | Self::ProbeTimeout { playlist, .. } => Some(playlist),
        }
    }
}

impl fmt::Display for ScanIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StructureMissing { root } => {
                write!(f, "no BDMV/PLAYLIST and BDMV/STREAM under {}", root.display())
            }
            Self::MalformedPlaylist {
                playlist,
                reason,
                items_kept,
            } => write!(
                f,
                "{playlist}: malformed playlist ({reason}), kept {items_kept} play item(s)"
            ),
            Self::ClipFileMissing { playlist, clip_id } => {
                write!(f, "{playlist}: clip {clip_id} not found")
            }
            Self::ProbeUnavailable { playlist, reason } => {
                write!(f, "{playlist}: probe unavailable ({reason}), using fallback languages")
            }
            Self::ProbeFailed { playlist, reason } => {
                write!(f, "{playlist}: probe failed ({reason}), using fallback languages")
            }
            Self::ProbeTimeout {
                playlist,
                timeout_secs,
            } => write!(
                f,
                "{playlist}: probe timed out after {timeout_secs:.1}s, using fallback languages"
            ),
        }
    }
}

/// Everything a scan produced.
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub root: PathBuf,
    /// Playlist files found under `BDMV/PLAYLIST`.
    pub playlists_found: usize,
    /// Titles ordered by descending duration, ids `0..n`.
    pub titles: Vec<Title>,
    pub issues: Vec<ScanIssue>,
    /// The scan stopped early; `titles` holds what was resolved before.
    pub cancelled: bool,
}

impl ScanReport {
    pub(crate) fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            playlists_found: 0,
            titles: Vec::new(),
            issues: Vec::new(),
            cancelled: false,
        }
    }

    /// False when the root did not contain a disc structure.
    pub fn is_disc(&self) -> bool {
        !self
            .issues
            .iter()
            .any(|i| matches!(i, ScanIssue::StructureMissing { .. }))
    }

    /// Combined size of all listed titles.
    pub fn total_size_bytes(&self) -> u64 {
        self.titles.iter().map(|t| t.size_bytes).sum()
    }
}
