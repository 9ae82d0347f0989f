//! Disc scanning.
//!
//! [`DiscScanner::scan`] turns a folder holding a `BDMV` tree into an ordered
//! list of [`Title`]s:
//!
//! 1. locate `BDMV/PLAYLIST` and `BDMV/STREAM`
//! 2. parse every playlist and size its clips on the blocking pool
//! 3. probe the first clip of each long-enough title for languages
//! 4. filter, sort and number the titles
//!
//! Nothing short of a missing disc structure stops the scan; problems are
//! collected as [`ScanIssue`]s in the returned [`ScanReport`].

mod aggregate;
mod languages;
mod report;

pub use aggregate::assemble_titles;
pub use languages::{
    languages_of, FallbackLanguages, LanguageResolver, LanguageSet, ProbeFailure,
    ResolvedLanguages, DEFAULT_AUDIO_FALLBACK, DEFAULT_SUBTITLE_FALLBACK,
};
pub use report::{LanguageSource, ScanIssue, ScanReport, Title};

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use multiremux_bdmv::mpls::read_playlist_file;
use multiremux_bdmv::{resolve_clip_sizes, DiscLayout};
use multiremux_common::paths::{MEDIA_EXTENSION, PLAYLIST_EXTENSION};
use multiremux_probe::StreamProbe;
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;

/// Titles shorter than this are menus, trailers and warnings.
pub const DEFAULT_MIN_DURATION_SECS: f64 = 120.0;

/// Upper bound on a single probe call.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(30);

/// Tunables for a scan.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub min_duration_secs: f64,
    pub playlist_extension: String,
    pub media_extension: String,
    /// Playlists parsed and probed at once.
    pub workers: usize,
    pub probe_timeout: Duration,
    pub fallback: FallbackLanguages,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            min_duration_secs: DEFAULT_MIN_DURATION_SECS,
            playlist_extension: PLAYLIST_EXTENSION.to_string(),
            media_extension: MEDIA_EXTENSION.to_string(),
            workers: num_cpus::get(),
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            fallback: FallbackLanguages::default(),
        }
    }
}

/// Scans disc folders into title lists.
pub struct DiscScanner {
    options: ScanOptions,
    resolver: LanguageResolver,
}

/// State shared by the per-playlist tasks of one scan.
struct ScanContext {
    layout: DiscLayout,
    options: ScanOptions,
    resolver: LanguageResolver,
    semaphore: Semaphore,
}

/// What one playlist task produced.
#[derive(Default)]
struct PlaylistScan {
    title: Option<Title>,
    issues: Vec<ScanIssue>,
    cancelled: bool,
}

impl DiscScanner {
    /// Without a probe every title gets the fallback languages.
    pub fn new(options: ScanOptions, probe: Option<Arc<dyn StreamProbe>>) -> Self {
        let resolver =
            LanguageResolver::new(probe, options.probe_timeout, options.fallback.clone());
        Self { options, resolver }
    }

    /// Scan `root`, which may be the disc root or its `BDMV` directory.
    ///
    /// When `cancel` fires, no further playlists are started, in-flight
    /// probes are dropped and the titles completed so far are returned with
    /// [`ScanReport::cancelled`] set.
    pub async fn scan(&self, root: &Path, cancel: &CancellationToken) -> ScanReport {
        let mut report = ScanReport::new(root);

        let Some(layout) = DiscLayout::locate(root) else {
            report.issues.push(ScanIssue::StructureMissing {
                root: root.to_path_buf(),
            });
            return report;
        };

        let playlists = layout.playlists(&self.options.playlist_extension);
        report.playlists_found = playlists.len();
        tracing::info!(
            root = %root.display(),
            playlists = playlists.len(),
            probe = self.resolver.has_probe(),
            "Scanning disc"
        );

        let ctx = Arc::new(ScanContext {
            layout,
            options: self.options.clone(),
            resolver: self.resolver.clone(),
            semaphore: Semaphore::new(self.options.workers.max(1)),
        });

        let mut handles = Vec::with_capacity(playlists.len());
        for path in playlists {
            if cancel.is_cancelled() {
                break;
            }
            let ctx = ctx.clone();
            let cancel = cancel.clone();
            handles.push(tokio::spawn(scan_playlist(ctx, path, cancel)));
        }

        let mut titles = Vec::new();
        for handle in handles {
            match handle.await {
                Ok(scan) => {
                    report.cancelled |= scan.cancelled;
                    report.issues.extend(scan.issues);
                    titles.extend(scan.title);
                }
                Err(e) => tracing::error!(error = %e, "Playlist task panicked"),
            }
        }

        report.cancelled |= cancel.is_cancelled();
        report.titles = assemble_titles(titles, self.options.min_duration_secs);

        if report.cancelled {
            tracing::warn!(titles = report.titles.len(), "Scan cancelled");
        } else {
            tracing::info!(
                titles = report.titles.len(),
                issues = report.issues.len(),
                "Scan complete"
            );
        }

        report
    }
}

async fn scan_playlist(
    ctx: Arc<ScanContext>,
    path: PathBuf,
    cancel: CancellationToken,
) -> PlaylistScan {
    let mut scan = PlaylistScan::default();

    let Ok(_permit) = ctx.semaphore.acquire().await else {
        return scan;
    };
    if cancel.is_cancelled() {
        scan.cancelled = true;
        return scan;
    }

    let blocking_ctx = ctx.clone();
    let blocking_path = path.clone();
    let parsed = tokio::task::spawn_blocking(move || {
        let outcome = read_playlist_file(&blocking_path);
        let sizes = resolve_clip_sizes(
            &blocking_ctx.layout.stream_dir,
            &outcome.playlist.play_items,
            &blocking_ctx.options.media_extension,
        );
        (outcome, sizes)
    })
    .await;

    let (outcome, sizes) = match parsed {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::error!(playlist = %path.display(), error = %e, "Playlist parse task failed");
            return scan;
        }
    };

    let playlist = outcome.playlist;
    if let Some(err) = outcome.error {
        scan.issues.push(ScanIssue::MalformedPlaylist {
            playlist: playlist.file_name.clone(),
            reason: err.to_string(),
            items_kept: playlist.play_items.len(),
        });
    }

    let duration_seconds = playlist.duration_seconds();
    if duration_seconds < ctx.options.min_duration_secs {
        tracing::debug!(
            playlist = %playlist.file_name,
            duration_seconds,
            "Skipping short playlist"
        );
        return scan;
    }

    // One issue per distinct clip; the size sum stays per play item.
    let mut reported = HashSet::new();
    for clip_id in sizes.missing.iter().filter(|id| reported.insert(id.as_str())) {
        scan.issues.push(ScanIssue::ClipFileMissing {
            playlist: playlist.file_name.clone(),
            clip_id: clip_id.clone(),
        });
    }

    let languages = match playlist.first_item() {
        Some(first) if !sizes.missing.contains(&first.clip_id) => {
            let clip = ctx
                .layout
                .clip_path(&first.clip_id, &ctx.options.media_extension);
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    scan.cancelled = true;
                    return scan;
                }
                resolved = ctx.resolver.resolve(&clip) => resolved,
            }
        }
        _ => ctx.resolver.fallback(),
    };

    if let Some(failure) = languages.failure {
        scan.issues.push(failure.into_issue(playlist.file_name.clone()));
    }

    scan.title = Some(Title {
        id: 0,
        clips: playlist
            .play_items
            .iter()
            .map(|item| item.clip_id.clone())
            .collect(),
        source_filename: playlist.file_name,
        playlist_path: path,
        duration_seconds,
        size_bytes: sizes.total_bytes,
        audio_languages: languages.audio.names,
        subtitle_languages: languages.subtitle.names,
        audio_source: languages.audio.source,
        subtitle_source: languages.subtitle.source,
    });
    scan
}
