//! Scan pipeline integration tests
//!
//! Builds small BDMV trees on disk and runs the full scanner over them with
//! fake stream probes.

mod common;

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use assert_matches::assert_matches;
use async_trait::async_trait;
use common::{mpls_bytes, DiscFixture, TICKS};
use multiremux::scanner::{DiscScanner, LanguageSource, ScanIssue, ScanOptions, ScanReport};
use multiremux_common::{StreamDescriptor, StreamKind};
use multiremux_probe::{Error as ProbeError, Result as ProbeResult, StreamProbe};
use tokio_util::sync::CancellationToken;

/// Returns fixed streams and records every path it was asked about.
#[derive(Default)]
struct RecordingProbe {
    streams: Vec<StreamDescriptor>,
    seen: Mutex<Vec<PathBuf>>,
}

#[async_trait]
impl StreamProbe for RecordingProbe {
    fn name(&self) -> &'static str {
        "recording"
    }

    async fn probe(&self, path: &Path) -> ProbeResult<Vec<StreamDescriptor>> {
        self.seen.lock().unwrap().push(path.to_path_buf());
        Ok(self.streams.clone())
    }
}

struct FailingProbe;

#[async_trait]
impl StreamProbe for FailingProbe {
    fn name(&self) -> &'static str {
        "failing"
    }

    async fn probe(&self, _path: &Path) -> ProbeResult<Vec<StreamDescriptor>> {
        Err(ProbeError::tool_failed("ffprobe", "Invalid data found when processing input"))
    }
}

struct HangingProbe;

#[async_trait]
impl StreamProbe for HangingProbe {
    fn name(&self) -> &'static str {
        "hanging"
    }

    async fn probe(&self, _path: &Path) -> ProbeResult<Vec<StreamDescriptor>> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(Vec::new())
    }
}

fn names(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

async fn scan(root: &Path, probe: Option<Arc<dyn StreamProbe>>) -> ScanReport {
    scan_with(root, ScanOptions::default(), probe).await
}

async fn scan_with(
    root: &Path,
    options: ScanOptions,
    probe: Option<Arc<dyn StreamProbe>>,
) -> ScanReport {
    DiscScanner::new(options, probe)
        .scan(root, &CancellationToken::new())
        .await
}

#[tokio::test]
async fn test_short_playlist_is_excluded() {
    let disc = DiscFixture::new();
    disc.playlist(
        "00001.mpls",
        &[("00001", 0, 10 * TICKS), ("00002", 10 * TICKS, 20 * TICKS)],
    );

    let report = scan(disc.root(), None).await;

    assert_eq!(report.playlists_found, 1);
    assert!(report.titles.is_empty());
    assert!(report.issues.is_empty());
}

#[tokio::test]
async fn test_titles_sorted_by_duration_with_ids() {
    let disc = DiscFixture::new();
    disc.playlist("C.mpls", &[("00003", 0, 90 * TICKS)])
        .playlist("A.mpls", &[("00001", 0, 7200 * TICKS)])
        .playlist("B.mpls", &[("00002", 0, 5400 * TICKS)])
        .clip("00001", 100)
        .clip("00002", 100)
        .clip("00003", 100);

    let report = scan(disc.root(), None).await;

    let listed: Vec<(usize, &str, f64)> = report
        .titles
        .iter()
        .map(|t| (t.id, t.source_filename.as_str(), t.duration_seconds))
        .collect();
    assert_eq!(listed, [(0, "A.mpls", 7200.0), (1, "B.mpls", 5400.0)]);
}

#[tokio::test]
async fn test_bad_magic_is_skipped_and_reported() {
    let disc = DiscFixture::new();
    let mut bytes = mpls_bytes(&[("00001", 0, 3600 * TICKS)]);
    bytes[..4].copy_from_slice(b"XXXX");
    disc.raw_playlist("00000.mpls", &bytes)
        .playlist("00001.mpls", &[("00001", 0, 3600 * TICKS)])
        .clip("00001", 10);

    let report = scan(disc.root(), None).await;

    assert_eq!(report.titles.len(), 1);
    assert_eq!(report.titles[0].source_filename, "00001.mpls");
    assert_matches!(
        &report.issues[..],
        [ScanIssue::MalformedPlaylist { playlist, items_kept: 0, .. }] if playlist == "00000.mpls"
    );
}

#[tokio::test]
async fn test_failing_probe_uses_fallback_languages() {
    let disc = DiscFixture::new();
    disc.playlist("00001.mpls", &[("00001", 0, 3600 * TICKS)])
        .clip("00001", 10);

    let report = scan(disc.root(), Some(Arc::new(FailingProbe))).await;

    let title = &report.titles[0];
    assert_eq!(title.audio_languages, names(&["English", "French", "Spanish"]));
    assert_eq!(title.subtitle_languages, names(&["English", "Spanish"]));
    assert_eq!(title.audio_source, LanguageSource::Fallback);
    assert!(title.uses_fallback_languages());
    assert_matches!(&report.issues[..], [ScanIssue::ProbeFailed { .. }]);
}

#[tokio::test]
async fn test_truncated_item_keeps_earlier_items() {
    let disc = DiscFixture::new();
    let mut bytes = mpls_bytes(&[("00001", 0, 300 * TICKS), ("00002", 0, 300 * TICKS)]);
    bytes.truncate(bytes.len() - 10);
    disc.raw_playlist("00001.mpls", &bytes).clip("00001", 10);

    let report = scan(disc.root(), None).await;

    assert_eq!(report.titles.len(), 1);
    let title = &report.titles[0];
    assert_eq!(title.duration_seconds, 300.0);
    assert_eq!(title.clips, ["00001"]);
    assert_matches!(
        &report.issues[..],
        [ScanIssue::MalformedPlaylist { items_kept: 1, .. }]
    );
}

#[tokio::test]
async fn test_sizes_sum_existing_clips_and_report_missing() {
    let disc = DiscFixture::new();
    disc.playlist(
        "00800.mpls",
        &[
            ("00055", 0, 3000 * TICKS),
            ("00056", 0, 3000 * TICKS),
            ("00057", 0, 3000 * TICKS),
        ],
    )
    .clip("00055", 1000)
    .clip("00057", 234);

    let report = scan(disc.root(), None).await;

    let title = &report.titles[0];
    assert_eq!(title.size_bytes, 1234);
    assert_eq!(title.duration_seconds, 9000.0);
    assert_eq!(title.clips, ["00055", "00056", "00057"]);
    assert_eq!(
        report.issues,
        [ScanIssue::ClipFileMissing {
            playlist: "00800.mpls".to_string(),
            clip_id: "00056".to_string(),
        }]
    );
}

#[tokio::test]
async fn test_repeated_missing_clip_is_reported_once() {
    let disc = DiscFixture::new();
    disc.playlist(
        "00001.mpls",
        &[
            ("00009", 0, 1000 * TICKS),
            ("00009", 0, 1000 * TICKS),
            ("00010", 0, 1000 * TICKS),
            ("00009", 0, 1000 * TICKS),
        ],
    )
    .clip("00010", 300);

    let report = scan(disc.root(), None).await;

    assert_eq!(report.titles[0].size_bytes, 300);
    assert_eq!(
        report.issues,
        [ScanIssue::ClipFileMissing {
            playlist: "00001.mpls".to_string(),
            clip_id: "00009".to_string(),
        }]
    );
}

#[tokio::test]
async fn test_repeated_clip_counts_once_per_item() {
    let disc = DiscFixture::new();
    disc.playlist(
        "00001.mpls",
        &[("00020", 0, 1000 * TICKS), ("00020", 0, 1000 * TICKS)],
    )
    .clip("00020", 700);

    let report = scan(disc.root(), None).await;

    assert_eq!(report.titles[0].size_bytes, 1400);
    assert_eq!(report.total_size_bytes(), 1400);
    assert!(report.issues.is_empty());
}

#[tokio::test]
async fn test_space_padded_clip_id_names_its_own_file() {
    let disc = DiscFixture::new();
    disc.playlist("00001.mpls", &[(" 0001", 0, 3600 * TICKS)])
        .clip("0001", 999)
        .clip(" 0001", 111);

    let report = scan(disc.root(), None).await;

    assert_eq!(report.titles[0].clips, [" 0001"]);
    assert_eq!(report.titles[0].size_bytes, 111);
}

#[tokio::test]
async fn test_only_first_clip_is_probed() {
    let disc = DiscFixture::new();
    disc.playlist(
        "00001.mpls",
        &[("00010", 0, 1800 * TICKS), ("00011", 0, 1800 * TICKS)],
    )
    .clip("00010", 10)
    .clip("00011", 10);

    let probe = Arc::new(RecordingProbe {
        streams: vec![
            StreamDescriptor::new(StreamKind::Video, None::<String>),
            StreamDescriptor::new(StreamKind::Audio, Some("jpn")),
            StreamDescriptor::new(StreamKind::Audio, Some("eng")),
            StreamDescriptor::new(StreamKind::Subtitle, Some("eng")),
            StreamDescriptor::new(StreamKind::Subtitle, Some("qaa")),
        ],
        ..Default::default()
    });

    let report = scan(disc.root(), Some(probe.clone())).await;

    let title = &report.titles[0];
    assert_eq!(title.audio_languages, names(&["English", "Japanese"]));
    assert_eq!(title.subtitle_languages, names(&["English"]));
    assert_eq!(title.audio_source, LanguageSource::Detected);
    assert_eq!(title.subtitle_source, LanguageSource::Detected);
    assert!(report.issues.is_empty());

    let seen = probe.seen.lock().unwrap();
    assert_eq!(*seen, [disc.stream_dir().join("00010.m2ts")]);
}

#[tokio::test]
async fn test_short_titles_are_not_probed() {
    let disc = DiscFixture::new();
    disc.playlist("00001.mpls", &[("00001", 0, 30 * TICKS)])
        .clip("00001", 10);

    let probe = Arc::new(RecordingProbe::default());
    let report = scan(disc.root(), Some(probe.clone())).await;

    assert!(report.titles.is_empty());
    assert!(probe.seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_missing_first_clip_skips_probe() {
    let disc = DiscFixture::new();
    disc.playlist("00001.mpls", &[("00001", 0, 3600 * TICKS)]);

    let probe = Arc::new(RecordingProbe::default());
    let report = scan(disc.root(), Some(probe.clone())).await;

    assert!(probe.seen.lock().unwrap().is_empty());
    assert_eq!(report.titles[0].size_bytes, 0);
    assert_eq!(report.titles[0].audio_source, LanguageSource::Fallback);
    assert_matches!(&report.issues[..], [ScanIssue::ClipFileMissing { .. }]);
}

#[tokio::test]
async fn test_probe_timeout_falls_back() {
    let disc = DiscFixture::new();
    disc.playlist("00001.mpls", &[("00001", 0, 3600 * TICKS)])
        .clip("00001", 10);

    let options = ScanOptions {
        probe_timeout: Duration::from_millis(50),
        ..ScanOptions::default()
    };
    let report = scan_with(disc.root(), options, Some(Arc::new(HangingProbe))).await;

    assert_eq!(report.titles.len(), 1);
    assert_eq!(report.titles[0].subtitle_source, LanguageSource::Fallback);
    assert_matches!(&report.issues[..], [ScanIssue::ProbeTimeout { .. }]);
    assert!(!report.cancelled);
}

#[tokio::test]
async fn test_cancel_during_probe_returns_partial_report() {
    let disc = DiscFixture::new();
    disc.playlist("00001.mpls", &[("00001", 0, 3600 * TICKS)])
        .playlist("00002.mpls", &[("00002", 0, 3600 * TICKS)])
        .clip("00001", 10)
        .clip("00002", 10);

    let options = ScanOptions {
        probe_timeout: Duration::from_secs(600),
        ..ScanOptions::default()
    };
    let scanner = DiscScanner::new(options, Some(Arc::new(HangingProbe)));
    let cancel = CancellationToken::new();

    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        trigger.cancel();
    });

    let report = tokio::time::timeout(Duration::from_secs(10), scanner.scan(disc.root(), &cancel))
        .await
        .expect("scan did not stop after cancellation");

    assert!(report.cancelled);
    assert!(report.titles.is_empty());
    assert_eq!(report.playlists_found, 2);
}

#[tokio::test]
async fn test_cancelled_before_start() {
    let disc = DiscFixture::new();
    disc.playlist("00001.mpls", &[("00001", 0, 3600 * TICKS)]);

    let cancel = CancellationToken::new();
    cancel.cancel();
    let report = DiscScanner::new(ScanOptions::default(), None)
        .scan(disc.root(), &cancel)
        .await;

    assert!(report.cancelled);
    assert!(report.titles.is_empty());
}

#[tokio::test]
async fn test_bdmv_directory_as_root() {
    let disc = DiscFixture::new();
    disc.playlist("00001.mpls", &[("00001", 0, 3600 * TICKS)]);

    let report = scan(&disc.root().join("BDMV"), None).await;

    assert!(report.is_disc());
    assert_eq!(report.titles.len(), 1);
}

#[tokio::test]
async fn test_extension_match_is_case_insensitive() {
    let disc = DiscFixture::new();
    disc.playlist("00001.MPLS", &[("00001", 0, 3600 * TICKS)])
        .playlist("00002.mpls", &[("00002", 0, 1800 * TICKS)])
        .raw_playlist("index.bdmv", b"INDX0200");

    let report = scan(disc.root(), None).await;

    assert_eq!(report.playlists_found, 2);
    let files: Vec<&str> = report
        .titles
        .iter()
        .map(|t| t.source_filename.as_str())
        .collect();
    assert_eq!(files, ["00001.MPLS", "00002.mpls"]);
}

#[tokio::test]
async fn test_missing_stream_dir_is_not_a_disc() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("BDMV/PLAYLIST")).unwrap();
    std::fs::write(
        dir.path().join("BDMV/PLAYLIST/00001.mpls"),
        mpls_bytes(&[("00001", 0, 3600 * TICKS)]),
    )
    .unwrap();

    let report = scan(dir.path(), None).await;

    assert!(!report.is_disc());
    assert!(report.titles.is_empty());
    assert_matches!(&report.issues[..], [ScanIssue::StructureMissing { .. }]);
}

#[tokio::test]
async fn test_single_worker_gives_same_result() {
    let disc = DiscFixture::new();
    for i in 0..8u32 {
        disc.playlist(
            &format!("{:05}.mpls", i),
            &[("00001", 0, (200 + i * 100) * TICKS)],
        );
    }
    disc.clip("00001", 5);

    let parallel = scan(disc.root(), None).await;
    let serial = scan_with(
        disc.root(),
        ScanOptions {
            workers: 1,
            ..ScanOptions::default()
        },
        None,
    )
    .await;

    assert_eq!(parallel.titles, serial.titles);
    assert_eq!(parallel.titles.len(), 8);
    assert_eq!(parallel.titles[0].source_filename, "00007.mpls");
}
