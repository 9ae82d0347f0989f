use multiremux_common::paths::{MEDIA_EXTENSION, PLAYLIST_EXTENSION};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::scanner::{
    FallbackLanguages, ScanOptions, DEFAULT_AUDIO_FALLBACK, DEFAULT_MIN_DURATION_SECS,
    DEFAULT_PROBE_TIMEOUT, DEFAULT_SUBTITLE_FALLBACK,
};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub scan: ScanConfig,

    #[serde(default)]
    pub probe: ProbeConfig,

    #[serde(default)]
    pub fallback: FallbackConfig,
}

impl Config {
    /// Scanner tunables derived from this configuration.
    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            min_duration_secs: self.scan.min_duration_secs,
            playlist_extension: self.scan.playlist_extension.clone(),
            media_extension: self.scan.media_extension.clone(),
            workers: self.scan.workers.unwrap_or_else(num_cpus::get),
            probe_timeout: Duration::from_secs(self.probe.timeout_secs),
            fallback: FallbackLanguages::new(
                self.fallback.audio_languages.iter().cloned(),
                self.fallback.subtitle_languages.iter().cloned(),
            ),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScanConfig {
    /// Titles shorter than this many seconds are dropped (default: 120)
    #[serde(default = "default_min_duration")]
    pub min_duration_secs: f64,

    /// Concurrent playlist workers (default: number of CPUs)
    #[serde(default)]
    pub workers: Option<usize>,

    #[serde(default = "default_playlist_extension")]
    pub playlist_extension: String,

    #[serde(default = "default_media_extension")]
    pub media_extension: String,
}

fn default_min_duration() -> f64 {
    DEFAULT_MIN_DURATION_SECS
}

fn default_playlist_extension() -> String {
    PLAYLIST_EXTENSION.to_string()
}

fn default_media_extension() -> String {
    MEDIA_EXTENSION.to_string()
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            min_duration_secs: default_min_duration(),
            workers: None,
            playlist_extension: default_playlist_extension(),
            media_extension: default_media_extension(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProbeConfig {
    /// Probe clips for stream languages; when false the fallback sets are used
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Explicit ffprobe executable; PATH is searched when unset
    #[serde(default)]
    pub ffprobe_path: Option<PathBuf>,

    /// Per-clip probe timeout in seconds (default: 30)
    #[serde(default = "default_probe_timeout")]
    pub timeout_secs: u64,
}

fn default_true() -> bool {
    true
}

fn default_probe_timeout() -> u64 {
    DEFAULT_PROBE_TIMEOUT.as_secs()
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ffprobe_path: None,
            timeout_secs: default_probe_timeout(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FallbackConfig {
    /// Audio languages assumed when none are detected
    #[serde(default = "default_audio_languages")]
    pub audio_languages: Vec<String>,

    /// Subtitle languages assumed when none are detected
    #[serde(default = "default_subtitle_languages")]
    pub subtitle_languages: Vec<String>,
}

fn default_audio_languages() -> Vec<String> {
    DEFAULT_AUDIO_FALLBACK.iter().map(|s| s.to_string()).collect()
}

fn default_subtitle_languages() -> Vec<String> {
    DEFAULT_SUBTITLE_FALLBACK.iter().map(|s| s.to_string()).collect()
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            audio_languages: default_audio_languages(),
            subtitle_languages: default_subtitle_languages(),
        }
    }
}
