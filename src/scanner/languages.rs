//! Stream language resolution for a title's first clip.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use multiremux_common::languages::name_for_code;
use multiremux_common::{StreamDescriptor, StreamKind};
use multiremux_probe::StreamProbe;

use super::report::{LanguageSource, ScanIssue};

/// Audio languages assumed when none can be detected.
pub const DEFAULT_AUDIO_FALLBACK: [&str; 3] = ["English", "Spanish", "French"];

/// Subtitle languages assumed when none can be detected.
pub const DEFAULT_SUBTITLE_FALLBACK: [&str; 2] = ["English", "Spanish"];

/// Language display names substituted when detection yields nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackLanguages {
    pub audio: BTreeSet<String>,
    pub subtitle: BTreeSet<String>,
}

impl FallbackLanguages {
    pub fn new<A, S>(audio: A, subtitle: S) -> Self
    where
        A: IntoIterator,
        A::Item: Into<String>,
        S: IntoIterator,
        S::Item: Into<String>,
    {
        Self {
            audio: audio.into_iter().map(Into::into).collect(),
            subtitle: subtitle.into_iter().map(Into::into).collect(),
        }
    }
}

impl Default for FallbackLanguages {
    fn default() -> Self {
        Self::new(DEFAULT_AUDIO_FALLBACK, DEFAULT_SUBTITLE_FALLBACK)
    }
}

/// A set of display names and where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageSet {
    pub names: BTreeSet<String>,
    pub source: LanguageSource,
}

impl LanguageSet {
    fn detected_or(names: BTreeSet<String>, fallback: &BTreeSet<String>) -> Self {
        if names.is_empty() {
            Self {
                names: fallback.clone(),
                source: LanguageSource::Fallback,
            }
        } else {
            Self {
                names,
                source: LanguageSource::Detected,
            }
        }
    }
}

/// Why probing produced no stream list.
#[derive(Debug, Clone, PartialEq)]
pub enum ProbeFailure {
    Unavailable(String),
    Failed(String),
    TimedOut(Duration),
}

impl ProbeFailure {
    pub fn into_issue(self, playlist: impl Into<String>) -> ScanIssue {
        let playlist = playlist.into();
        match self {
            Self::Unavailable(reason) => ScanIssue::ProbeUnavailable { playlist, reason },
            Self::Failed(reason) => ScanIssue::ProbeFailed { playlist, reason },
            Self::TimedOut(after) => ScanIssue::probe_timeout(playlist, after),
        }
    }
}

/// Audio and subtitle languages for one title.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLanguages {
    pub audio: LanguageSet,
    pub subtitle: LanguageSet,
    /// Set when a probe was attempted and did not answer usefully.
    pub failure: Option<ProbeFailure>,
}

/// Asks the configured [`StreamProbe`] for a clip's languages.
///
/// One probe call serves both stream kinds. Each kind falls back
/// independently when its mapped set is empty.
#[derive(Clone)]
pub struct LanguageResolver {
    probe: Option<Arc<dyn StreamProbe>>,
    timeout: Duration,
    fallback: FallbackLanguages,
}

impl LanguageResolver {
    pub fn new(
        probe: Option<Arc<dyn StreamProbe>>,
        timeout: Duration,
        fallback: FallbackLanguages,
    ) -> Self {
        Self {
            probe,
            timeout,
            fallback,
        }
    }

    pub fn has_probe(&self) -> bool {
        self.probe.is_some()
    }

    /// The fallback sets, used without probing.
    pub fn fallback(&self) -> ResolvedLanguages {
        self.resolve_streams(&[], None)
    }

    /// Probe `clip` and map its stream languages to display names.
    pub async fn resolve(&self, clip: &Path) -> ResolvedLanguages {
        let Some(probe) = &self.probe else {
            return self.fallback();
        };

        match tokio::time::timeout(self.timeout, probe.probe(clip)).await {
            Ok(Ok(streams)) => {
                tracing::debug!(
                    clip = %clip.display(),
                    probe = probe.name(),
                    streams = streams.len(),
                    "Probed clip"
                );
                self.resolve_streams(&streams, None)
            }
            Ok(Err(e)) => {
                tracing::warn!(clip = %clip.display(), error = %e, "Stream probe failed");
                let failure = if e.is_timeout() {
                    ProbeFailure::TimedOut(self.timeout)
                } else if e.is_unavailable() {
                    ProbeFailure::Unavailable(e.to_string())
                } else {
                    ProbeFailure::Failed(e.to_string())
                };
                self.resolve_streams(&[], Some(failure))
            }
            Err(_) => {
                tracing::warn!(
                    clip = %clip.display(),
                    timeout_secs = self.timeout.as_secs_f64(),
                    "Stream probe timed out"
                );
                self.resolve_streams(&[], Some(ProbeFailure::TimedOut(self.timeout)))
            }
        }
    }

    fn resolve_streams(
        &self,
        streams: &[StreamDescriptor],
        failure: Option<ProbeFailure>,
    ) -> ResolvedLanguages {
        ResolvedLanguages {
            audio: LanguageSet::detected_or(
                languages_of(streams, StreamKind::Audio),
                &self.fallback.audio,
            ),
            subtitle: LanguageSet::detected_or(
                languages_of(streams, StreamKind::Subtitle),
                &self.fallback.subtitle,
            ),
            failure,
        }
    }
}

/// Display names of the languages tagged on streams of `kind`.
///
/// Codes outside the language table are dropped.
pub fn languages_of(streams: &[StreamDescriptor], kind: StreamKind) -> BTreeSet<String> {
    streams
        .iter()
        .filter(|s| s.kind == kind)
        .filter_map(|s| s.language.as_deref())
        .filter_map(name_for_code)
        .map(str::to_string)
        .collect()
}
