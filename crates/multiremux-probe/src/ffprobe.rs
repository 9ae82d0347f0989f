//! FFprobe-based stream probing.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use multiremux_common::{StreamDescriptor, StreamKind};
use serde::Deserialize;

use crate::command::{ToolCommand, DEFAULT_TIMEOUT};
use crate::prober::StreamProbe;
use crate::tools::get_tool_path;
use crate::{Error, Result};

#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    #[serde(default)]
    streams: Vec<FfprobeStream>,
}

#[derive(Debug, Deserialize)]
struct FfprobeStream {
    #[allow(dead_code)]
    index: Option<u32>,
    codec_type: Option<String>,
    #[serde(default)]
    tags: FfprobeTags,
}

#[derive(Debug, Default, Deserialize)]
struct FfprobeTags {
    language: Option<String>,
}

/// [`StreamProbe`] backed by the `ffprobe` CLI.
#[derive(Debug, Clone)]
pub struct FfprobeProbe {
    program: PathBuf,
    timeout: Duration,
}

impl FfprobeProbe {
    /// Use the ffprobe executable at `program`.
    pub fn new(program: PathBuf) -> Self {
        Self {
            program,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Locate ffprobe, preferring a configured path over `PATH` lookup.
    pub fn discover(configured: Option<&Path>) -> Result<Self> {
        get_tool_path("ffprobe", configured).map(Self::new)
    }

    /// Set the per-file process timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }
}

#[async_trait]
impl StreamProbe for FfprobeProbe {
    fn name(&self) -> &'static str {
        "ffprobe"
    }

    async fn probe(&self, path: &Path) -> Result<Vec<StreamDescriptor>> {
        if !path.is_file() {
            return Err(Error::file_not_found(path));
        }

        let output = ToolCommand::new(self.program.clone())
            .args(["-v", "quiet", "-print_format", "json", "-show_streams"])
            .arg(path.to_string_lossy())
            .timeout(self.timeout)
            .execute()
            .await?;

        parse_ffprobe_streams(&output.stdout)
    }
}

/// Parse `ffprobe -print_format json -show_streams` output into descriptors.
pub fn parse_ffprobe_streams(json: &str) -> Result<Vec<StreamDescriptor>> {
    if json.trim().is_empty() {
        return Err(Error::parse_error("ffprobe", "empty output"));
    }

    let output: FfprobeOutput = serde_json::from_str(json)?;

    Ok(output
        .streams
        .into_iter()
        .map(|stream| StreamDescriptor {
            kind: stream
                .codec_type
                .as_deref()
                .map(StreamKind::from_codec_type)
                .unwrap_or(StreamKind::Other),
            language: stream.tags.language.filter(|l| !l.trim().is_empty()),
        })
        .collect())
}
