//! Core type definitions shared between the probe and scan layers.
//!
//! Enums are serialized in lowercase to match the `codec_type` strings
//! reported by ffprobe.

use serde::Serialize;
use std::fmt;

/// Kind of elementary stream inside a clip file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamKind {
    Video,
    Audio,
    Subtitle,
    /// Data, attachment or anything else a probe may report.
    Other,
}

impl StreamKind {
    /// Map a probe's `codec_type` string to a kind.
    pub fn from_codec_type(codec_type: &str) -> Self {
        match codec_type.to_ascii_lowercase().as_str() {
            "video" => Self::Video,
            "audio" => Self::Audio,
            "subtitle" => Self::Subtitle,
            _ => Self::Other,
        }
    }
}

impl fmt::Display for StreamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Video => write!(f, "video"),
            Self::Audio => write!(f, "audio"),
            Self::Subtitle => write!(f, "subtitle"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// One stream as reported by a probe: its kind and raw language tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StreamDescriptor {
    pub kind: StreamKind,
    /// Language tag as found in the file, usually ISO 639-2.
    pub language: Option<String>,
}

impl StreamDescriptor {
    pub fn new(kind: StreamKind, language: Option<impl Into<String>>) -> Self {
        Self {
            kind,
            language: language.map(Into::into),
        }
    }
}
