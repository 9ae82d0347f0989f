//! Shared helpers for integration tests.
//!
//! [`DiscFixture`] lays out a minimal `BDMV` tree in a temp directory with
//! synthetic playlists and clip files of chosen sizes.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// 45 kHz ticks per second.
pub const TICKS: u32 = 45_000;

/// Encode a playlist holding `items` as `(clip_id, in_time, out_time)`.
pub fn mpls_bytes(items: &[(&str, u32, u32)]) -> Vec<u8> {
    const START: usize = 40;

    let mut out = Vec::new();
    out.extend_from_slice(b"MPLS0300");
    out.extend_from_slice(&(START as u32).to_be_bytes());
    out.resize(START, 0);

    let mut body = Vec::new();
    body.extend_from_slice(&[0, 0]);
    body.extend_from_slice(&(items.len() as u16).to_be_bytes());
    body.extend_from_slice(&[0, 0]);

    for (clip_id, in_time, out_time) in items {
        let mut item = clip_id.as_bytes().to_vec();
        item.resize(5, 0);
        item.extend_from_slice(b"M2TS");
        item.resize(14, 0);
        item.extend_from_slice(&in_time.to_be_bytes());
        item.extend_from_slice(&out_time.to_be_bytes());
        // STN table and friends, opaque to the reader
        item.extend_from_slice(&[0x55; 12]);

        body.extend_from_slice(&(item.len() as u16).to_be_bytes());
        body.extend_from_slice(&item);
    }

    out.extend_from_slice(&(body.len() as u32).to_be_bytes());
    out.extend_from_slice(&body);
    out
}

/// A temporary disc folder.
pub struct DiscFixture {
    dir: TempDir,
}

impl DiscFixture {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        fs::create_dir_all(dir.path().join("BDMV/PLAYLIST")).unwrap();
        fs::create_dir_all(dir.path().join("BDMV/STREAM")).unwrap();
        Self { dir }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn playlist_dir(&self) -> PathBuf {
        self.root().join("BDMV/PLAYLIST")
    }

    pub fn stream_dir(&self) -> PathBuf {
        self.root().join("BDMV/STREAM")
    }

    /// Write `BDMV/PLAYLIST/<name>` with the given items.
    pub fn playlist(&self, name: &str, items: &[(&str, u32, u32)]) -> &Self {
        self.raw_playlist(name, &mpls_bytes(items))
    }

    pub fn raw_playlist(&self, name: &str, bytes: &[u8]) -> &Self {
        fs::write(self.playlist_dir().join(name), bytes).unwrap();
        self
    }

    /// Write `BDMV/STREAM/<clip_id>.m2ts` of `size` bytes.
    pub fn clip(&self, clip_id: &str, size: usize) -> &Self {
        fs::write(
            self.stream_dir().join(format!("{clip_id}.m2ts")),
            vec![0x47; size],
        )
        .unwrap();
        self
    }
}
