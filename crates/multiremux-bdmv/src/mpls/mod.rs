//! MPLS (movie playlist) decoding.
//!
//! Only the parts needed to time a title and find its clips are decoded:
//! the header's playlist address, the play item count, and each play item's
//! clip name and IN/OUT times. Chapter marks, STN tables and angle blocks are
//! skipped by honoring each item's length field.

mod reader;

#[cfg(test)]
pub(crate) mod test_fixtures;

pub use reader::{read_playlist_file, MplsReader};

use crate::Error;

/// File magic at offset 0.
pub const MPLS_MAGIC: &[u8; 4] = b"MPLS";

/// Offset of the big-endian playlist start address in the header.
pub const PLAYLIST_START_OFFSET: usize = 8;

/// Length of the clip information file name in a play item.
pub const CLIP_ID_LEN: usize = 5;

/// Offset of the IN time from the start of a play item (after its length field).
pub const IN_TIME_OFFSET: usize = 14;

/// Ticks per second of the playlist time base.
pub const CLOCK_HZ: f64 = 45_000.0;

/// One segment of a title: a clip and the time range played from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayItem {
    /// Base name of the clip in `BDMV/STREAM`, without extension.
    pub clip_id: String,
    /// Start time in 45 kHz ticks.
    pub in_time: u32,
    /// End time in 45 kHz ticks.
    pub out_time: u32,
}

impl PlayItem {
    /// Length in ticks. An OUT time before the IN time counts as zero.
    pub fn duration_ticks(&self) -> u32 {
        self.out_time.saturating_sub(self.in_time)
    }

    /// Length in seconds.
    pub fn duration_seconds(&self) -> f64 {
        f64::from(self.duration_ticks()) / CLOCK_HZ
    }
}

/// Decoded playlist contents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Playlist {
    /// File name the playlist was read from (e.g. `00800.mpls`).
    pub file_name: String,
    /// Play item count declared in the header (0 if the header was unreadable).
    pub declared_items: u16,
    /// Play items that decoded with a non-empty clip id, in playlist order.
    pub play_items: Vec<PlayItem>,
    /// Items dropped because their clip id was empty.
    pub skipped_items: usize,
}

impl Playlist {
    /// An empty playlist read from `file_name`.
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            ..Self::default()
        }
    }

    /// Total length of all play items, in seconds.
    pub fn duration_seconds(&self) -> f64 {
        self.play_items.iter().map(PlayItem::duration_seconds).sum()
    }

    /// The first play item, whose clip is used for language probing.
    pub fn first_item(&self) -> Option<&PlayItem> {
        self.play_items.first()
    }
}

/// Result of decoding one playlist.
///
/// Decoding never throws away what it already has: when a read fails part
/// way through, `playlist` holds every item decoded before the fault and
/// `error` records why decoding stopped.
#[derive(Debug)]
pub struct ParseOutcome {
    pub playlist: Playlist,
    pub error: Option<Error>,
}

impl ParseOutcome {
    /// True when the whole playlist decoded without a fault.
    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }
}
