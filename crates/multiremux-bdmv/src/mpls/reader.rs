//! MPLS reader built on [`ByteCursor`].

use super::{
    ParseOutcome, PlayItem, Playlist, CLIP_ID_LEN, IN_TIME_OFFSET, MPLS_MAGIC,
    PLAYLIST_START_OFFSET,
};
use crate::cursor::ByteCursor;
use crate::{Error, Result};
use std::path::Path;
use tracing::{debug, warn};

/// Decodes a single playlist held in memory.
pub struct MplsReader<'a> {
    cursor: ByteCursor<'a>,
    file_name: String,
}

impl<'a> MplsReader<'a> {
    /// Create a reader over the raw bytes of `file_name`.
    pub fn new(file_name: impl Into<String>, data: &'a [u8]) -> Self {
        Self {
            cursor: ByteCursor::new(data),
            file_name: file_name.into(),
        }
    }

    /// Decode the playlist.
    ///
    /// A bad magic yields an empty playlist. Any other fault stops decoding
    /// and returns the items read so far together with the error.
    pub fn parse(mut self) -> ParseOutcome {
        let mut playlist = Playlist::new(self.file_name.clone());
        let error = self.parse_into(&mut playlist).err();

        if let Some(ref e) = error {
            warn!(
                playlist = %playlist.file_name,
                items = playlist.play_items.len(),
                error = %e,
                "Playlist decoding stopped early"
            );
        }

        ParseOutcome { playlist, error }
    }

    fn parse_into(&mut self, playlist: &mut Playlist) -> Result<()> {
        let magic = self.cursor.read_array::<4>().map_err(|e| match e {
            Error::Truncated { .. } => Error::invalid_magic(&[]),
            other => other,
        })?;
        if &magic != MPLS_MAGIC {
            return Err(Error::invalid_magic(&magic));
        }

        self.cursor.seek(PLAYLIST_START_OFFSET)?;
        let playlist_start = self.cursor.read_u32_be()? as usize;

        self.cursor.seek(playlist_start)?;
        let playlist_length = self.cursor.read_u32_be()? as usize;
        if playlist_length > self.cursor.remaining() {
            debug!(
                playlist = %playlist.file_name,
                declared = playlist_length,
                available = self.cursor.remaining(),
                "Playlist length exceeds file size"
            );
        }

        self.cursor.skip(2)?; // reserved
        let item_count = self.cursor.read_u16_be()?;
        self.cursor.skip(2)?; // sub play item count
        playlist.declared_items = item_count;

        for index in 0..item_count {
            match self.read_play_item()? {
                Some(item) => playlist.play_items.push(item),
                None => {
                    debug!(
                        playlist = %playlist.file_name,
                        index,
                        "Skipping play item without a clip id"
                    );
                    playlist.skipped_items += 1;
                }
            }
        }

        Ok(())
    }

    /// Read one play item and leave the cursor at the start of the next.
    ///
    /// Returns `Ok(None)` when the clip id is empty; the item's bytes are still
    /// consumed so later items decode normally.
    fn read_play_item(&mut self) -> Result<Option<PlayItem>> {
        let length = self.cursor.read_u16_be()? as usize;
        let start = self.cursor.position();

        let clip_bytes = self.cursor.read_bytes(CLIP_ID_LEN)?;
        let clip_id = decode_clip_id(clip_bytes);

        self.cursor.seek(start + IN_TIME_OFFSET)?;
        let in_time = self.cursor.read_u32_be()?;
        let out_time = self.cursor.read_u32_be()?;

        // The length field is authoritative; it skips angle and STN data.
        self.cursor.seek(start + length)?;

        Ok(clip_id.map(|clip_id| PlayItem {
            clip_id,
            in_time,
            out_time,
        }))
    }
}

/// Decode the five-byte clip name; stops at the first NUL.
///
/// Bytes are kept as written, spaces included, so the id names the same file
/// the playlist does. Only a zero-length name counts as empty. Non-UTF-8
/// bytes are replaced rather than rejected.
fn decode_clip_id(bytes: &[u8]) -> Option<String> {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    let raw = &bytes[..end];
    (!raw.is_empty()).then(|| String::from_utf8_lossy(raw).into_owned())
}

/// Read and decode a playlist file from disk.
///
/// The file is read in one call and closed before decoding starts. An open or
/// read failure is reported through [`ParseOutcome::error`] with an empty
/// playlist.
pub fn read_playlist_file(path: &Path) -> ParseOutcome {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned());

    match std::fs::read(path) {
        Ok(data) => MplsReader::new(file_name, &data).parse(),
        Err(e) => {
            warn!(playlist = %path.display(), error = %e, "Failed to read playlist");
            ParseOutcome {
                playlist: Playlist::new(file_name),
                error: Some(Error::Io(e)),
            }
        }
    }
}
