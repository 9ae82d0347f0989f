//! Synthetic MPLS files for unit tests.

struct FixtureItem {
    clip_id: Vec<u8>,
    in_time: u32,
    out_time: u32,
    padding: usize,
    length_override: Option<u16>,
}

/// Builds playlist bytes in the layout [`MplsReader`](super::MplsReader) expects.
pub struct MplsBuilder {
    items: Vec<FixtureItem>,
}

impl MplsBuilder {
    /// Absolute offset of the playlist body in generated files.
    pub const PLAYLIST_START: usize = 58;

    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn item(self, clip_id: &str, in_time: u32, out_time: u32) -> Self {
        self.item_with_padding(clip_id, in_time, out_time, 0)
    }

    /// Add an item followed by `padding` bytes of opaque extension data.
    pub fn item_with_padding(
        mut self,
        clip_id: &str,
        in_time: u32,
        out_time: u32,
        padding: usize,
    ) -> Self {
        let mut id = clip_id.as_bytes().to_vec();
        id.resize(super::CLIP_ID_LEN, 0);
        self.items.push(FixtureItem {
            clip_id: id,
            in_time,
            out_time,
            padding,
            length_override: None,
        });
        self
    }

    /// Replace the length field written for item `index`.
    pub fn override_length(&mut self, index: usize, length: u16) {
        self.items[index].length_override = Some(length);
    }

    pub fn build(&self) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(b"MPLS0200");
        out.extend_from_slice(&(Self::PLAYLIST_START as u32).to_be_bytes());
        out.resize(Self::PLAYLIST_START, 0);

        let mut body = Vec::new();
        body.extend_from_slice(&[0, 0]); // reserved
        body.extend_from_slice(&(self.items.len() as u16).to_be_bytes());
        body.extend_from_slice(&[0, 0]); // sub play items

        for item in &self.items {
            let mut payload = Vec::new();
            payload.extend_from_slice(&item.clip_id);
            payload.extend_from_slice(b"M2TS");
            payload.resize(super::IN_TIME_OFFSET, 0);
            payload.extend_from_slice(&item.in_time.to_be_bytes());
            payload.extend_from_slice(&item.out_time.to_be_bytes());
            payload.resize(payload.len() + item.padding, 0xAA);

            let length = item.length_override.unwrap_or(payload.len() as u16);
            body.extend_from_slice(&length.to_be_bytes());
            body.extend_from_slice(&payload);
        }

        out.extend_from_slice(&(body.len() as u32).to_be_bytes());
        out.extend_from_slice(&body);
        out
    }
}
