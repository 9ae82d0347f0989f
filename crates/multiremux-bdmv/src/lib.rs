//! # multiremux-bdmv
//!
//! Reading the structure of a Blu-ray `BDMV` folder.
//!
//! - [`DiscLayout`] finds the `PLAYLIST` and `STREAM` directories and lists
//!   playlist files.
//! - [`mpls`] decodes a playlist into play items with a bounds-checked
//!   [`ByteCursor`].
//! - [`resolve_clip_sizes`] maps play items to clip file sizes.
//!
//! ## Example
//!
//! ```no_run
//! use multiremux_bdmv::{mpls, DiscLayout};
//! use std::path::Path;
//!
//! if let Some(layout) = DiscLayout::locate(Path::new("/media/disc")) {
//!     for path in layout.playlists("mpls") {
//!         let outcome = mpls::read_playlist_file(&path);
//!         println!("{}: {:.1}s", outcome.playlist.file_name, outcome.playlist.duration_seconds());
//!     }
//! }
//! ```

pub mod clips;
pub mod cursor;
mod error;
pub mod layout;
pub mod mpls;

pub use clips::{resolve_clip_sizes, ClipSizes};
pub use cursor::ByteCursor;
pub use error::{Error, Result};
pub use layout::DiscLayout;
pub use mpls::{ParseOutcome, PlayItem, Playlist};
