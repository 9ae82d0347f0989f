//! # multiremux-probe
//!
//! Asking an external tool which audio and subtitle streams a clip carries.
//!
//! The [`StreamProbe`] trait is the seam: the scanner only ever sees
//! `Arc<dyn StreamProbe>`, so tests supply fakes and production uses
//! [`FfprobeProbe`]. [`CompositeProbe`] layers several probes.
//!
//! ## Quick start
//!
//! ```no_run
//! use multiremux_probe::{FfprobeProbe, StreamProbe};
//! use std::path::Path;
//!
//! # async fn example() -> multiremux_probe::Result<()> {
//! let probe = FfprobeProbe::discover(None)?;
//! for stream in probe.probe(Path::new("/disc/BDMV/STREAM/00001.m2ts")).await? {
//!     println!("{} {:?}", stream.kind, stream.language);
//! }
//! # Ok(())
//! # }
//! ```

pub mod command;
pub mod composite;
mod error;
pub mod ffprobe;
pub mod prober;
pub mod tools;

pub use command::{ToolCommand, ToolOutput};
pub use composite::CompositeProbe;
pub use error::{Error, Result};
pub use ffprobe::FfprobeProbe;
pub use prober::StreamProbe;
pub use tools::{check_tool, check_tools, require_tool, ToolInfo};
