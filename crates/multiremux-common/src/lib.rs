//! Multiremux-Common: Shared types, constants, and utilities.
//!
//! This crate provides common functionality used across multiremux:
//!
//! - **Language Codes**: The read-only ISO 639-2 code / display name table
//! - **Core Types**: Stream kinds reported by probes
//! - **Path Utilities**: BDMV directory names and extension checks
//!
//! # Examples
//!
//! ```
//! use multiremux_common::languages;
//! use multiremux_common::paths::is_playlist_file;
//! use std::path::Path;
//!
//! assert_eq!(languages::name_for_code("eng"), Some("English"));
//! assert_eq!(languages::code_for_name("French"), "fre");
//! assert!(is_playlist_file(Path::new("00800.mpls")));
//! ```

pub mod languages;
pub mod paths;
pub mod types;

pub use languages::LanguageEntry;
pub use types::*;
