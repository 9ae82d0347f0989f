//! Multiremux - Blu-ray title discovery
//!
//! This library crate exposes the scan pipeline and configuration for the
//! CLI and for integration testing.

pub mod config;
pub mod output;
pub mod scanner;
