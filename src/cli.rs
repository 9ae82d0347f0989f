use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "multiremux")]
#[command(author, version, about = "List the titles on a Blu-ray BDMV folder")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan a disc folder and list its titles
    Scan {
        /// Disc root (the folder containing BDMV) or the BDMV folder itself
        #[arg(required = true)]
        path: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Drop titles shorter than this many seconds
        #[arg(long, value_name = "SECONDS")]
        min_duration: Option<f64>,

        /// Skip stream probing and use the fallback languages
        #[arg(long)]
        no_probe: bool,

        /// Per-clip probe timeout in seconds
        #[arg(long, value_name = "SECONDS")]
        timeout: Option<u64>,

        /// Number of playlists processed at once
        #[arg(short, long)]
        jobs: Option<usize>,
    },

    /// List the known language codes and names
    Languages {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check that required external tools are available
    CheckTools,

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },
}
