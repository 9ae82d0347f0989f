mod types;

pub use types::*;

use anyhow::{Context, Result};
use multiremux_common::languages::{code_for_name, UNDETERMINED};
use std::path::Path;

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    let default_paths = ["./multiremux.toml", "~/.config/multiremux/config.toml"];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            tracing::debug!("Using config file {:?}", path);
            return load_config(path);
        }
    }

    Ok(Config::default())
}

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    let scan = &config.scan;
    if !scan.min_duration_secs.is_finite() || scan.min_duration_secs < 0.0 {
        anyhow::bail!(
            "Minimum duration must be a non-negative number of seconds, got {}",
            scan.min_duration_secs
        );
    }

    if scan.workers == Some(0) {
        anyhow::bail!("Worker count cannot be 0");
    }

    if scan.playlist_extension.trim_start_matches('.').is_empty() {
        anyhow::bail!("Playlist extension cannot be empty");
    }

    if scan.media_extension.trim_start_matches('.').is_empty() {
        anyhow::bail!("Media extension cannot be empty");
    }

    if config.probe.timeout_secs == 0 {
        anyhow::bail!("Probe timeout cannot be 0");
    }

    if let Some(path) = &config.probe.ffprobe_path {
        if !path.exists() {
            tracing::warn!("Configured ffprobe path does not exist: {:?}", path);
        }
    }

    if config.fallback.audio_languages.is_empty() {
        anyhow::bail!("Fallback audio languages cannot be empty");
    }

    if config.fallback.subtitle_languages.is_empty() {
        anyhow::bail!("Fallback subtitle languages cannot be empty");
    }

    for name in config
        .fallback
        .audio_languages
        .iter()
        .chain(&config.fallback.subtitle_languages)
    {
        if code_for_name(name) == UNDETERMINED {
            tracing::warn!("Fallback language '{}' is not in the language table", name);
        }
    }

    Ok(())
}
