//! Human-readable rendering of scan results.

use std::collections::BTreeSet;
use std::fmt::Write as _;

use crate::scanner::{LanguageSource, ScanReport};

/// `H:MM:SS`, rounding down to whole seconds.
pub fn format_duration(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds as u64
    } else {
        0
    };
    format!("{}:{:02}:{:02}", total / 3600, (total / 60) % 60, total % 60)
}

/// Binary-prefixed size with two decimals, e.g. `23.41 GiB`.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{} B", bytes)
    } else {
        format!("{:.2} {}", value, UNITS[unit])
    }
}

fn format_languages(names: &BTreeSet<String>, source: LanguageSource) -> String {
    let joined = names.iter().map(String::as_str).collect::<Vec<_>>().join(", ");
    match source {
        LanguageSource::Detected => joined,
        LanguageSource::Fallback => format!("{} (assumed)", joined),
    }
}

/// Render a report as the plain-text title listing.
pub fn render_report(report: &ScanReport) -> String {
    let mut out = String::new();

    if !report.is_disc() {
        let _ = writeln!(out, "No Blu-ray structure found in {}", report.root.display());
        return out;
    }

    let _ = writeln!(
        out,
        "{}: {} playlist(s), {} title(s), {} total",
        report.root.display(),
        report.playlists_found,
        report.titles.len(),
        format_size(report.total_size_bytes())
    );

    for title in &report.titles {
        let _ = writeln!(
            out,
            "\n[{}] {}  {}  {}",
            title.id,
            title.source_filename,
            format_duration(title.duration_seconds),
            format_size(title.size_bytes)
        );
        let _ = writeln!(out, "    Clips:     {}", title.clips.join(", "));
        let _ = writeln!(
            out,
            "    Audio:     {}",
            format_languages(&title.audio_languages, title.audio_source)
        );
        let _ = writeln!(
            out,
            "    Subtitles: {}",
            format_languages(&title.subtitle_languages, title.subtitle_source)
        );
    }

    if !report.issues.is_empty() {
        let _ = writeln!(out, "\nIssues:");
        for issue in &report.issues {
            let _ = writeln!(out, "  - {}", issue);
        }
    }

    if report.cancelled {
        let _ = writeln!(out, "\nScan cancelled; results are partial.");
    }

    out
}
