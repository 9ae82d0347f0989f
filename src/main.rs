mod cli;

use multiremux::{config, output, scanner};
use multiremux_common::languages;
use multiremux_probe::{FfprobeProbe, StreamProbe};

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use std::path::Path;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

struct ScanArgs {
    json: bool,
    min_duration: Option<f64>,
    no_probe: bool,
    timeout: Option<u64>,
    jobs: Option<usize>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "multiremux=debug,multiremux_bdmv=debug,multiremux_probe=debug,multiremux_common=debug"
                .to_string()
        } else {
            "multiremux=info,multiremux_bdmv=warn,multiremux_probe=warn".to_string()
        }
    });

    // Logs go to stderr so `--json` output stays parseable
    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Scan {
            path,
            json,
            min_duration,
            no_probe,
            timeout,
            jobs,
        } => scan_disc(
            &path,
            cli.config.as_deref(),
            ScanArgs {
                json,
                min_duration,
                no_probe,
                timeout,
                jobs,
            },
        ),
        Commands::Languages { json } => list_languages(json),
        Commands::CheckTools => check_tools(cli.config.as_deref()),
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
    }
}

fn scan_disc(path: &Path, config_path: Option<&Path>, args: ScanArgs) -> Result<()> {
    let mut config = config::load_config_or_default(config_path)?;

    // CLI flags override the config file
    if let Some(min_duration) = args.min_duration {
        config.scan.min_duration_secs = min_duration;
    }
    if let Some(timeout) = args.timeout {
        config.probe.timeout_secs = timeout;
    }
    if let Some(jobs) = args.jobs {
        config.scan.workers = Some(jobs);
    }
    if args.no_probe {
        config.probe.enabled = false;
    }
    config::validate_config(&config)?;

    if !path.exists() {
        anyhow::bail!("Path does not exist: {:?}", path);
    }

    let options = config.scan_options();
    let probe = build_probe(&config, &options);
    let scanner = scanner::DiscScanner::new(options, probe);

    let rt = tokio::runtime::Runtime::new()?;
    let report = rt.block_on(async {
        let cancel = CancellationToken::new();

        let interrupt = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::warn!("Interrupted, stopping scan");
                interrupt.cancel();
            }
        });

        scanner.scan(path, &cancel).await
    });

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", output::render_report(&report));
    }

    Ok(())
}

fn build_probe(
    config: &config::Config,
    options: &scanner::ScanOptions,
) -> Option<Arc<dyn StreamProbe>> {
    if !config.probe.enabled {
        tracing::info!("Stream probing disabled, using fallback languages");
        return None;
    }

    match FfprobeProbe::discover(config.probe.ffprobe_path.as_deref()) {
        Ok(probe) => {
            tracing::debug!("Using ffprobe at {:?}", probe.program());
            Some(Arc::new(probe.with_timeout(options.probe_timeout)))
        }
        Err(e) => {
            tracing::warn!("ffprobe not available, using fallback languages: {}", e);
            None
        }
    }
}

fn list_languages(json: bool) -> Result<()> {
    let table = languages::all();

    if json {
        println!("{}", serde_json::to_string_pretty(table)?);
        return Ok(());
    }

    for entry in table {
        println!("{}  {}", entry.code, entry.name);
    }

    Ok(())
}

fn check_tools(config_path: Option<&Path>) -> Result<()> {
    println!("Checking external tools...\n");

    let config = config::load_config_or_default(config_path)?;
    let tools = multiremux_probe::check_tools(config.probe.ffprobe_path.as_deref());
    let mut all_ok = true;

    for tool in &tools {
        let status = if tool.available {
            "✓"
        } else {
            all_ok = false;
            "✗"
        };

        print!("{} {}", status, tool.name);

        if let Some(ref version) = tool.version {
            print!(" ({})", version);
        }

        if let Some(ref path) = tool.path {
            print!(" - {}", path.display());
        }

        println!();
    }

    println!();
    if all_ok {
        println!("All required tools are available!");
    } else {
        println!("Some tools are missing. Titles will be listed with fallback languages.");
    }

    Ok(())
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    let config = match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = config::load_config(p)?;
            println!("✓ Configuration is valid");
            config
        }
        None => {
            println!("No config file specified, using defaults");
            config::Config::default()
        }
    };

    println!("  Minimum duration: {}s", config.scan.min_duration_secs);
    match config.scan.workers {
        Some(workers) => println!("  Workers: {}", workers),
        None => println!("  Workers: {} (CPU count)", num_cpus::get()),
    }
    println!(
        "  Extensions: .{} / .{}",
        config.scan.playlist_extension, config.scan.media_extension
    );
    println!("  Probe enabled: {}", config.probe.enabled);
    println!("  Probe timeout: {}s", config.probe.timeout_secs);
    println!(
        "  Fallback audio: {}",
        config.fallback.audio_languages.join(", ")
    );
    println!(
        "  Fallback subtitles: {}",
        config.fallback.subtitle_languages.join(", ")
    );

    Ok(())
}
