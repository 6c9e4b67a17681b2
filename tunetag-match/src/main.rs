//! Sticker Matcher (tunetag-match) - Main entry point
//!
//! Aggregates the selected stickers into a target tag vector, then picks the
//! best-matching MIDI file from a folder whose file names encode tag vectors.
//! The chosen file name (or `None`) is the last line on stdout; logs go to
//! stderr.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, error, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, reload, util::SubscriberInitExt, EnvFilter};

use tunetag_common::config::ConfigResolver;
use tunetag_match::playback::{notifier_from_config, notify_playback};
use tunetag_match::report::write_ranking;
use tunetag_match::scanner::CandidateScanner;
use tunetag_match::{match_candidates, parse_sticker_list};

/// Command-line arguments for tunetag-match
#[derive(Parser, Debug)]
#[command(name = "tunetag-match")]
#[command(about = "Pick the MIDI file whose tags best match a sticker selection")]
#[command(after_help = "Example: tunetag-match logo1,kb2,b6 /path/to/midi/files")]
#[command(version)]
#[command(long_version = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("GIT_HASH"),
    ", ",
    env!("BUILD_PROFILE"),
    ", built ",
    env!("BUILD_TIMESTAMP"),
    ")"
))]
struct Args {
    /// Comma-separated sticker names
    stickers: String,

    /// Folder containing `<weather>,<season>,<scene>,<color>,<animal>.mid` files
    midi_folder: PathBuf,

    /// Configuration file (overrides TUNETAG_CONFIG and the user config file)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(short, long, env = "TUNETAG_LOG_LEVEL")]
    log_level: Option<String>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Also print the top N ranked candidates to stderr
    #[arg(long, value_name = "N")]
    top: Option<usize>,

    /// Hand the winning file to the configured player
    #[arg(long)]
    play: bool,
}

fn main() -> Result<()> {
    // Missing arguments: usage text and exit code 1; --help/--version exit 0
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    // Initialize tracing on stderr; the filter is swapped once config is known
    let rust_log_set = std::env::var_os(EnvFilter::DEFAULT_ENV).is_some();
    let initial_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(args.log_level.as_deref().unwrap_or("info")));
    let (filter, reload_handle) = reload::Layer::new(initial_filter);
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr))
        .init();

    debug!(
        "Starting TuneTag Matcher (tunetag-match) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let (config, source) = ConfigResolver::new()
        .resolve(args.config.as_deref())
        .context("Failed to load configuration")?;

    if !rust_log_set && args.log_level.is_none() {
        reload_handle
            .modify(|filter| *filter = EnvFilter::new(&config.logging.level))
            .context("Failed to apply configured log level")?;
    }
    info!("Configuration: {}", source);

    let catalog = config.catalog().context("Invalid sticker catalog")?;
    let selector = config
        .match_selector()
        .context("Invalid matching configuration")?;

    let selected = parse_sticker_list(&args.stickers);
    info!("Selected stickers: {:?}", selected);

    // Listing failures degrade to "no candidates" so the caller still gets a result line
    let candidates = match CandidateScanner::new().scan(&args.midi_folder) {
        Ok(names) => names,
        Err(e) => {
            error!("Cannot list MIDI folder: {}", e);
            Vec::new()
        }
    };

    let report = match_candidates(&catalog, &selector, &selected, &candidates);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if args.json {
        report.write_json(&mut out)?;
    } else {
        report.write_text(&mut out)?;
    }
    out.flush()?;

    if let Some(limit) = args.top {
        let ranking = selector.rank(&report.input_tags, &candidates);
        write_ranking(&mut io::stderr().lock(), &ranking, limit)?;
    }

    if args.play {
        if let Some(file) = &report.matched_file {
            let notifier = notifier_from_config(&config.playback);
            notify_playback(notifier.as_ref(), &args.midi_folder.join(file));
        }
    }

    Ok(())
}
