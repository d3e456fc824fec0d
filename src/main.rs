//! Application entry point for the `pothole-amalgamate` tool.
//!
//! This binary orchestrates one amalgamation run:
//! - Loading configuration from environment variables or `.env`
//! - Initializing structured logging/tracing
//! - Reading the observation file named on the command line (or prompted for)
//! - Loading the master table, running the engine, committing the changes
//! - Printing the run summary
//!
//! # Environment Variables
//! - `POTHOLE_MASTER_PATH` (optional) – master table path (default: `master.csv`)
//! - `POTHOLE_DISTANCE_THRESHOLD_M` / `POTHOLE_HEADING_THRESHOLD_DEG` (optional)
//! - `POTHOLE_REPORT_FORMAT` (optional) – `text` or `json`
//! - `POTHOLE_LOG_LEVEL` (optional) – log verbosity (default: `info`)
//! - `POTHOLE_SPAN_EVENTS` (optional) – span event mode for tracing
//!
//! Any failure before the commit leaves the master table untouched; the error
//! is printed and the process exits non-zero.
use std::{
    env,
    io::{self, BufRead, IsTerminal, Write},
    path::PathBuf,
};

use anyhow::{bail, Context, Result};
use clap::Parser;
use dotenvy::dotenv;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;

use pothole_amalgamation::{
    config, engine, observations,
    report::{ReportFormat, RunSummary},
    store::{self, CsvMasterStore, MasterStore},
};

/// Merge a file of pothole observations into the master table.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    // ---
    /// Observation CSV to amalgamate. Prompted for when omitted.
    data_file: Option<PathBuf>,

    /// Master table path; overrides POTHOLE_MASTER_PATH.
    #[arg(long)]
    master: Option<PathBuf>,
}

// ---

fn main() -> Result<()> {
    // ---
    dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    let mut cfg = config::load_from_env()?;
    if let Some(master) = cli.master {
        cfg.master_path = master;
    }
    cfg.log_config();

    let data_file = match cli.data_file {
        Some(path) => path,
        None => prompt_for_filename()?,
    };

    let observations = observations::load(&data_file).with_context(|| {
        "Error with provided file. Ensure the file is named properly, is a csv, \
         and data is in the correct form"
    })?;

    let mut master_store = CsvMasterStore::open(&cfg.master_path)
        .with_context(|| format!("Failed to open master table {}", cfg.master_path.display()))?;
    let master = master_store.load_all()?;

    let result = engine::amalgamate(&observations, master, &cfg.thresholds());

    store::apply(&mut master_store, &result.decisions)?;
    master_store
        .commit()
        .with_context(|| format!("Failed to write master table {}", cfg.master_path.display()))?;

    let summary = RunSummary::from(&result);
    println!("{}", summary.render(cfg.report_format)?);
    if cfg.report_format == ReportFormat::Text {
        println!("Thank you for using the system. Exiting.");
    }

    Ok(())
}

/// Ask for the observation file on stdin, like the interactive tool did.
fn prompt_for_filename() -> Result<PathBuf> {
    // ---
    print!("Enter CSV filename: ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;

    let name = line.trim();
    if name.is_empty() {
        bail!("No filename entered");
    }
    Ok(PathBuf::from(name))
}

/// Initialize the global tracing subscriber for structured logging.
///
/// This function configures the [`tracing_subscriber`] with:
/// - Log target, file, and line number output enabled
/// - Output on stderr, keeping stdout for the run summary
/// - Color output controlled by TTY detection and `FORCE_COLOR` env var:
///   - `FORCE_COLOR=1|true|yes`: force colors on
///   - `FORCE_COLOR=0|false|no`: force colors off
///   - unset or other values: auto-detect TTY
/// - Span event emission mode controlled by the `POTHOLE_SPAN_EVENTS` env var:
///   - `"full"`       : emit ENTER, EXIT, and CLOSE events with timing
///   - `"enter_exit"` : emit ENTER and EXIT only
///   - `"close"`      : emit CLOSE events only
///   - unset or other values: no span events (default)
/// - Log level controlled by the `POTHOLE_LOG_LEVEL` env var
///
/// This should be called once at startup before any logging or tracing
/// macros are invoked.
fn init_tracing() {
    // ---
    let span_events = match env::var("POTHOLE_SPAN_EVENTS").as_deref() {
        Ok("full") => FmtSpan::FULL,
        Ok("enter_exit") => FmtSpan::ENTER | FmtSpan::EXIT,
        Ok("close") => FmtSpan::CLOSE,
        _ => FmtSpan::NONE,
    };

    // Determine if we should use colors
    let use_color = match env::var("FORCE_COLOR").as_deref() {
        Ok("1") | Ok("true") | Ok("yes") => true,
        Ok("0") | Ok("false") | Ok("no") => false,
        _ => io::stderr().is_terminal(),
    };

    // Use RUST_LOG if available, otherwise fall back to POTHOLE_LOG_LEVEL
    let env_filter = if env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        let level = match env::var("POTHOLE_LOG_LEVEL").ok().as_deref() {
            Some("trace") => "trace",
            Some("debug") => "debug",
            Some("info") => "info",
            Some("warn") => "warn",
            Some("error") => "error",
            _ => "info",
        };
        EnvFilter::new(level)
    };

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_span_events(span_events)
        .with_env_filter(env_filter)
        .with_ansi(use_color)
        .compact()
        .init();
}
