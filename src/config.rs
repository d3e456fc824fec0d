//! Configuration loader for the `pothole-amalgamate` tool.
//!
//! This module centralizes all runtime configuration values and their defaults,
//! loading from environment variables (with optional `.env` file support
//! provided by the caller). By consolidating configuration logic here, we
//! avoid scattering `env::var` calls throughout the codebase.
//!
use std::env;
use std::path::PathBuf;

use anyhow::{anyhow, bail, Result};

use crate::engine::{MatchThresholds, DEFAULT_HEADING_DEG};
use crate::report::ReportFormat;

/// Parse an optional float variable with a default value.
macro_rules! parse_var_f64 {
    ($lookup:expr, $var_name:expr, $default:expr) => {
        $lookup($var_name)
            .map(|v| v.parse::<f64>())
            .transpose()
            .map_err(|e| anyhow!("Invalid {}: {}", $var_name, e))?
            .unwrap_or($default)
    };
}

/// Read an optional string variable with a default value.
macro_rules! var_or_default {
    ($lookup:expr, $var_name:expr, $default:expr) => {
        $lookup($var_name).unwrap_or_else(|| $default.to_string())
    };
}

/// Strongly typed application configuration.
///
/// All fields are immutable after loading, ensuring a consistent configuration
/// snapshot for the lifetime of the run.
#[derive(Debug, Clone)]
pub struct Config {
    // ---
    /// Path of the master table.
    pub master_path: PathBuf,

    /// Match radius in metres.
    pub distance_threshold_m: f64,

    /// Half-width of the heading window in degrees.
    pub heading_threshold_deg: f64,

    /// How the run summary is printed.
    pub report_format: ReportFormat,
}

/// Load configuration from environment variables with defaults.
///
/// Optional:
/// - `POTHOLE_MASTER_PATH` – master table path (default: `master.csv`)
/// - `POTHOLE_DISTANCE_THRESHOLD_M` – match radius in metres (default: 10)
/// - `POTHOLE_HEADING_THRESHOLD_DEG` – heading half-width (default: 20)
/// - `POTHOLE_REPORT_FORMAT` – `text` or `json` (default: `text`)
///
/// Returns an error if any variable is present but invalid.
pub fn load_from_env() -> Result<Config> {
    load_with(|name| env::var(name).ok())
}

/// Same as [`load_from_env`], reading variables through `lookup`.
pub fn load_with<F>(lookup: F) -> Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    // ---
    let master_path = PathBuf::from(var_or_default!(lookup, "POTHOLE_MASTER_PATH", "master.csv"));
    let distance_threshold_m = parse_var_f64!(lookup, "POTHOLE_DISTANCE_THRESHOLD_M", 10.0);
    let heading_threshold_deg =
        parse_var_f64!(lookup, "POTHOLE_HEADING_THRESHOLD_DEG", DEFAULT_HEADING_DEG);
    let report_format: ReportFormat =
        var_or_default!(lookup, "POTHOLE_REPORT_FORMAT", "text").parse()?;

    if !(distance_threshold_m > 0.0) {
        bail!("POTHOLE_DISTANCE_THRESHOLD_M must be positive, got {distance_threshold_m}");
    }
    if !(heading_threshold_deg >= 0.0) {
        bail!("POTHOLE_HEADING_THRESHOLD_DEG must not be negative, got {heading_threshold_deg}");
    }

    Ok(Config {
        master_path,
        distance_threshold_m,
        heading_threshold_deg,
        report_format,
    })
}

impl Config {
    // ---
    /// Thresholds for the engine, with the radius converted to kilometres.
    pub fn thresholds(&self) -> MatchThresholds {
        // ---
        MatchThresholds {
            distance_km: self.distance_threshold_m / 1000.0,
            heading_deg: self.heading_threshold_deg,
        }
    }

    /// Log the loaded configuration for debugging purposes.
    pub fn log_config(&self) {
        // ---
        tracing::info!("Configuration loaded:");
        tracing::info!("  POTHOLE_MASTER_PATH           : {}", self.master_path.display());
        tracing::info!("  POTHOLE_DISTANCE_THRESHOLD_M  : {}", self.distance_threshold_m);
        tracing::info!("  POTHOLE_HEADING_THRESHOLD_DEG : {}", self.heading_threshold_deg);
        tracing::info!("  POTHOLE_REPORT_FORMAT         : {:?}", self.report_format);
    }
}
