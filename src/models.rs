//! Data models for pothole observations and master records.
//!
//! `Raw*` / `*Row` types mirror the tabular layouts exactly (strings for
//! dates and flags, the `-1` severity sentinel); the typed models are what the
//! engine works with.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::InputError;

/// Calendar format used by both the observation and the master tables.
pub const DATE_FORMAT: &str = "%m/%d/%Y";

/// Persisted value meaning "no severity measurement available".
pub const SEVERITY_UNAVAILABLE: i64 = -1;

// ---

/// One incoming sensor reading.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    // ---
    pub latitude: f64,
    pub longitude: f64,
    pub date: NaiveDate,
    /// Carried through from the sensor; not used for matching.
    pub satellite_count: u32,
    /// `None` when the sensor reported no measurement.
    pub severity: Option<f64>,
    pub heading: f64,
    pub verified: bool,
}

/// A deduplicated pothole entry.
#[derive(Debug, Clone, PartialEq)]
pub struct MasterRecord {
    // ---
    pub id: u32,
    /// Position of the observation that created the record. Never moved by merges.
    pub latitude: f64,
    pub longitude: f64,
    pub first_seen: NaiveDate,
    pub last_seen: NaiveDate,
    pub severity: Option<f64>,
    pub heading: f64,
    /// Number of unverified observations merged into this record.
    pub occurrence_count: u32,
    pub verified: bool,
}

impl MasterRecord {
    // ---
    /// Build a fresh record from a single observation.
    pub fn from_observation(id: u32, obs: &Observation, occurrence_count: u32) -> Self {
        // ---
        MasterRecord {
            id,
            latitude: obs.latitude,
            longitude: obs.longitude,
            first_seen: obs.date,
            last_seen: obs.date,
            severity: obs.severity,
            heading: obs.heading,
            occurrence_count,
            verified: obs.verified,
        }
    }
}

// ---

/// Observation row as it appears in the data file, after any time column
/// has been dropped.
#[derive(Debug, Deserialize)]
pub struct RawObservation {
    // ---
    pub latitude: f64,
    pub longitude: f64,
    pub date: String,
    pub satellite_count: u32,
    pub severity: i64,
    pub heading: f64,
    pub verified: String,
}

impl RawObservation {
    // ---
    pub fn to_observation(&self, line: u64) -> Result<Observation, InputError> {
        // ---
        Ok(Observation {
            latitude: self.latitude,
            longitude: self.longitude,
            date: parse_date(&self.date, line)?,
            satellite_count: self.satellite_count,
            severity: parse_severity(self.severity as f64, line)?,
            heading: self.heading,
            verified: parse_flag(&self.verified, line)?,
        })
    }
}

/// Master table row, in persisted column order.
#[derive(Debug, Serialize, Deserialize)]
pub struct MasterRow {
    // ---
    pub id: u32,
    pub latitude: f64,
    pub longitude: f64,
    pub first_seen_date: String,
    pub last_seen_date: String,
    pub severity: f64,
    pub heading: f64,
    pub occurrence_count: u32,
    pub verified: String,
}

/// Header written above the master rows.
pub const MASTER_HEADER: [&str; 9] = [
    "id",
    "latitude",
    "longitude",
    "first_seen_date",
    "last_seen_date",
    "severity",
    "heading",
    "occurrence_count",
    "verified",
];

impl MasterRow {
    // ---
    pub fn to_record(&self, line: u64) -> Result<MasterRecord, InputError> {
        // ---
        let first_seen = parse_date(&self.first_seen_date, line)?;
        let last_seen = parse_date(&self.last_seen_date, line)?;
        if first_seen > last_seen {
            return Err(InputError::Malformed {
                line,
                reason: format!(
                    "first seen date {} is after last seen date {}",
                    self.first_seen_date, self.last_seen_date
                ),
            });
        }

        Ok(MasterRecord {
            id: self.id,
            latitude: self.latitude,
            longitude: self.longitude,
            first_seen,
            last_seen,
            severity: parse_severity(self.severity, line)?,
            heading: self.heading,
            occurrence_count: self.occurrence_count,
            verified: parse_flag(&self.verified, line)?,
        })
    }
}

impl From<&MasterRecord> for MasterRow {
    fn from(record: &MasterRecord) -> Self {
        // ---
        MasterRow {
            id: record.id,
            latitude: record.latitude,
            longitude: record.longitude,
            first_seen_date: record.first_seen.format(DATE_FORMAT).to_string(),
            last_seen_date: record.last_seen.format(DATE_FORMAT).to_string(),
            severity: record.severity.unwrap_or(SEVERITY_UNAVAILABLE as f64),
            heading: record.heading,
            occurrence_count: record.occurrence_count,
            verified: flag(record.verified).to_string(),
        }
    }
}

// ---

fn parse_date(value: &str, line: u64) -> Result<NaiveDate, InputError> {
    // ---
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| InputError::DateParse {
        line,
        value: value.to_string(),
    })
}

fn parse_severity(value: f64, line: u64) -> Result<Option<f64>, InputError> {
    // ---
    if value == SEVERITY_UNAVAILABLE as f64 {
        Ok(None)
    } else if value >= 0.0 {
        Ok(Some(value))
    } else {
        Err(InputError::Malformed {
            line,
            reason: format!("severity {value} is negative but not the -1 sentinel"),
        })
    }
}

fn parse_flag(value: &str, line: u64) -> Result<bool, InputError> {
    // ---
    match value {
        "Y" => Ok(true),
        "N" => Ok(false),
        other => Err(InputError::Malformed {
            line,
            reason: format!("verified flag must be Y or N, got '{other}'"),
        }),
    }
}

fn flag(verified: bool) -> &'static str {
    if verified {
        "Y"
    } else {
        "N"
    }
}
