//! Error taxonomy for the collaborators around the amalgamation engine.
//!
//! The engine itself is total; everything that can fail happens while
//! loading observations or reading and writing the master table, before or
//! after the engine runs.

use std::path::PathBuf;

use thiserror::Error;

/// Failures while turning a tabular row into a typed record.
#[derive(Debug, Error)]
pub enum InputError {
    // ---
    /// The observation file could not be opened or read.
    #[error("cannot read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The observation source yielded zero records.
    #[error("data file '{0}' is empty")]
    Empty(PathBuf),

    /// Wrong field count, wrong field type or an out-of-domain value.
    #[error("line {line}: malformed record: {reason}")]
    Malformed { line: u64, reason: String },

    /// A date field that is not `MM/DD/YYYY`.
    #[error("line {line}: cannot parse date '{value}' (expected MM/DD/YYYY)")]
    DateParse { line: u64, value: String },
}

/// Failures of a [`MasterStore`](crate::store::MasterStore).
#[derive(Debug, Error)]
pub enum StoreError {
    // ---
    #[error("master file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("master file '{path}': {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A persisted row failed to convert into a [`MasterRecord`](crate::MasterRecord).
    #[error("master file: {0}")]
    Record(#[from] InputError),

    /// Ids must run 1, 2, 3, ... in file order so new ids never collide.
    #[error("master file: expected id {expected}, found {found}")]
    IdSequence { expected: u32, found: u32 },

    #[error("no master record with id {0}")]
    UnknownRecord(u32),
}
