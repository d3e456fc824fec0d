//! Pothole observation amalgamation.
//!
//! Deduplicates geotagged pothole observations into a master record set:
//! an observation within the distance and heading thresholds of a known
//! record is merged into that record's statistics, otherwise it becomes a
//! new record.
//!
//! Module boundaries:
//! - `geo` / `merge` – distance test and per-field merge rules
//! - `engine` – the matching loop, pure over its inputs
//! - `observations` / `store` – the data file and master table collaborators
//! - `config` / `report` – runtime settings and the end-of-run summary

pub mod config;
pub mod engine;
pub mod error;
pub mod geo;
pub mod merge;
pub mod models;
pub mod observations;
pub mod report;
pub mod store;

pub use config::Config;
pub use engine::{amalgamate, Amalgamation, Decision, MatchThresholds};
pub use error::{InputError, StoreError};
pub use models::{MasterRecord, Observation};
pub use store::{CsvMasterStore, MasterStore, MemoryStore};
