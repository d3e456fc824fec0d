//! Amalgamation engine: matches observations against the master set and
//! decides, per observation, which records to update or create.
//!
//! The engine is a pure function over its inputs. It never touches storage;
//! the ordered [`Decision`] list it returns is handed to a
//! [`MasterStore`](crate::store::MasterStore) by the caller.

use tracing::{debug, info};

use crate::geo::distance_km;
use crate::merge::{
    merge_date_range, merge_heading, merge_occurrence, merge_severity, merge_verification,
};
use crate::models::{MasterRecord, Observation};

/// Default match radius: 10 metres, in kilometres.
pub const DEFAULT_DISTANCE_KM: f64 = 0.01;

/// Default half-width of the heading window, in degrees.
pub const DEFAULT_HEADING_DEG: f64 = 20.0;

// ---

/// Thresholds an observation must satisfy to match a master record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchThresholds {
    // ---
    /// Strict upper bound on distance, in kilometres.
    pub distance_km: f64,
    /// Inclusive half-width of the linear heading window, in degrees.
    pub heading_deg: f64,
}

impl Default for MatchThresholds {
    fn default() -> Self {
        // ---
        MatchThresholds {
            distance_km: DEFAULT_DISTANCE_KM,
            heading_deg: DEFAULT_HEADING_DEG,
        }
    }
}

impl MatchThresholds {
    // ---
    /// True when `obs` is close enough to `record` and heading the same way.
    ///
    /// The heading window is linear: `record.heading ± heading_deg` with no
    /// wraparound, so 350° and 15° never match.
    pub fn matches(&self, obs: &Observation, record: &MasterRecord) -> bool {
        // ---
        let d = distance_km(obs.latitude, obs.longitude, record.latitude, record.longitude);
        d < self.distance_km
            && obs.heading >= record.heading - self.heading_deg
            && obs.heading <= record.heading + self.heading_deg
    }
}

/// One persistence action, in the order the engine produced it.
#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    /// Append a new record.
    Created(MasterRecord),
    /// Replace the record with the same id.
    Updated(MasterRecord),
}

/// Outcome of one [`amalgamate`] call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Amalgamation {
    // ---
    /// The master set after every observation has been applied.
    pub master: Vec<MasterRecord>,
    pub decisions: Vec<Decision>,
    /// Records created for unmatched observations. Excludes the seed.
    pub created: usize,
    /// Merges performed. One observation can update several records.
    pub updated: usize,
    /// Whether an empty master set was bootstrapped from the first observation.
    pub seeded: bool,
}

// ---

/// Record used to bootstrap an empty master set.
///
/// Starts at zero occurrences whatever the verification flag; the seeding
/// observation is then matched against it like any other.
pub fn seed(first: &Observation) -> MasterRecord {
    MasterRecord::from_observation(1, first, 0)
}

/// Fold one observation into a record's statistics. Position and id are kept.
pub fn merge_observation(record: &MasterRecord, obs: &Observation) -> MasterRecord {
    // ---
    let (first_seen, last_seen) = merge_date_range(obs.date, record.first_seen, record.last_seen);

    MasterRecord {
        first_seen,
        last_seen,
        severity: merge_severity(obs.severity, record.severity),
        heading: merge_heading(obs.heading, record.heading),
        occurrence_count: merge_occurrence(record.occurrence_count, obs.verified),
        verified: merge_verification(obs.verified, record.verified),
        ..record.clone()
    }
}

/// Apply a batch of observations to the master set.
///
/// Observations are processed in input order. Each one is compared with every
/// record in id order and merged into all records it matches; if it matches
/// none, a record with id `len + 1` is appended.
#[tracing::instrument(skip_all, fields(observations = observations.len(), master = master.len()))]
pub fn amalgamate(
    observations: &[Observation],
    master: Vec<MasterRecord>,
    thresholds: &MatchThresholds,
) -> Amalgamation {
    // ---
    let mut out = Amalgamation {
        master,
        ..Amalgamation::default()
    };

    if out.master.is_empty() {
        if let Some(first) = observations.first() {
            let record = seed(first);
            debug!(id = record.id, "Seeded empty master set from first observation");
            out.decisions.push(Decision::Created(record.clone()));
            out.master.push(record);
            out.seeded = true;
        }
    }

    for (index, obs) in observations.iter().enumerate() {
        let mut matched = false;

        for record in out.master.iter_mut() {
            if !thresholds.matches(obs, record) {
                continue;
            }
            matched = true;
            *record = merge_observation(record, obs);
            debug!(observation = index, id = record.id, "Merged into existing record");
            out.decisions.push(Decision::Updated(record.clone()));
            out.updated += 1;
        }

        if !matched {
            let id = out.master.len() as u32 + 1;
            let record = MasterRecord::from_observation(id, obs, merge_occurrence(0, obs.verified));
            debug!(observation = index, id, "Created new record");
            out.decisions.push(Decision::Created(record.clone()));
            out.master.push(record);
            out.created += 1;
        }
    }

    info!(
        created = out.created,
        updated = out.updated,
        total = out.master.len(),
        "Amalgamation complete"
    );
    out
}
