//! Observation source: reads the headerless data file handed in by the user.
//!
//! Rows follow `latitude, longitude, date, satellites, severity, heading,
//! verified`. Rows straight from the logger also carry a time column after
//! the date; it is dropped before parsing.

use std::io::Read;
use std::path::Path;

use csv::StringRecord;

use crate::error::InputError;
use crate::models::{Observation, RawObservation};

const FIELDS: usize = 7;
const FIELDS_WITH_TIME: usize = 8;
const TIME_COLUMN: usize = 3;

// ---

/// Load every observation in `path`. Fails on the first bad row and on an
/// empty file.
pub fn load(path: &Path) -> Result<Vec<Observation>, InputError> {
    // ---
    let file = std::fs::File::open(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let observations = parse(file)?;
    if observations.is_empty() {
        return Err(InputError::Empty(path.to_path_buf()));
    }

    tracing::info!("Loaded {} observations from {}", observations.len(), path.display());
    Ok(observations)
}

/// Parse observations from any reader. An empty input yields an empty list.
pub fn parse<R: Read>(input: R) -> Result<Vec<Observation>, InputError> {
    // ---
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let mut observations = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| InputError::Malformed {
            line: e.position().map(|p| p.line()).unwrap_or_default(),
            reason: e.to_string(),
        })?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();

        let record = match record.len() {
            FIELDS => record,
            FIELDS_WITH_TIME => drop_time_column(&record),
            n => {
                return Err(InputError::Malformed {
                    line,
                    reason: format!("expected {FIELDS} or {FIELDS_WITH_TIME} fields, found {n}"),
                })
            }
        };

        let raw: RawObservation = record
            .deserialize(None)
            .map_err(|e| InputError::Malformed {
                line,
                reason: e.to_string(),
            })?;
        observations.push(raw.to_observation(line)?);
    }

    Ok(observations)
}

fn drop_time_column(record: &StringRecord) -> StringRecord {
    // ---
    record
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != TIME_COLUMN)
        .map(|(_, field)| field)
        .collect()
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_parse_seven_columns() {
        // ---
        let data = "45.0,-75.0,01/01/2019,9,5,90.0,N\n45.1,-75.1,01/02/2019,7,-1,180.5,Y\n";
        let observations = parse(data.as_bytes()).unwrap();

        assert_eq!(observations.len(), 2);
        assert_eq!(observations[0].date, NaiveDate::from_ymd_opt(2019, 1, 1).unwrap());
        assert_eq!(observations[0].severity, Some(5.0));
        assert!(!observations[0].verified);
        assert_eq!(observations[1].severity, None);
        assert_eq!(observations[1].heading, 180.5);
        assert!(observations[1].verified);
    }

    #[test]
    fn test_parse_logger_layout_with_time() {
        // ---
        let data = "45.0,-75.0,01/01/2019,13:45:02,9,5,90.0,N\n";
        let observations = parse(data.as_bytes()).unwrap();

        assert_eq!(observations.len(), 1);
        assert_eq!(observations[0].satellite_count, 9);
        assert_eq!(observations[0].severity, Some(5.0));
        assert_eq!(observations[0].heading, 90.0);
    }

    #[test]
    fn test_wrong_field_count() {
        // ---
        let data = "45.0,-75.0,01/01/2019,9,5,90.0,N\n45.0,-75.0,01/01/2019\n";
        let err = parse(data.as_bytes()).unwrap_err();

        assert!(matches!(err, InputError::Malformed { line: 2, .. }), "{err}");
    }

    #[test]
    fn test_wrong_field_type() {
        // ---
        let data = "north,-75.0,01/01/2019,9,5,90.0,N\n";
        let err = parse(data.as_bytes()).unwrap_err();

        assert!(matches!(err, InputError::Malformed { line: 1, .. }), "{err}");
    }

    #[test]
    fn test_bad_date_is_fatal() {
        // ---
        let data = "45.0,-75.0,2019/01/01,9,5,90.0,N\n";
        let err = parse(data.as_bytes()).unwrap_err();

        assert!(matches!(err, InputError::DateParse { line: 1, .. }), "{err}");
    }

    #[test]
    fn test_empty_file() {
        // ---
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        std::fs::write(&path, "").unwrap();

        assert!(parse("".as_bytes()).unwrap().is_empty());
        assert!(matches!(load(&path), Err(InputError::Empty(_))));
    }

    #[test]
    fn test_missing_file() {
        // ---
        let dir = tempfile::tempdir().unwrap();
        let err = load(&dir.path().join("nope.csv")).unwrap_err();

        assert!(matches!(err, InputError::Io { .. }));
    }
}
