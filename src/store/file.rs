//! CSV-backed master table.
//!
//! The whole table is read on open and held in memory. `append` and
//! `update_at` only touch the buffer; `commit` rewrites the file once,
//! through a temporary sibling that is renamed into place.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::StoreError;
use crate::models::{MasterRecord, MasterRow, MASTER_HEADER};

use super::{replace_by_id, MasterStore};

#[derive(Debug)]
pub struct CsvMasterStore {
    // ---
    path: PathBuf,
    records: Vec<MasterRecord>,
    dirty: bool,
}

impl CsvMasterStore {
    // ---
    /// Open the master table at `path`.
    ///
    /// A missing file is an empty master set; it is created on the first
    /// commit. The header row is skipped whatever its column names.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        // ---
        let path = path.into();

        let records = if path.exists() {
            read_records(&path)?
        } else {
            warn!("Master file {} not found, starting empty", path.display());
            Vec::new()
        };

        info!("Loaded {} master records from {}", records.len(), path.display());
        Ok(CsvMasterStore {
            path,
            records,
            dirty: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl MasterStore for CsvMasterStore {
    // ---
    fn load_all(&mut self) -> Result<Vec<MasterRecord>, StoreError> {
        Ok(self.records.clone())
    }

    fn append(&mut self, record: MasterRecord) -> Result<(), StoreError> {
        // ---
        self.records.push(record);
        self.dirty = true;
        Ok(())
    }

    fn update_at(&mut self, id: u32, record: MasterRecord) -> Result<(), StoreError> {
        // ---
        replace_by_id(&mut self.records, id, record)?;
        self.dirty = true;
        Ok(())
    }

    fn commit(&mut self) -> Result<(), StoreError> {
        // ---
        if !self.dirty {
            return Ok(());
        }

        let tmp_path = self.path.with_extension("csv.tmp");
        write_records(&tmp_path, &self.records)?;
        fs::rename(&tmp_path, &self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;

        self.dirty = false;
        info!("Wrote {} master records to {}", self.records.len(), self.path.display());
        Ok(())
    }
}

// ---

fn read_records(path: &Path) -> Result<Vec<MasterRecord>, StoreError> {
    // ---
    let csv_err = |source| StoreError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(csv_err)?;

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result.map_err(csv_err)?;
        let line = row.position().map(|p| p.line()).unwrap_or_default();

        // Positional, so a header with different names still loads
        let raw: MasterRow = row.deserialize(None).map_err(csv_err)?;
        let record = raw.to_record(line)?;

        let expected = records.len() as u32 + 1;
        if record.id != expected {
            return Err(StoreError::IdSequence {
                expected,
                found: record.id,
            });
        }
        records.push(record);
    }

    Ok(records)
}

fn write_records(path: &Path, records: &[MasterRecord]) -> Result<(), StoreError> {
    // ---
    let csv_err = |source| StoreError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(csv_err)?;

    writer.write_record(MASTER_HEADER).map_err(csv_err)?;
    for record in records {
        writer.serialize(MasterRow::from(record)).map_err(csv_err)?;
    }
    writer.flush().map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(())
}
