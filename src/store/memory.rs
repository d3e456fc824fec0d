use crate::error::StoreError;
use crate::models::MasterRecord;

use super::{replace_by_id, MasterStore};

/// Master set kept entirely in memory. Useful for embedding the engine
/// where persistence is handled elsewhere.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    // ---
    records: Vec<MasterRecord>,
}

impl MemoryStore {
    // ---
    pub fn new(records: Vec<MasterRecord>) -> Self {
        MemoryStore { records }
    }

    pub fn records(&self) -> &[MasterRecord] {
        &self.records
    }
}

impl MasterStore for MemoryStore {
    // ---
    fn load_all(&mut self) -> Result<Vec<MasterRecord>, StoreError> {
        Ok(self.records.clone())
    }

    fn append(&mut self, record: MasterRecord) -> Result<(), StoreError> {
        // ---
        self.records.push(record);
        Ok(())
    }

    fn update_at(&mut self, id: u32, record: MasterRecord) -> Result<(), StoreError> {
        replace_by_id(&mut self.records, id, record)
    }
}
