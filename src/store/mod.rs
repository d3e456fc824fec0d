//! Master set persistence.
//!
//! The engine only ever reads the whole set once and then issues one
//! `append` or `update_at` per decision. Implementations may buffer those
//! calls; nothing is durable until [`MasterStore::commit`] returns.

use crate::engine::Decision;
use crate::error::StoreError;
use crate::models::MasterRecord;

mod file;
mod memory;

pub use file::CsvMasterStore;
pub use memory::MemoryStore;

// ---

pub trait MasterStore {
    // ---
    /// Every record, in ascending id order.
    fn load_all(&mut self) -> Result<Vec<MasterRecord>, StoreError>;

    fn append(&mut self, record: MasterRecord) -> Result<(), StoreError>;

    /// Replace the record with the given id.
    fn update_at(&mut self, id: u32, record: MasterRecord) -> Result<(), StoreError>;

    /// Make buffered changes durable.
    fn commit(&mut self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Hand each decision to the store, in order.
pub fn apply<S: MasterStore + ?Sized>(
    store: &mut S,
    decisions: &[Decision],
) -> Result<(), StoreError> {
    // ---
    for decision in decisions {
        match decision {
            Decision::Created(record) => store.append(record.clone())?,
            Decision::Updated(record) => store.update_at(record.id, record.clone())?,
        }
    }
    tracing::debug!("Applied {} decisions to master store", decisions.len());
    Ok(())
}

/// Replace `id` inside a buffered record list.
fn replace_by_id(
    records: &mut [MasterRecord],
    id: u32,
    record: MasterRecord,
) -> Result<(), StoreError> {
    // ---
    let slot = records
        .iter_mut()
        .find(|r| r.id == id)
        .ok_or(StoreError::UnknownRecord(id))?;
    *slot = record;
    Ok(())
}
