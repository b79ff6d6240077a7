use super::CatalogStore;
use crate::error::{CatalogError, Result};
use crate::model::Record;
use std::cell::{Cell, RefCell};

/// In-memory store for testing.
///
/// Uses `RefCell` for interior mutability since the catalog is single-threaded,
/// which lets `CatalogStore` take `&self` for both methods.
#[derive(Default)]
pub struct InMemoryStore {
    records: RefCell<Vec<Record>>,
    saves: Cell<usize>,
    simulate_write_error: Cell<bool>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `records`, as if saved by an earlier run.
    pub fn with_records(records: Vec<Record>) -> Self {
        Self {
            records: RefCell::new(records),
            ..Self::default()
        }
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.set(simulate);
    }

    /// Snapshot of what is currently "on disk".
    pub fn records(&self) -> Vec<Record> {
        self.records.borrow().clone()
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        self.saves.get()
    }
}

impl CatalogStore for InMemoryStore {
    fn load(&self) -> Vec<Record> {
        self.records.borrow().clone()
    }

    fn save(&self, records: &[Record]) -> Result<()> {
        if self.simulate_write_error.get() {
            return Err(CatalogError::Store("Simulated write error".to_string()));
        }
        *self.records.borrow_mut() = records.to_vec();
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}
