//! # Storage Layer
//!
//! This module defines the storage abstraction for the catalog. The
//! [`CatalogStore`] trait is the one capability the catalog needs: load and
//! save an ordered record collection, as a whole.
//!
//! ## Implementations
//!
//! - [`fs::JsonFileStore`]: Production store, a single JSON file
//!   - The whole collection is the unit of load and save (no index, no log)
//!   - Writes go to a scratch file first, then are renamed over the target
//!
//! - [`memory::InMemoryStore`]: In-memory store for testing
//!   - No persistence
//!   - Can simulate write failures
//!
//! ## Failure Semantics
//!
//! Loading never fails from the caller's point of view: a missing, empty or
//! corrupt file reads as an empty collection and is reported through the
//! `log` facade. Saving returns a [`Result`]; on failure the previous file
//! stays in place.
//!
//! ## Storage Format
//!
//! ```text
//! <data dir>/
//! ├── config.json        # Optional location overrides
//! ├── library.json       # JSON array of records
//! └── library.tmp        # Scratch file, only present mid-save
//! ```

use crate::error::Result;
use crate::model::Record;

pub mod fs;
pub mod memory;

/// Loads and saves an ordered record collection.
pub trait CatalogStore {
    /// Load the full collection. Unreadable storage yields an empty collection.
    fn load(&self) -> Vec<Record>;

    /// Replace the stored collection with `records`, preserving order.
    /// MUST leave the previous state intact if it fails.
    fn save(&self, records: &[Record]) -> Result<()>;
}
