//! # Catalog Service
//!
//! [`Catalog`] owns the authoritative in-memory record collection. It loads it
//! once from a [`CatalogStore`] at construction and writes the whole
//! collection back after every mutation.
//!
//! ## Identifiers
//!
//! The next id is `max(existing ids) + 1`, or `1` for an empty catalog. Ids
//! are therefore unique among live records, but removing the record with the
//! highest id frees that id for the next record. If the highest id is already
//! `u64::MAX`, the lowest unused positive id is taken instead.
//!
//! ## Outcomes Instead of Errors
//!
//! Unknown ids, unknown criteria, invalid statuses and non-numeric year
//! keywords are ordinary outcomes: they come back as `false`, `None` or an
//! empty result, never as an error.
//!
//! ## Save Failures
//!
//! A mutation whose save fails is kept in memory; the failure is logged and
//! the catalog is marked dirty until a later save succeeds. Callers that care
//! can check [`Catalog::is_dirty`] and retry with [`Catalog::flush`].
//!
//! ## Borrowed Views
//!
//! [`Catalog::find_by_id`], [`Catalog::search`] and [`Catalog::list_all`] hand
//! out shared borrows into the catalog, so all mutation goes back through the
//! catalog's own methods.

use crate::error::Result;
use crate::model::{Criterion, Record, Status};
use crate::store::CatalogStore;
use log::error;

pub struct Catalog<S: CatalogStore> {
    store: S,
    records: Vec<Record>,
    dirty: bool,
}

impl<S: CatalogStore> Catalog<S> {
    /// Build a catalog populated from `store`.
    pub fn new(store: S) -> Self {
        let records = store.load();
        Self {
            store,
            records,
            dirty: false,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// True when the last save failed and memory is ahead of storage.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Save the current collection, returning the failure if there is one.
    pub fn flush(&mut self) -> Result<()> {
        self.store.save(&self.records)?;
        self.dirty = false;
        Ok(())
    }

    fn persist(&mut self) {
        if let Err(e) = self.flush() {
            error!("Catalog changes kept in memory only: {}", e);
            self.dirty = true;
        }
    }

    /// `max + 1`; once `max` is `u64::MAX`, the lowest id not in use.
    fn next_id(&self) -> u64 {
        match self.records.iter().map(|r| r.id).max() {
            None => 1,
            Some(max) => max.checked_add(1).unwrap_or_else(|| self.lowest_free_id()),
        }
    }

    fn lowest_free_id(&self) -> u64 {
        let mut used: Vec<u64> = self.records.iter().map(|r| r.id).collect();
        used.sort_unstable();

        let mut candidate = 1;
        for id in used {
            if id == candidate {
                candidate += 1;
            } else if id > candidate {
                break;
            }
        }
        candidate
    }

    fn position(&self, id: u64) -> Option<usize> {
        self.records.iter().position(|r| r.id == id)
    }

    /// Append a new `AVAILABLE` record and persist.
    ///
    /// Title and author are expected to be non-empty; that is checked by the caller.
    pub fn add_record(&mut self, title: &str, author: &str, year: i32) -> Record {
        let record = Record::new(self.next_id(), title, author, year);
        self.records.push(record.clone());
        self.persist();
        record
    }

    /// Remove the record with `id`. Storage is only touched if it existed.
    pub fn remove_record(&mut self, id: u64) -> bool {
        match self.position(id) {
            Some(index) => {
                self.records.remove(index);
                self.persist();
                true
            }
            None => false,
        }
    }

    pub fn find_by_id(&self, id: u64) -> Option<&Record> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Search by a criterion given by name (`title`, `author` or `year`).
    /// An unknown criterion matches nothing.
    pub fn search(&self, keyword: &str, criterion: &str) -> Vec<&Record> {
        match criterion.parse::<Criterion>() {
            Ok(criterion) => self.search_by(keyword, criterion),
            Err(_) => Vec::new(),
        }
    }

    /// Case-insensitive substring match on text fields, exact match on year.
    pub fn search_by(&self, keyword: &str, criterion: Criterion) -> Vec<&Record> {
        match criterion {
            Criterion::Title | Criterion::Author => {
                let needle = keyword.to_lowercase();
                self.records
                    .iter()
                    .filter(|r| {
                        let field = match criterion {
                            Criterion::Title => &r.title,
                            _ => &r.author,
                        };
                        field.to_lowercase().contains(&needle)
                    })
                    .collect()
            }
            Criterion::Year => match keyword.trim().parse::<i32>() {
                Ok(year) => self.records.iter().filter(|r| r.year == year).collect(),
                Err(_) => Vec::new(),
            },
        }
    }

    pub fn list_all(&self) -> &[Record] {
        &self.records
    }

    /// Change a status given by name. Fails on unknown ids and on anything
    /// other than `AVAILABLE` / `BORROWED`.
    pub fn change_status(&mut self, id: u64, new_status: &str) -> bool {
        match new_status.parse::<Status>() {
            Ok(status) => self.set_status(id, status),
            Err(_) => false,
        }
    }

    pub fn set_status(&mut self, id: u64, status: Status) -> bool {
        match self.position(id) {
            Some(index) => {
                self.records[index].status = status;
                self.persist();
                true
            }
            None => false,
        }
    }
}
