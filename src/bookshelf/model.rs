//! # Domain Model
//!
//! This module defines the value types stored in the catalog: [`Record`], its
//! lending [`Status`], and the search [`Criterion`].
//!
//! ## On-Disk Shape
//!
//! Records serialize to flat JSON objects:
//!
//! ```text
//! { "id": 2, "title": "Dune", "author": "Herbert", "year": 1965, "status": "BORROWED" }
//! ```
//!
//! The `status` key may be absent in hand-written files; it then defaults to
//! `AVAILABLE`.
//!
//! ## Identity
//!
//! The `id` is the only identity a record has. It is assigned by the catalog
//! (see [`crate::catalog`]) and never changes; every other field may.

use crate::error::CatalogError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    #[default]
    Available,
    Borrowed,
}

impl Status {
    /// Every valid status, in menu order.
    pub const ALL: [Status; 2] = [Status::Available, Status::Borrowed];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Available => "AVAILABLE",
            Status::Borrowed => "BORROWED",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = CatalogError;

    /// Only the two serialized spellings are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Status::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| CatalogError::InvalidStatus(s.to_string()))
    }
}

/// The field a search matches against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Criterion {
    Title,
    Author,
    Year,
}

impl Criterion {
    pub const ALL: [Criterion; 3] = [Criterion::Title, Criterion::Author, Criterion::Year];

    pub fn as_str(&self) -> &'static str {
        match self {
            Criterion::Title => "title",
            Criterion::Author => "author",
            Criterion::Year => "year",
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Criterion {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "title" => Ok(Criterion::Title),
            "author" => Ok(Criterion::Author),
            "year" => Ok(Criterion::Year),
            _ => Err(CatalogError::InvalidCriterion(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: u64,
    pub title: String,
    pub author: String,
    pub year: i32,
    #[serde(default)]
    pub status: Status,
}

impl Record {
    /// Builds a fresh record; new records are always `AVAILABLE`.
    pub fn new(id: u64, title: impl Into<String>, author: impl Into<String>, year: i32) -> Self {
        Self {
            id,
            title: title.into(),
            author: author.into(),
            year,
            status: Status::Available,
        }
    }
}

/// Checks that every id is positive and appears once.
pub fn check_ids(records: &[Record]) -> Result<(), CatalogError> {
    let mut seen = HashSet::with_capacity(records.len());
    for record in records {
        if record.id == 0 {
            return Err(CatalogError::Store(format!(
                "record '{}' has id 0",
                record.title
            )));
        }
        if !seen.insert(record.id) {
            return Err(CatalogError::Store(format!(
                "id {} is used more than once",
                record.id
            )));
        }
    }
    Ok(())
}
