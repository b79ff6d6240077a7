//! # Bookshelf Architecture
//!
//! Bookshelf is a single-user book catalog. The library holds everything with
//! real invariants; the binary is a thin client on top of it.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses and validates arguments, prompts, prints          │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Catalog Service (catalog.rs)                               │
//! │  - Owns the in-memory records, assigns ids                  │
//! │  - Search and status rules, save after every mutation       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - CatalogStore trait                                       │
//! │  - JsonFileStore (production), InMemoryStore (testing)      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## No I/O Assumptions in Core
//!
//! From `catalog.rs` inward, code takes plain Rust arguments, returns plain
//! Rust values and never prints. Diagnostics go through the `log` facade.
//!
//! ## Module Overview
//!
//! - [`catalog`]: The catalog service
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: Core data types (`Record`, `Status`, `Criterion`)
//! - [`config`]: Storage locations
//! - [`logging`]: Logger bootstrap for the binary
//! - [`error`]: Error types

pub mod catalog;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod store;
