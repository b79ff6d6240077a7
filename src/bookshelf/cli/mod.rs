//! # CLI Layer
//!
//! One possible client of the catalog. This is the only place that parses
//! arguments, prompts, prints, or picks an exit code. Input is validated here
//! (non-empty title/author, numeric id and year) before the catalog sees it.
//!
//! - `setup`: clap definitions and value parsers
//! - `commands`: context setup and one handler per subcommand
//! - `menu`: the interactive loop
//! - `render`: text output

mod commands;
mod menu;
mod render;
mod setup;

pub use commands::run;
