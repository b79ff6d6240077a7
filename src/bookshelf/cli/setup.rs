use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "bookshelf", bin_name = "bookshelf", version)]
#[command(about = "A small single-user book catalog", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding the catalog (defaults to $BOOKSHELF_HOME, then the user data dir)
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a book
    #[command(alias = "a")]
    Add {
        /// Title of the book
        #[arg(value_parser = non_empty)]
        title: String,

        /// Author of the book
        #[arg(value_parser = non_empty)]
        author: String,

        /// Publication year
        #[arg(allow_negative_numbers = true)]
        year: i32,
    },

    /// Remove a book by id
    #[command(alias = "rm")]
    Remove { id: u64 },

    /// Show a single book
    #[command(alias = "v")]
    Show { id: u64 },

    /// Search books
    #[command(alias = "s")]
    Search {
        keyword: String,

        /// Field to search: title, author or year
        #[arg(short, long, default_value = "title")]
        by: String,
    },

    /// List all books
    #[command(alias = "ls")]
    List,

    /// Change the status of a book (AVAILABLE or BORROWED)
    #[command(alias = "st")]
    Status { id: u64, status: String },

    /// Interactive menu (the default with no command)
    Menu,
}

/// Trims and rejects blank values.
pub fn non_empty(value: &str) -> Result<String, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err("value must not be empty".to_string())
    } else {
        Ok(trimmed.to_string())
    }
}
