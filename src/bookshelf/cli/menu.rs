//! Interactive numbered menu.
//!
//! Reads one answer per line from any `BufRead` and writes to any `Write`, so
//! the loop runs the same against a terminal and in tests. Bad input prints a
//! message and returns to the menu; end of input leaves the loop.

use super::render::{render_message, render_record_list, MessageLevel};
use bookshelf::catalog::Catalog;
use bookshelf::model::{Criterion, Status};
use bookshelf::store::CatalogStore;
use console::style;
use std::io::{self, BufRead, Write};

pub struct Menu<'a, S: CatalogStore, R: BufRead, W: Write> {
    catalog: &'a mut Catalog<S>,
    input: R,
    output: W,
}

impl<'a, S: CatalogStore, R: BufRead, W: Write> Menu<'a, S, R, W> {
    pub fn new(catalog: &'a mut Catalog<S>, input: R, output: W) -> Self {
        Self {
            catalog,
            input,
            output,
        }
    }

    pub fn run(&mut self) -> io::Result<()> {
        loop {
            self.print_menu()?;
            let Some(choice) = self.prompt("Choose an action (1-6): ")? else {
                writeln!(self.output)?;
                break;
            };

            match choice.as_str() {
                "1" => self.add()?,
                "2" => self.remove()?,
                "3" => self.search()?,
                "4" => self.list()?,
                "5" => self.change_status()?,
                "6" => {
                    self.say(MessageLevel::Info, "Goodbye.")?;
                    break;
                }
                _ => self.say(MessageLevel::Warning, "Invalid choice, try again.")?,
            }
        }
        Ok(())
    }

    fn print_menu(&mut self) -> io::Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "{}", style("===== Bookshelf =====").bold())?;
        writeln!(self.output, "1. Add a book")?;
        writeln!(self.output, "2. Remove a book")?;
        writeln!(self.output, "3. Search books")?;
        writeln!(self.output, "4. List all books")?;
        writeln!(self.output, "5. Change book status")?;
        writeln!(self.output, "6. Exit")
    }

    /// `None` means the input is exhausted.
    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", style(text).cyan())?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn say(&mut self, level: MessageLevel, content: &str) -> io::Result<()> {
        write!(self.output, "{}", render_message(level, content))
    }

    fn warn_if_dirty(&mut self) -> io::Result<()> {
        if self.catalog.is_dirty() {
            self.say(
                MessageLevel::Warning,
                "Changes could not be saved; they are kept for this session only.",
            )?;
        }
        Ok(())
    }

    fn prompt_id(&mut self, text: &str) -> io::Result<Option<u64>> {
        let Some(answer) = self.prompt(text)? else {
            return Ok(None);
        };
        match answer.parse::<u64>() {
            Ok(id) => Ok(Some(id)),
            Err(_) => {
                self.say(MessageLevel::Warning, "ID must be a number.")?;
                Ok(None)
            }
        }
    }

    fn add(&mut self) -> io::Result<()> {
        let Some(title) = self.prompt("Title: ")? else {
            return Ok(());
        };
        let Some(author) = self.prompt("Author: ")? else {
            return Ok(());
        };
        let Some(year) = self.prompt("Year: ")? else {
            return Ok(());
        };

        if title.is_empty() || author.is_empty() || year.is_empty() {
            return self.say(MessageLevel::Warning, "All fields are required.");
        }
        let Ok(year) = year.parse::<i32>() else {
            return self.say(MessageLevel::Warning, "Year must be a number.");
        };

        let record = self.catalog.add_record(&title, &author, year);
        self.say(
            MessageLevel::Success,
            &format!("Book '{}' added with ID {}.", record.title, record.id),
        )?;
        self.warn_if_dirty()
    }

    fn remove(&mut self) -> io::Result<()> {
        let Some(id) = self.prompt_id("ID of the book to remove: ")? else {
            return Ok(());
        };

        if self.catalog.remove_record(id) {
            self.say(MessageLevel::Success, &format!("Book {} removed.", id))?;
            self.warn_if_dirty()
        } else {
            self.say(MessageLevel::Info, &format!("Book {} not found.", id))
        }
    }

    fn search(&mut self) -> io::Result<()> {
        writeln!(self.output, "Search by:")?;
        for (i, criterion) in Criterion::ALL.iter().enumerate() {
            writeln!(self.output, "{}. {}", i + 1, criterion)?;
        }
        let Some(choice) = self.prompt("Criterion number: ")? else {
            return Ok(());
        };
        let criterion = choice
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| Criterion::ALL.get(i).copied());
        let Some(criterion) = criterion else {
            return self.say(MessageLevel::Warning, "Invalid choice.");
        };

        let Some(keyword) = self.prompt(&format!("Enter {}: ", criterion))? else {
            return Ok(());
        };
        let found = self.catalog.search(&keyword, criterion.as_str());
        if found.is_empty() {
            return self.say(MessageLevel::Info, "No books match.");
        }
        let listing = render_record_list(&found);
        write!(self.output, "{}", listing)
    }

    fn list(&mut self) -> io::Result<()> {
        let records: Vec<_> = self.catalog.list_all().iter().collect();
        let listing = render_record_list(&records);
        write!(self.output, "{}", listing)
    }

    fn change_status(&mut self) -> io::Result<()> {
        let Some(id) = self.prompt_id("ID of the book: ")? else {
            return Ok(());
        };
        if self.catalog.find_by_id(id).is_none() {
            return self.say(MessageLevel::Info, &format!("Book {} not found.", id));
        }

        writeln!(self.output, "New status:")?;
        for (i, status) in Status::ALL.iter().enumerate() {
            writeln!(self.output, "{}. {}", i + 1, status)?;
        }
        let Some(choice) = self.prompt("Status number: ")? else {
            return Ok(());
        };
        let status = choice
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| Status::ALL.get(i).copied());
        let Some(status) = status else {
            return self.say(MessageLevel::Warning, "Invalid choice.");
        };

        if self.catalog.change_status(id, status.as_str()) {
            self.say(
                MessageLevel::Success,
                &format!("Book {} is now {}.", id, status),
            )?;
            self.warn_if_dirty()
        } else {
            self.say(MessageLevel::Error, "Failed to change the book status.")
        }
    }
}
