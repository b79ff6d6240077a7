use bookshelf::model::Record;
use colored::Colorize;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const FIELD_WIDTH: usize = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

pub fn render_message(level: MessageLevel, content: &str) -> String {
    let styled = match level {
        MessageLevel::Info => content.dimmed(),
        MessageLevel::Success => content.green(),
        MessageLevel::Warning => content.yellow(),
        MessageLevel::Error => content.red(),
    };
    format!("{}\n", styled)
}

pub fn print_message(level: MessageLevel, content: &str) {
    print!("{}", render_message(level, content));
}

/// One line per record; long titles and authors are cut to keep lines short.
pub fn render_record_list(records: &[&Record]) -> String {
    if records.is_empty() {
        return "No books found.\n".to_string();
    }

    let mut output = String::new();
    for record in records {
        output.push_str(&format!(
            "ID: {} | Title: {} | Author: {} | Year: {} | Status: {}\n",
            record.id,
            truncate_to_width(&record.title, FIELD_WIDTH),
            truncate_to_width(&record.author, FIELD_WIDTH),
            record.year,
            record.status
        ));
    }
    output
}

pub fn print_record_list(records: &[&Record]) {
    print!("{}", render_record_list(records));
}

/// Full, untruncated view of a single record.
pub fn render_record(record: &Record) -> String {
    format!(
        "ID:     {}\nTitle:  {}\nAuthor: {}\nYear:   {}\nStatus: {}\n",
        record.id, record.title, record.author, record.year, record.status
    )
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    let limit = max_width.saturating_sub(1);

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > limit {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}
