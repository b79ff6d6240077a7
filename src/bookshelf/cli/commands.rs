use super::menu::Menu;
use super::render::{print_message, print_record_list, render_record, MessageLevel};
use super::setup::{Cli, Commands};
use bookshelf::catalog::Catalog;
use bookshelf::config::CatalogConfig;
use bookshelf::error::Result;
use bookshelf::logging::init_logging;
use bookshelf::model::Criterion;
use bookshelf::store::fs::JsonFileStore;
use clap::Parser;
use directories::ProjectDirs;
use std::io;
use std::path::PathBuf;

const HOME_ENV: &str = "BOOKSHELF_HOME";

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let _logger = match init_logging(cli.verbose) {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("Warning: logging disabled: {}", e);
            None
        }
    };

    let mut catalog = init_catalog(&cli)?;

    match cli.command {
        Some(Commands::Add {
            title,
            author,
            year,
        }) => handle_add(&mut catalog, &title, &author, year),
        Some(Commands::Remove { id }) => handle_remove(&mut catalog, id),
        Some(Commands::Show { id }) => handle_show(&catalog, id),
        Some(Commands::Search { keyword, by }) => handle_search(&catalog, &keyword, &by),
        Some(Commands::List) => handle_list(&catalog),
        Some(Commands::Status { id, status }) => handle_status(&mut catalog, id, &status),
        Some(Commands::Menu) | None => {
            let stdin = io::stdin();
            Menu::new(&mut catalog, stdin.lock(), io::stdout()).run()?;
        }
    }

    if catalog.is_dirty() {
        print_message(
            MessageLevel::Warning,
            &format!(
                "Changes could not be saved to {}.",
                catalog.store().data_path().display()
            ),
        );
    }
    Ok(())
}

/// `--data-dir`, then `$BOOKSHELF_HOME`, then the OS data dir, then the cwd.
fn resolve_data_dir(cli: &Cli) -> PathBuf {
    if let Some(dir) = &cli.data_dir {
        return dir.clone();
    }
    if let Some(dir) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return PathBuf::from(dir);
    }
    ProjectDirs::from("com", "bookshelf", "bookshelf")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

fn init_catalog(cli: &Cli) -> Result<Catalog<JsonFileStore>> {
    let data_dir = resolve_data_dir(cli);
    let config = CatalogConfig::load(&data_dir)?;
    let store = JsonFileStore::from_config(&config, &data_dir)?;
    log::debug!("using catalog at {}", store.data_path().display());
    Ok(Catalog::new(store))
}

fn handle_add(catalog: &mut Catalog<JsonFileStore>, title: &str, author: &str, year: i32) {
    let record = catalog.add_record(title, author, year);
    print_message(
        MessageLevel::Success,
        &format!("Book '{}' added with ID {}.", record.title, record.id),
    );
}

fn handle_remove(catalog: &mut Catalog<JsonFileStore>, id: u64) {
    if catalog.remove_record(id) {
        print_message(MessageLevel::Success, &format!("Book {} removed.", id));
    } else {
        print_message(MessageLevel::Info, &format!("Book {} not found.", id));
    }
}

fn handle_show(catalog: &Catalog<JsonFileStore>, id: u64) {
    match catalog.find_by_id(id) {
        Some(record) => print!("{}", render_record(record)),
        None => print_message(MessageLevel::Info, &format!("Book {} not found.", id)),
    }
}

fn handle_search(catalog: &Catalog<JsonFileStore>, keyword: &str, by: &str) {
    if by.parse::<Criterion>().is_err() {
        print_message(
            MessageLevel::Warning,
            &format!("Unknown search field '{}' (use title, author or year).", by),
        );
        return;
    }
    print_record_list(&catalog.search(keyword, by));
}

fn handle_list(catalog: &Catalog<JsonFileStore>) {
    let records: Vec<_> = catalog.list_all().iter().collect();
    print_record_list(&records);
}

fn handle_status(catalog: &mut Catalog<JsonFileStore>, id: u64, status: &str) {
    if catalog.find_by_id(id).is_none() {
        print_message(MessageLevel::Info, &format!("Book {} not found.", id));
        return;
    }
    if catalog.change_status(id, status) {
        print_message(
            MessageLevel::Success,
            &format!("Book {} is now {}.", id, status),
        );
    } else {
        print_message(
            MessageLevel::Warning,
            &format!("Invalid status '{}' (use AVAILABLE or BORROWED).", status),
        );
    }
}
