use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn bookshelf(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("bookshelf").unwrap();
    cmd.env_remove("BOOKSHELF_HOME")
        .env_remove("RUST_LOG")
        .arg("--data-dir")
        .arg(dir.path());
    cmd
}

#[test]
fn test_add_then_list() {
    let dir = TempDir::new().unwrap();

    bookshelf(&dir)
        .args(["add", "Foundation", "Asimov", "1951"])
        .assert()
        .success()
        .stdout(predicate::str::contains("added with ID 1"));

    bookshelf(&dir)
        .args(["add", "Dune", "Herbert", "1965"])
        .assert()
        .success()
        .stdout(predicate::str::contains("added with ID 2"));

    bookshelf(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "ID: 1 | Title: Foundation | Author: Asimov | Year: 1951 | Status: AVAILABLE",
        ))
        .stdout(predicate::str::contains("ID: 2 | Title: Dune"));

    assert!(dir.path().join("library.json").exists());
    assert!(!dir.path().join("library.tmp").exists());
}

#[test]
fn test_remove_unknown_id_is_not_an_error() {
    let dir = TempDir::new().unwrap();

    bookshelf(&dir)
        .args(["rm", "42"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Book 42 not found."));

    assert!(!dir.path().join("library.json").exists());
}

#[test]
fn test_blank_title_is_rejected() {
    let dir = TempDir::new().unwrap();

    bookshelf(&dir)
        .args(["add", " ", "Asimov", "1951"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must not be empty"));
}

#[test]
fn test_status_and_show() {
    let dir = TempDir::new().unwrap();
    bookshelf(&dir)
        .args(["add", "Dune", "Herbert", "1965"])
        .assert()
        .success();

    bookshelf(&dir)
        .args(["status", "1", "BORROWED"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Book 1 is now BORROWED."));

    bookshelf(&dir)
        .args(["status", "1", "LOST"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Invalid status 'LOST'"));

    bookshelf(&dir)
        .args(["show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Status: BORROWED"));
}

#[test]
fn test_search_by_author_and_year() {
    let dir = TempDir::new().unwrap();
    bookshelf(&dir)
        .args(["add", "Dune", "Frank Herbert", "1965"])
        .assert()
        .success();
    bookshelf(&dir)
        .args(["add", "Solaris", "Stanislaw Lem", "1961"])
        .assert()
        .success();

    bookshelf(&dir)
        .args(["search", "herb", "--by", "author"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Title: Dune"))
        .stdout(predicate::str::contains("Solaris").not());

    bookshelf(&dir)
        .args(["s", "1961", "-b", "year"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Title: Solaris"));

    bookshelf(&dir)
        .args(["s", "sixties", "-b", "year"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No books found."));

    bookshelf(&dir)
        .args(["s", "Dune", "-b", "isbn"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Unknown search field 'isbn'"))
        .stdout(predicate::str::contains("Title: Dune").not());
}

#[test]
fn test_corrupt_file_starts_empty() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("library.json"), "{invalid_json}").unwrap();

    bookshelf(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No books found."))
        .stderr(predicate::str::contains("Failed to parse catalog"));
}

#[test]
fn test_config_overrides_file_name() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("config.json"),
        r#"{"data_file": "books.json", "scratch_file": "books.tmp"}"#,
    )
    .unwrap();

    bookshelf(&dir)
        .args(["add", "Dune", "Herbert", "1965"])
        .assert()
        .success();

    assert!(dir.path().join("books.json").exists());
    assert!(!dir.path().join("library.json").exists());
}

#[test]
fn test_config_scratch_aliasing_data_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("config.json"),
        r#"{"data_file": "library.json", "scratch_file": "./library.json"}"#,
    )
    .unwrap();

    bookshelf(&dir)
        .args(["add", "Dune", "Herbert", "1965"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must differ from data file"));

    assert!(!dir.path().join("library.json").exists());
}

#[test]
fn test_home_env_is_used() {
    let dir = TempDir::new().unwrap();

    Command::cargo_bin("bookshelf")
        .unwrap()
        .env("BOOKSHELF_HOME", dir.path())
        .args(["add", "Dune", "Herbert", "1965"])
        .assert()
        .success();

    assert!(dir.path().join("library.json").exists());
}

#[test]
fn test_menu_from_piped_input() {
    let dir = TempDir::new().unwrap();

    bookshelf(&dir)
        .write_stdin("1\nHyperion\nSimmons\n1989\n4\n6\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Book 'Hyperion' added with ID 1."))
        .stdout(predicate::str::contains("Goodbye."));

    bookshelf(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Title: Hyperion"));
}
