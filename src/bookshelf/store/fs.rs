use super::CatalogStore;
use crate::config::{check_distinct, CatalogConfig};
use crate::error::{CatalogError, Result};
use crate::model::{check_ids, Record};
use log::{debug, error, warn};
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Single-file JSON store with atomic replace.
pub struct JsonFileStore {
    data_path: PathBuf,
    scratch_path: PathBuf,
}

impl JsonFileStore {
    /// Fails if both paths name the same file.
    pub fn new(data_path: PathBuf, scratch_path: PathBuf) -> Result<Self> {
        check_distinct(&data_path, &scratch_path)?;
        Ok(Self {
            data_path,
            scratch_path,
        })
    }

    /// Build a store for the locations `config` names under `data_dir`.
    pub fn from_config<P: AsRef<Path>>(config: &CatalogConfig, data_dir: P) -> Result<Self> {
        config.validate_in(&data_dir)?;
        Self::new(config.data_path(&data_dir), config.scratch_path(&data_dir))
    }

    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    pub fn scratch_path(&self) -> &Path {
        &self.scratch_path
    }

    /// Read the collection at `location`.
    ///
    /// A missing file is the first-run case and reads as empty without noise.
    /// An unreadable, empty or malformed file also reads as empty, with a warning.
    /// Ids of 0 and repeated ids count as malformed.
    pub fn load_from(&self, location: &Path) -> Vec<Record> {
        let content = match fs::read_to_string(location) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("no catalog at {}, starting empty", location.display());
                return Vec::new();
            }
            Err(e) => {
                warn!("Failed to read catalog {}: {}", location.display(), e);
                return Vec::new();
            }
        };

        if content.trim().is_empty() {
            warn!("Catalog file {} is empty", location.display());
            return Vec::new();
        }

        let records = match serde_json::from_str::<Vec<Record>>(&content) {
            Ok(records) => records,
            Err(e) => {
                warn!("Failed to parse catalog {}: {}", location.display(), e);
                return Vec::new();
            }
        };

        if let Err(e) = check_ids(&records) {
            warn!("Invalid catalog {}: {}", location.display(), e);
            return Vec::new();
        }

        debug!("loaded {} records from {}", records.len(), location.display());
        records
    }

    /// Write `records` to `location` through `scratch`.
    ///
    /// On failure the error is logged and returned, the scratch file is removed,
    /// and whatever was at `location` before is left as it was.
    pub fn save_to(&self, records: &[Record], location: &Path, scratch: &Path) -> Result<()> {
        let result = write_atomic(records, location, scratch);

        match &result {
            Ok(()) => debug!("saved {} records to {}", records.len(), location.display()),
            Err(e) => {
                error!("Failed to save catalog {}: {}", location.display(), e);
                if scratch.is_file() {
                    if let Err(rm) = fs::remove_file(scratch) {
                        warn!("Failed to remove scratch file {}: {}", scratch.display(), rm);
                    }
                }
            }
        }

        result
    }
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(CatalogError::Io)?;
        }
    }
    Ok(())
}

fn write_atomic(records: &[Record], location: &Path, scratch: &Path) -> Result<()> {
    let content = serde_json::to_string_pretty(records).map_err(CatalogError::Serialization)?;

    ensure_parent(scratch)?;
    ensure_parent(location)?;

    let mut file = File::create(scratch).map_err(CatalogError::Io)?;
    file.write_all(content.as_bytes()).map_err(CatalogError::Io)?;
    file.sync_all().map_err(CatalogError::Io)?;
    drop(file);

    fs::rename(scratch, location).map_err(CatalogError::Io)?;
    Ok(())
}

impl CatalogStore for JsonFileStore {
    fn load(&self) -> Vec<Record> {
        self.load_from(&self.data_path)
    }

    fn save(&self, records: &[Record]) -> Result<()> {
        self.save_to(records, &self.data_path, &self.scratch_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Status;
    use tempfile::TempDir;

    fn setup() -> (TempDir, JsonFileStore) {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::from_config(&CatalogConfig::default(), dir.path()).unwrap();
        (dir, store)
    }

    fn sample() -> Vec<Record> {
        let mut dune = Record::new(2, "Dune", "Herbert", 1965);
        dune.status = Status::Borrowed;
        vec![
            Record::new(1, "Тестовая книга", "Автор", 2020),
            dune,
            Record::new(5, "Hyperion", "Simmons", 1989),
        ]
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let (_dir, store) = setup();
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_load_empty_file_is_empty() {
        let (_dir, store) = setup();
        fs::write(store.data_path(), "").unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_load_whitespace_file_is_empty() {
        let (_dir, store) = setup();
        fs::write(store.data_path(), "  \n\t").unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_load_invalid_json_is_empty() {
        let (_dir, store) = setup();
        fs::write(store.data_path(), "{invalid_json}").unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_load_wrong_shape_is_empty() {
        let (_dir, store) = setup();
        fs::write(store.data_path(), r#"{"id": 1}"#).unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_load_duplicate_ids_is_empty() {
        let (_dir, store) = setup();
        fs::write(
            store.data_path(),
            r#"[{"id": 1, "title": "A", "author": "a", "year": 2000},
                {"id": 1, "title": "C", "author": "c", "year": 2001}]"#,
        )
        .unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_load_zero_id_is_empty() {
        let (_dir, store) = setup();
        fs::write(
            store.data_path(),
            r#"[{"id": 0, "title": "Z", "author": "z", "year": 2000}]"#,
        )
        .unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_load_accepts_largest_id() {
        let (_dir, store) = setup();
        fs::write(
            store.data_path(),
            format!(
                r#"[{{"id": {}, "title": "Last", "author": "l", "year": 2000}}]"#,
                u64::MAX
            ),
        )
        .unwrap();
        assert_eq!(store.load()[0].id, u64::MAX);
    }

    #[test]
    fn test_new_rejects_scratch_equal_to_data() {
        let dir = TempDir::new().unwrap();
        let data = dir.path().join("library.json");
        let same = dir.path().join(".").join("library.json");
        assert!(JsonFileStore::new(data, same).is_err());
    }

    #[test]
    fn test_load_unreadable_location_is_empty() {
        let (dir, store) = setup();
        let as_dir = dir.path().join("a-directory");
        fs::create_dir(&as_dir).unwrap();
        assert!(store.load_from(&as_dir).is_empty());
    }

    #[test]
    fn test_save_then_load_preserves_records_and_order() {
        let (_dir, store) = setup();
        let records = sample();

        store.save(&records).unwrap();
        let loaded = store.load();
        assert_eq!(loaded, records);

        // Saving what was loaded changes nothing
        store.save(&loaded).unwrap();
        assert_eq!(store.load(), records);
    }

    #[test]
    fn test_saved_file_is_readable_json_array() {
        let (_dir, store) = setup();
        store.save(&sample()).unwrap();

        let on_disk = fs::read_to_string(store.data_path()).unwrap();
        assert!(on_disk.contains("Тестовая книга"), "non-ASCII is kept verbatim");

        let value: serde_json::Value = serde_json::from_str(&on_disk).unwrap();
        let items = value.as_array().unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[1]["status"], "BORROWED");
        assert_eq!(items[0]["status"], "AVAILABLE");
    }

    #[test]
    fn test_save_leaves_no_scratch_file() {
        let (_dir, store) = setup();
        store.save(&sample()).unwrap();
        assert!(store.data_path().exists());
        assert!(!store.scratch_path().exists());
    }

    #[test]
    fn test_save_creates_missing_directory() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");
        let store = JsonFileStore::from_config(&CatalogConfig::default(), &nested).unwrap();

        store.save(&sample()).unwrap();
        assert_eq!(store.load().len(), 3);
    }

    #[test]
    fn test_save_to_overrides_locations() {
        let (dir, store) = setup();
        let location = dir.path().join("test_library.json");
        let scratch = dir.path().join("test_library.tmp");

        store.save_to(&sample(), &location, &scratch).unwrap();
        assert_eq!(store.load_from(&location), sample());
        assert!(!store.data_path().exists());
        assert!(!scratch.exists());
    }

    #[test]
    fn test_failed_scratch_write_keeps_previous_file() {
        let (dir, store) = setup();
        store.save(&sample()).unwrap();
        let before = fs::read_to_string(store.data_path()).unwrap();

        // A directory where the scratch file should go makes the write fail
        let blocked = dir.path().join("blocked.tmp");
        fs::create_dir(&blocked).unwrap();

        let result = store.save_to(&[], store.data_path(), &blocked);
        assert!(result.is_err());
        assert_eq!(fs::read_to_string(store.data_path()).unwrap(), before);
        assert_eq!(store.load(), sample());
    }

    #[test]
    fn test_failed_replace_removes_scratch_file() {
        let (dir, store) = setup();

        // Renaming a file over a non-empty directory fails after the scratch is written
        let target = dir.path().join("target.json");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("keep"), "x").unwrap();
        let scratch = dir.path().join("target.tmp");

        let result = store.save_to(&sample(), &target, &scratch);
        assert!(result.is_err());
        assert!(!scratch.exists(), "scratch file must be cleaned up");
        assert!(target.join("keep").exists());
    }
}
