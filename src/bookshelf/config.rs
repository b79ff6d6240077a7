use crate::error::{CatalogError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";
pub const DEFAULT_DATA_FILE: &str = "library.json";
pub const DEFAULT_SCRATCH_FILE: &str = "library.tmp";

/// Storage locations for the catalog, stored in `<data dir>/config.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogConfig {
    /// File holding the catalog (relative to the data dir unless absolute)
    #[serde(default = "default_data_file")]
    pub data_file: String,

    /// Scratch file written before the atomic rename onto `data_file`
    #[serde(default = "default_scratch_file")]
    pub scratch_file: String,
}

fn default_data_file() -> String {
    DEFAULT_DATA_FILE.to_string()
}

fn default_scratch_file() -> String {
    DEFAULT_SCRATCH_FILE.to_string()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            scratch_file: default_scratch_file(),
        }
    }
}

impl CatalogConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(CatalogError::Io)?;
        let config: CatalogConfig = serde_json::from_str(&content).map_err(|e| {
            CatalogError::Config(format!("{}: {}", config_path.display(), e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(CatalogError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(CatalogError::Serialization)?;
        fs::write(config_path, content).map_err(CatalogError::Io)?;
        Ok(())
    }

    /// Rejects configurations the atomic rename cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.data_file.trim().is_empty() || self.scratch_file.trim().is_empty() {
            return Err(CatalogError::Config(
                "data_file and scratch_file must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Like [`validate`](Self::validate), and also checks that both names do not
    /// resolve to the same file under `data_dir`.
    pub fn validate_in<P: AsRef<Path>>(&self, data_dir: P) -> Result<()> {
        self.validate()?;
        check_distinct(&self.data_path(&data_dir), &self.scratch_path(&data_dir))
    }

    pub fn data_path<P: AsRef<Path>>(&self, data_dir: P) -> PathBuf {
        resolve(data_dir.as_ref(), &self.data_file)
    }

    pub fn scratch_path<P: AsRef<Path>>(&self, data_dir: P) -> PathBuf {
        resolve(data_dir.as_ref(), &self.scratch_file)
    }
}

/// Fails if `data` and `scratch` name the same file. Creating the scratch file
/// would then truncate the live catalog before the rename.
pub fn check_distinct(data: &Path, scratch: &Path) -> Result<()> {
    if same_location(data, scratch) {
        return Err(CatalogError::Config(format!(
            "scratch file {} must differ from data file {}",
            scratch.display(),
            data.display()
        )));
    }
    Ok(())
}

fn same_location(a: &Path, b: &Path) -> bool {
    // Path equality already ignores interior `.` components and repeated separators
    if a == b {
        return true;
    }
    if a.file_name() != b.file_name() {
        return false;
    }
    let parent = |p: &Path| {
        p.parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."))
            .canonicalize()
            .ok()
    };
    match (parent(a), parent(b)) {
        (Some(pa), Some(pb)) => pa == pb,
        _ => false,
    }
}

fn resolve(dir: &Path, name: &str) -> PathBuf {
    let path = Path::new(name);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        dir.join(path)
    }
}
