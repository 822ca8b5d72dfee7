//! Integer key/value persistence for ~/.slime_clicker/ save data.
//!
//! `PersistenceStore` is the contract the ledger writes through.
//! `JsonPrefsStore` keeps the values in one JSON object on disk and
//! `MemoryStore` keeps them in-process.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::core::constants::{PREFS_DIR_NAME, PREFS_FILE_NAME};

pub trait PersistenceStore {
    fn get_int(&self, key: &str, default: i64) -> i64;
    fn set_int(&mut self, key: &str, value: i64);
    /// Makes every `set_int` since the last flush durable.
    fn flush(&mut self) -> io::Result<()>;
}

/// Get the ~/.slime_clicker/ directory path, creating it if needed.
pub fn prefs_dir() -> io::Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "Could not determine home directory",
        )
    })?;
    let dir = home_dir.join(PREFS_DIR_NAME);
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Get the full path for a save file in ~/.slime_clicker/.
pub fn save_path(filename: &str) -> io::Result<PathBuf> {
    Ok(prefs_dir()?.join(filename))
}

/// Load a JSON file, returning `T::default()` if missing or invalid.
pub fn load_json_or_default<T: Default + serde::de::DeserializeOwned>(path: &Path) -> T {
    match fs::read_to_string(path) {
        Ok(json) => serde_json::from_str(&json).unwrap_or_default(),
        Err(_) => T::default(),
    }
}

/// Save a value as pretty-printed JSON, replacing the file atomically.
pub fn save_json<T: serde::Serialize>(path: &Path, data: &T) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, i64>,
    flushes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn flush_count(&self) -> usize {
        self.flushes
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }
}

impl PersistenceStore for MemoryStore {
    fn get_int(&self, key: &str, default: i64) -> i64 {
        self.values.get(key).copied().unwrap_or(default)
    }

    fn set_int(&mut self, key: &str, value: i64) {
        self.values.insert(key.to_string(), value);
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flushes += 1;
        Ok(())
    }
}

/// File-backed store. Writes stay in memory until `flush`.
#[derive(Debug, Clone)]
pub struct JsonPrefsStore {
    path: PathBuf,
    values: BTreeMap<String, i64>,
}

impl JsonPrefsStore {
    /// Opens (or starts) the store at `path`. A missing or corrupt file
    /// yields an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = load_json_or_default(&path);
        Self { path, values }
    }

    /// Opens ~/.slime_clicker/prefs.json.
    pub fn open_default() -> io::Result<Self> {
        Ok(Self::open(save_path(PREFS_FILE_NAME)?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PersistenceStore for JsonPrefsStore {
    fn get_int(&self, key: &str, default: i64) -> i64 {
        self.values.get(key).copied().unwrap_or(default)
    }

    fn set_int(&mut self, key: &str, value: i64) {
        self.values.insert(key.to_string(), value);
    }

    fn flush(&mut self) -> io::Result<()> {
        save_json(&self.path, &self.values)
    }
}
