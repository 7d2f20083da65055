use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use super::{DocumentStore, records_from_value};
use crate::error::LabError;
use crate::records::Record;

/// Persistent string-keyed JSON values, one `<key>.json` file per key
#[derive(Debug, Clone)]
pub struct KeyValueStore {
    dir: PathBuf,
}

impl KeyValueStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, key: &str) -> Result<PathBuf, LabError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(LabError::Validation(format!("Invalid storage key {:?}", key)));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }

    /// Value stored under `key`, `None` if never set
    pub fn get(&self, key: &str) -> Result<Option<Value>, LabError> {
        let path = self.entry_path(key)?;
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_str(&text)?))
    }

    /// Store `value` under `key`, replacing any previous value
    pub fn set(&self, key: &str, value: &Value) -> Result<(), LabError> {
        let path = self.entry_path(key)?;
        fs::create_dir_all(&self.dir)?;

        // Write then rename so a crash never leaves a truncated entry
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_string_pretty(value)?)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

/// A record list stored under one key, seeded on first load
#[derive(Debug, Clone)]
pub struct KvDocumentStore {
    kv: KeyValueStore,
    key: String,
    seed: Vec<Record>,
}

impl KvDocumentStore {
    pub fn new(kv: KeyValueStore, key: impl Into<String>, seed: Vec<Record>) -> Self {
        Self {
            kv,
            key: key.into(),
            seed,
        }
    }
}

impl DocumentStore for KvDocumentStore {
    fn load(&self) -> Result<Vec<Record>, LabError> {
        match self.kv.get(&self.key)? {
            Some(value) => records_from_value(value),
            None => {
                log::info!("Seeding {} with {} records", self.key, self.seed.len());
                self.save(&self.seed)?;
                Ok(self.seed.clone())
            }
        }
    }

    fn save(&self, records: &[Record]) -> Result<(), LabError> {
        let value = serde_json::to_value(records)?;
        self.kv.set(&self.key, &value)
    }

    fn is_writable(&self) -> bool {
        true
    }

    fn describe(&self) -> String {
        format!("{} ({})", self.key, self.kv.dir().display())
    }
}
