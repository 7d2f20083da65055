use std::fs;
use std::path::{Path, PathBuf};

use super::{DocumentStore, parse_records};
use crate::error::LabError;
use crate::records::Record;

/// Read-only JSON file holding an array of records
#[derive(Debug, Clone)]
pub struct StaticJsonStore {
    path: PathBuf,
}

impl StaticJsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DocumentStore for StaticJsonStore {
    fn load(&self) -> Result<Vec<Record>, LabError> {
        let text = fs::read_to_string(&self.path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => {
                LabError::NotFound(format!("{} file not found", self.path.display()))
            }
            _ => LabError::from(e),
        })?;
        parse_records(&text)
    }

    fn save(&self, _records: &[Record]) -> Result<(), LabError> {
        Err(LabError::ReadOnly(self.describe()))
    }

    fn is_writable(&self) -> bool {
        false
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
