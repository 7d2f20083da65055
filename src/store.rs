//! Document stores
//!
//! A document store is the backing for one list of records: either a static
//! JSON file (read-only) or a named entry in the persistent key-value store.

mod key_value;
mod static_json;

use serde_json::Value;

pub use key_value::{KeyValueStore, KvDocumentStore};
pub use static_json::StaticJsonStore;

use crate::error::LabError;
use crate::records::Record;

pub trait DocumentStore {
    fn load(&self) -> Result<Vec<Record>, LabError>;

    fn save(&self, records: &[Record]) -> Result<(), LabError>;

    fn is_writable(&self) -> bool;

    /// Human-readable location for logs and messages
    fn describe(&self) -> String;
}

/// Parse a JSON document that must be an array of objects
pub fn parse_records(text: &str) -> Result<Vec<Record>, LabError> {
    let value: Value = serde_json::from_str(text)?;
    records_from_value(value)
}

pub(crate) fn records_from_value(value: Value) -> Result<Vec<Record>, LabError> {
    let Value::Array(items) = value else {
        return Err(LabError::Parse("expected an array of records".to_string()));
    };

    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| {
            Record::try_from(item)
                .map_err(|_| LabError::Parse(format!("entry {} is not an object", i)))
        })
        .collect()
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod store_tests;
