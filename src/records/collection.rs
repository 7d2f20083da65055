//! Record collection controller
//!
//! Owns the in-memory list, the id being edited and the active filter for one
//! table screen, and writes every mutation through to its document store when
//! the store accepts writes.

use super::record::Record;
use super::schema::RecordKind;
use super::stats::CollectionStats;
use crate::error::LabError;
use crate::store::DocumentStore;

/// What a successful submit did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitKind {
    Created,
    Updated,
}

pub struct Collection {
    kind: RecordKind,
    store: Box<dyn DocumentStore>,
    records: Vec<Record>,
    editing_id: Option<String>,
    filter: String,
}

impl Collection {
    pub fn new(kind: RecordKind, store: Box<dyn DocumentStore>) -> Self {
        Self {
            kind,
            store,
            records: Vec::new(),
            editing_id: None,
            filter: String::new(),
        }
    }

    /// Replace the in-memory list with the store's contents
    ///
    /// On failure the list is left empty.
    pub fn load(&mut self) -> Result<usize, LabError> {
        self.editing_id = None;
        match self.store.load() {
            Ok(records) => {
                self.records = records;
                log::info!(
                    "Loaded {} records from {}",
                    self.records.len(),
                    self.store.describe()
                );
                Ok(self.records.len())
            }
            Err(e) => {
                self.records.clear();
                log::error!("Failed to load {}: {}", self.store.describe(), e);
                Err(e)
            }
        }
    }

    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn is_persistent(&self) -> bool {
        self.store.is_writable()
    }

    pub fn find(&self, id: &str) -> Option<&Record> {
        self.records.iter().find(|r| r.id() == id)
    }

    fn position(&self, id: &str) -> Result<usize, LabError> {
        self.records
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| LabError::NotFound(format!("{} {}", self.kind.noun(), id)))
    }

    /// Records matching the active filter, in stored order
    pub fn visible(&self) -> Vec<&Record> {
        let query = self.filter.to_lowercase();
        match self.kind.filter_field() {
            Some(field) if !query.is_empty() => self
                .records
                .iter()
                .filter(|r| r.text(field).to_lowercase().contains(&query))
                .collect(),
            _ => self.records.iter().collect(),
        }
    }

    pub fn set_filter(&mut self, query: &str) {
        self.filter = query.trim().to_string();
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn editing_id(&self) -> Option<&str> {
        self.editing_id.as_deref()
    }

    /// Enter edit mode for `id`, returning the record to prefill the form
    pub fn begin_edit(&mut self, id: &str) -> Result<&Record, LabError> {
        let index = self.position(id)?;
        self.editing_id = Some(id.to_string());
        Ok(&self.records[index])
    }

    pub fn cancel_edit(&mut self) {
        self.editing_id = None;
    }

    /// Validate and store a record from the form
    ///
    /// Creates when not editing (rejecting duplicate ids), otherwise replaces
    /// the record being edited and leaves edit mode.
    pub fn submit(&mut self, record: Record) -> Result<SubmitKind, LabError> {
        self.kind.validate(&record)?;
        let id = record.id();

        let mut next = self.records.clone();
        let kind = match self.editing_id.clone() {
            Some(original_id) => {
                let index = self.position(&original_id)?;
                if id != original_id && self.find(&id).is_some() {
                    return Err(LabError::Validation("ID already exists".to_string()));
                }
                next[index] = record;
                SubmitKind::Updated
            }
            None => {
                if self.find(&id).is_some() {
                    return Err(LabError::Validation("ID already exists".to_string()));
                }
                next.push(record);
                SubmitKind::Created
            }
        };

        self.commit(next)?;
        self.editing_id = None;
        log::info!("{:?} {} {}", kind, self.kind.noun(), id);
        Ok(kind)
    }

    /// Remove the record with `id`
    pub fn delete(&mut self, id: &str) -> Result<Record, LabError> {
        let index = self.position(id)?;
        let mut next = self.records.clone();
        let removed = next.remove(index);
        self.commit(next)?;

        if self.editing_id.as_deref() == Some(id) {
            self.editing_id = None;
        }
        log::info!("Deleted {} {}", self.kind.noun(), id);
        Ok(removed)
    }

    /// Flip the schema's toggle field, returning the new value
    pub fn toggle(&mut self, id: &str) -> Result<bool, LabError> {
        let field = self.kind.toggle_field().ok_or_else(|| {
            LabError::Validation(format!("{} records cannot be toggled", self.kind.noun()))
        })?;
        let index = self.position(id)?;

        let mut next = self.records.clone();
        let current = next[index].flag(field).unwrap_or(false);
        next[index].set(field, !current);
        self.commit(next)?;
        Ok(!current)
    }

    pub fn stats(&self) -> CollectionStats {
        CollectionStats::compute(self.kind, &self.records)
    }

    /// Persist (when writable) and then adopt the new list
    fn commit(&mut self, next: Vec<Record>) -> Result<(), LabError> {
        if self.store.is_writable() {
            self.store.save(&next)?;
        }
        self.records = next;
        Ok(())
    }
}

#[cfg(test)]
#[path = "collection_tests.rs"]
mod collection_tests;
