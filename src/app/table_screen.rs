//! Record tables with add / edit / delete popups

use std::time::Instant;

use ratatui::crossterm::event::KeyEvent;

use super::form::FormState;
use super::input_field::InputField;
use crate::error::LabError;
use crate::pipeline::Debouncer;
use crate::records::{Collection, Record, SubmitKind};

pub enum TableMode {
    Browse,
    Form(FormState),
    /// Waiting for the user to confirm deleting this id
    ConfirmDelete(String),
    /// Typing into the search box
    Search,
}

/// Debounced filter box over the schema's filter field
pub struct SearchBox {
    pub input: InputField,
    pub debouncer: Debouncer,
}

pub struct TableScreen {
    pub collection: Collection,
    /// Index into the visible rows
    pub selected: usize,
    pub mode: TableMode,
    pub search: Option<SearchBox>,
}

impl TableScreen {
    pub fn new(collection: Collection, debounce_ms: u64) -> Self {
        let search = collection.kind().filter_field().map(|_| SearchBox {
            input: InputField::new("Search by category"),
            debouncer: Debouncer::new(debounce_ms),
        });
        Self {
            collection,
            selected: 0,
            mode: TableMode::Browse,
            search,
        }
    }

    pub fn visible_len(&self) -> usize {
        self.collection.visible().len()
    }

    pub fn selected_record(&self) -> Option<&Record> {
        self.collection.visible().get(self.selected).copied()
    }

    pub fn selected_id(&self) -> Option<String> {
        self.selected_record().map(Record::id)
    }

    pub fn select(&mut self, index: usize) {
        if index < self.visible_len() {
            self.selected = index;
        }
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.visible_len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        let len = self.visible_len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }

    pub fn open_add(&mut self) {
        self.collection.cancel_edit();
        self.mode = TableMode::Form(FormState::new(self.collection.kind()));
    }

    pub fn open_edit(&mut self, id: &str) -> Result<(), LabError> {
        let kind = self.collection.kind();
        let form = FormState::for_record(kind, self.collection.begin_edit(id)?);
        self.mode = TableMode::Form(form);
        Ok(())
    }

    /// Parse and store the open form
    ///
    /// On failure the form stays open with the message attached.
    pub fn submit_form(&mut self) -> Result<SubmitKind, LabError> {
        let TableMode::Form(form) = &mut self.mode else {
            return Err(LabError::Validation("No form is open".to_string()));
        };

        let result = form
            .kind()
            .parse_form(&form.inputs())
            .and_then(|record| self.collection.submit(record));

        match result {
            Ok(kind) => {
                self.mode = TableMode::Browse;
                self.clamp_selection();
                Ok(kind)
            }
            Err(e) => {
                form.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    pub fn cancel(&mut self) {
        self.collection.cancel_edit();
        self.mode = TableMode::Browse;
    }

    pub fn request_delete(&mut self, id: &str) {
        self.mode = TableMode::ConfirmDelete(id.to_string());
    }

    pub fn confirm_delete(&mut self) -> Result<Record, LabError> {
        let TableMode::ConfirmDelete(id) = std::mem::replace(&mut self.mode, TableMode::Browse)
        else {
            return Err(LabError::Validation("Nothing to delete".to_string()));
        };
        let removed = self.collection.delete(&id)?;
        self.clamp_selection();
        Ok(removed)
    }

    pub fn toggle(&mut self, id: &str) -> Result<bool, LabError> {
        self.collection.toggle(id)
    }

    pub fn reload(&mut self) -> Result<usize, LabError> {
        self.mode = TableMode::Browse;
        let result = self.collection.load();
        self.clamp_selection();
        result
    }

    pub fn start_search(&mut self) -> bool {
        if self.search.is_some() {
            self.mode = TableMode::Search;
            true
        } else {
            false
        }
    }

    /// Edit the search text and restart the filter countdown
    pub fn search_key_at(&mut self, key: KeyEvent, now: Instant) -> bool {
        let Some(search) = &mut self.search else {
            return false;
        };
        let changed = search.input.handle_key(key);
        if changed {
            search.debouncer.schedule_at(now);
        }
        changed
    }

    /// Apply the filter once the countdown elapses; true if it was applied
    pub fn tick_at(&mut self, now: Instant) -> bool {
        let Some(search) = &mut self.search else {
            return false;
        };
        if !search.debouncer.fire_at(now) {
            return false;
        }
        let query = search.input.value().to_string();
        self.collection.set_filter(&query);
        self.selected = 0;
        log::debug!(
            "Filter {:?} shows {} of {} records",
            query,
            self.visible_len(),
            self.collection.len()
        );
        true
    }
}

#[cfg(test)]
#[path = "table_screen_tests.rs"]
mod table_screen_tests;
