//! Screen regions mapped to row actions
//!
//! Each render rebuilds the map from scratch, so a click always resolves
//! against what is currently on screen. Later registrations sit on top of
//! earlier ones, which lets popups shadow the table underneath.

use ratatui::layout::{Position, Rect};

/// Something the user can trigger by clicking
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowAction {
    /// Move the selection to a visible row
    Select(usize),
    Edit(String),
    Delete(String),
    /// Flip the record's toggle field (book issue / return)
    Toggle(String),
    /// Submit the active form
    Submit,
    /// Confirm the pending delete
    Confirm,
    /// Close the active popup without changes
    Cancel,
    /// Move input focus to a form field
    Focus(usize),
}

#[derive(Debug, Default)]
pub struct ActionMap {
    targets: Vec<(Rect, RowAction)>,
}

impl ActionMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.targets.clear();
    }

    pub fn register(&mut self, area: Rect, action: RowAction) {
        if area.width > 0 && area.height > 0 {
            self.targets.push((area, action));
        }
    }

    /// Topmost action under the given cell
    pub fn action_at(&self, column: u16, row: u16) -> Option<&RowAction> {
        let position = Position::new(column, row);
        self.targets
            .iter()
            .rev()
            .find(|(area, _)| area.contains(position))
            .map(|(_, action)| action)
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Areas registered for `action`, in registration order
    pub fn areas_for(&self, action: &RowAction) -> Vec<Rect> {
        self.targets
            .iter()
            .filter(|(_, a)| a == action)
            .map(|(area, _)| *area)
            .collect()
    }
}

#[cfg(test)]
#[path = "actions_tests.rs"]
mod actions_tests;
