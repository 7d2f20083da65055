//! Add / edit form for table screens

use ratatui::crossterm::event::{KeyCode, KeyEvent};

use super::input_field::InputField;
use crate::records::{FieldKind, Record, RecordKind};

pub struct FormState {
    kind: RecordKind,
    pub fields: Vec<InputField>,
    focus: usize,
    editing: bool,
    /// Last validation failure, shown under the fields
    pub error: Option<String>,
}

/// What a key did to the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKey {
    Submit,
    Cancel,
    Handled,
}

impl FormState {
    /// Empty form for a new record
    pub fn new(kind: RecordKind) -> Self {
        let fields = kind
            .fields()
            .iter()
            .map(|spec| InputField::new(field_label(kind, spec.name, spec.label, spec.kind)))
            .collect();
        Self {
            kind,
            fields,
            focus: 0,
            editing: false,
            error: None,
        }
    }

    /// Form prefilled from an existing record
    pub fn for_record(kind: RecordKind, record: &Record) -> Self {
        let mut form = Self::new(kind);
        for (field, spec) in form.fields.iter_mut().zip(kind.fields()) {
            let text = match spec.kind {
                FieldKind::Flag => match record.flag(spec.name) {
                    Some(true) => "yes".to_string(),
                    Some(false) => "no".to_string(),
                    None => String::new(),
                },
                _ => record.text(spec.name),
            };
            field.set_value(&text);
        }
        form.editing = true;
        form
    }

    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    pub fn title(&self) -> String {
        let verb = if self.editing { "Edit" } else { "Add" };
        format!(" {} {} ", verb, self.kind.noun())
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn set_focus(&mut self, index: usize) {
        if index < self.fields.len() {
            self.focus = index;
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % self.fields.len();
    }

    pub fn focus_prev(&mut self) {
        self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
    }

    /// Raw text of every field, in schema order
    pub fn inputs(&self) -> Vec<String> {
        self.fields.iter().map(|f| f.value().to_string()).collect()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> FormKey {
        match key.code {
            KeyCode::Esc => FormKey::Cancel,
            KeyCode::Enter => FormKey::Submit,
            KeyCode::Tab | KeyCode::Down => {
                self.focus_next();
                FormKey::Handled
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus_prev();
                FormKey::Handled
            }
            _ => {
                if self.fields[self.focus].handle_key(key) {
                    self.error = None;
                }
                FormKey::Handled
            }
        }
    }
}

fn field_label(kind: RecordKind, name: &str, label: &str, field_kind: FieldKind) -> String {
    if name == "id" && kind.generates_ids() {
        format!("{} (blank = auto)", label)
    } else if field_kind == FieldKind::Flag {
        format!("{} (yes/no)", label)
    } else {
        label.to_string()
    }
}

#[cfg(test)]
#[path = "form_tests.rs"]
mod form_tests;
