use ratatui::{
    Frame,
    crossterm::event::{KeyCode, KeyEvent, KeyModifiers},
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders},
};
use tui_textarea::{CursorMove, TextArea};

/// Single-line text input with a bordered title
pub struct InputField {
    pub textarea: TextArea<'static>,
    label: String,
}

impl InputField {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            textarea: Self::blank_textarea(),
            label: label.into(),
        }
    }

    fn blank_textarea() -> TextArea<'static> {
        let mut textarea = TextArea::default();
        textarea.set_cursor_line_style(Style::default());
        textarea
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn value(&self) -> &str {
        self.textarea.lines().first().map(String::as_str).unwrap_or("")
    }

    pub fn set_value(&mut self, value: &str) {
        self.clear();
        self.textarea.insert_str(value);
        self.textarea.move_cursor(CursorMove::End);
    }

    pub fn clear(&mut self) {
        self.textarea = Self::blank_textarea();
    }

    /// Feed a key to the editor, returning true if the text changed
    ///
    /// Keys that would add a line or belong to navigation between fields are
    /// left for the caller.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let reserved = matches!(
            key.code,
            KeyCode::Enter | KeyCode::Tab | KeyCode::BackTab | KeyCode::Esc | KeyCode::Up | KeyCode::Down
        ) || (key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('m') | KeyCode::Char('j')));
        if reserved {
            return false;
        }
        self.textarea.input(key)
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, focused: bool) {
        let border = if focused { Color::Yellow } else { Color::DarkGray };
        self.textarea.set_block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", self.label))
                .border_style(Style::default().fg(border)),
        );
        let cursor = if focused {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };
        self.textarea.set_cursor_style(cursor);
        frame.render_widget(&self.textarea, area);
    }
}

#[cfg(test)]
#[path = "input_field_tests.rs"]
mod input_field_tests;
