use std::io;
use std::time::{Duration, Instant};

use ratatui::crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};

use super::actions::RowAction;
use super::app_state::{App, Screen};
use super::form::FormKey;
use super::lookup_screen::{
    LookupScreen, RegisterFocus, RegisterRefusal, WeatherRefusal, WeatherScreen,
};
use super::table_screen::{TableMode, TableScreen};
use crate::notification::NotificationState;
use crate::records::SubmitKind;

impl App {
    /// Wait up to `timeout` for one terminal event and handle it
    pub fn handle_events(&mut self, timeout: Duration) -> io::Result<()> {
        if !event::poll(timeout)? {
            return Ok(());
        }
        match event::read()? {
            // Check that it's a key press event to avoid duplicates
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key_event(key),
            Event::Mouse(mouse) => self.handle_mouse_event(mouse),
            _ => {}
        }
        Ok(())
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match &mut self.screen {
            Screen::Lookup(screen) => {
                if key.code == KeyCode::Esc {
                    self.should_quit = true;
                    return;
                }
                lookup_key(screen, &mut self.notification, key);
            }
            Screen::Table(screen) => {
                if table_key(screen, &mut self.notification, key) {
                    self.should_quit = true;
                }
            }
        }
    }

    pub fn handle_mouse_event(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        if let Some(action) = self.actions.action_at(mouse.column, mouse.row).cloned() {
            log::debug!("Click at {},{} -> {:?}", mouse.column, mouse.row, action);
            self.dispatch(action);
        }
    }

    /// Perform a row action, whether it came from a click or a key
    pub fn dispatch(&mut self, action: RowAction) {
        let toast = &mut self.notification;
        match &mut self.screen {
            Screen::Table(screen) => table_action(screen, toast, action),
            Screen::Lookup(LookupScreen::Register(screen)) => match action {
                RowAction::Submit => register_submit(screen, toast),
                RowAction::Focus(0) => screen.focus = RegisterFocus::Username,
                RowAction::Focus(_) => screen.focus = RegisterFocus::Email,
                _ => {}
            },
            Screen::Lookup(LookupScreen::Weather(screen)) => {
                if action == RowAction::Submit {
                    weather_search(screen, toast);
                }
            }
            Screen::Lookup(LookupScreen::Products(_)) => {}
        }
    }
}

fn lookup_key(screen: &mut LookupScreen, toast: &mut NotificationState, key: KeyEvent) {
    match screen {
        LookupScreen::Register(screen) => match key.code {
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => screen.toggle_focus(),
            KeyCode::Enter => register_submit(screen, toast),
            _ => {
                screen.handle_key(key);
            }
        },
        LookupScreen::Products(pane) => {
            pane.handle_key(key);
        }
        LookupScreen::Weather(screen) => {
            if key.code == KeyCode::Enter {
                weather_search(screen, toast);
            } else {
                screen.handle_key(key);
            }
        }
    }
}

fn weather_search(screen: &mut WeatherScreen, toast: &mut NotificationState) {
    match screen.search() {
        Ok(()) => {}
        Err(WeatherRefusal::BlankCity) => toast.show_error("Please enter a city name"),
        Err(WeatherRefusal::Busy) => log::debug!("Ignoring weather search while one is running"),
    }
}

fn register_submit(screen: &mut super::lookup_screen::RegisterScreen, toast: &mut NotificationState) {
    match screen.submit() {
        Ok(message) => toast.show(&message),
        Err(RegisterRefusal::UsernameUnavailable) => {
            toast.show_error("Please choose an available username.")
        }
        Err(RegisterRefusal::InvalidEmail) => toast.show_error("Please enter a valid email."),
    }
}

/// Handle a key on a table screen; returns true to quit
fn table_key(screen: &mut TableScreen, toast: &mut NotificationState, key: KeyEvent) -> bool {
    match &mut screen.mode {
        TableMode::Form(form) => {
            match form.handle_key(key) {
                FormKey::Submit => table_action(screen, toast, RowAction::Submit),
                FormKey::Cancel => screen.cancel(),
                FormKey::Handled => {}
            }
            false
        }
        TableMode::ConfirmDelete(_) => {
            match key.code {
                KeyCode::Char('y') | KeyCode::Enter => table_action(screen, toast, RowAction::Confirm),
                KeyCode::Char('n') | KeyCode::Esc => screen.cancel(),
                _ => {}
            }
            false
        }
        TableMode::Search => {
            match key.code {
                KeyCode::Esc | KeyCode::Enter | KeyCode::Down | KeyCode::Tab => {
                    screen.mode = TableMode::Browse;
                }
                _ => {
                    screen.search_key_at(key, Instant::now());
                }
            }
            false
        }
        TableMode::Browse => browse_key(screen, toast, key),
    }
}

fn browse_key(screen: &mut TableScreen, toast: &mut NotificationState, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return true,
        KeyCode::Down | KeyCode::Char('j') => screen.select_next(),
        KeyCode::Up | KeyCode::Char('k') => screen.select_prev(),
        KeyCode::Char('a') => screen.open_add(),
        KeyCode::Char('/') => {
            screen.start_search();
        }
        KeyCode::Char('r') => match screen.reload() {
            Ok(count) => toast.show(&format!("Loaded {} records", count)),
            Err(e) => toast.show_error(&format!("Failed to load data: {}", e)),
        },
        KeyCode::Char('e') | KeyCode::Enter => {
            if let Some(id) = screen.selected_id() {
                table_action(screen, toast, RowAction::Edit(id));
            }
        }
        KeyCode::Char('d') | KeyCode::Delete => {
            if let Some(id) = screen.selected_id() {
                table_action(screen, toast, RowAction::Delete(id));
            }
        }
        KeyCode::Char('t') if screen.collection.kind().toggle_field().is_some() => {
            if let Some(id) = screen.selected_id() {
                table_action(screen, toast, RowAction::Toggle(id));
            }
        }
        _ => {}
    }
    false
}

fn table_action(screen: &mut TableScreen, toast: &mut NotificationState, action: RowAction) {
    let noun = screen.collection.kind().noun();
    // Row buttons stay registered under popups
    let browsing = matches!(screen.mode, TableMode::Browse | TableMode::Search);
    match action {
        RowAction::Select(index) if browsing => {
            screen.mode = TableMode::Browse;
            screen.select(index);
        }
        RowAction::Edit(id) if browsing => {
            if let Err(e) = screen.open_edit(&id) {
                toast.show_error(&e.to_string());
            }
        }
        RowAction::Delete(id) if browsing => screen.request_delete(&id),
        RowAction::Toggle(id) if browsing => match screen.toggle(&id) {
            Ok(true) => toast.show(&format!("{} {} returned", noun, id)),
            Ok(false) => toast.show(&format!("{} {} issued", noun, id)),
            Err(e) => toast.show_error(&e.to_string()),
        },
        RowAction::Select(_) | RowAction::Edit(_) | RowAction::Delete(_) | RowAction::Toggle(_) => {}
        RowAction::Submit => match screen.submit_form() {
            Ok(SubmitKind::Created) => toast.show(&format!("{} added successfully!", noun)),
            Ok(SubmitKind::Updated) => toast.show(&format!("{} updated successfully!", noun)),
            Err(e) => toast.show_error(&e.to_string()),
        },
        RowAction::Confirm => match screen.confirm_delete() {
            Ok(removed) => toast.show(&format!("{} {} deleted", noun, removed.id())),
            Err(e) => toast.show_error(&e.to_string()),
        },
        RowAction::Cancel => screen.cancel(),
        RowAction::Focus(index) => {
            if let TableMode::Form(form) = &mut screen.mode {
                form.set_focus(index);
            }
        }
    }
}

#[cfg(test)]
#[path = "app_events_tests.rs"]
mod app_events_tests;
