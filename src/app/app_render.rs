use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::app_state::{App, Screen};
use super::lookup_screen::LookupScreen;
use super::table_screen::TableMode;
use super::{lookup_render, table_render};
use crate::notification::render_notification;

impl App {
    pub fn render(&mut self, frame: &mut Frame) {
        self.actions.clear();

        let layout = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(frame.area());

        render_title(frame, layout[0], self.screen.title());

        match &mut self.screen {
            Screen::Lookup(screen) => {
                lookup_render::render_screen(screen, &mut self.actions, frame, layout[1])
            }
            Screen::Table(screen) => {
                table_render::render_screen(screen, &mut self.actions, frame, layout[1])
            }
        }

        render_help_line(frame, layout[2], help_text(&self.screen));
        render_notification(frame, &mut self.notification);
    }
}

fn render_title(frame: &mut Frame, area: Rect, title: &str) {
    let line = Line::from(vec![
        Span::styled(
            " crudlab ",
            Style::default().fg(Color::Black).bg(Color::Cyan),
        ),
        Span::styled(
            format!(" {}", title),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn help_text(screen: &Screen) -> &'static str {
    match screen {
        Screen::Lookup(LookupScreen::Register(_)) => {
            " Tab: switch field | Enter: register | Esc: quit"
        }
        Screen::Lookup(LookupScreen::Products(_)) => " Type to search | Esc: quit",
        Screen::Lookup(LookupScreen::Weather(_)) => " Enter: search | Esc: quit",
        Screen::Table(table) => match table.mode {
            TableMode::Form(_) => " Tab: next field | Enter: save | Esc: cancel",
            TableMode::ConfirmDelete(_) => " y: delete | n: keep",
            TableMode::Search => " Type a category | Enter/Esc: back to table",
            TableMode::Browse if table.search.is_some() => {
                " a: add | e: edit | d: delete | /: search | r: reload | q: quit"
            }
            TableMode::Browse if table.collection.kind().toggle_field().is_some() => {
                " a: add | e: edit | d: delete | t: issue/return | r: reload | q: quit"
            }
            TableMode::Browse => " a: add | e: edit | d: delete | r: reload | q: quit",
        },
    }
}

fn render_help_line(frame: &mut Frame, area: Rect, text: &str) {
    let help = Paragraph::new(text).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, area);
}

#[cfg(test)]
#[path = "app_render_tests.rs"]
mod app_render_tests;
