use ratatui::{
    Frame,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
};

use super::state::{NotificationState, NotificationStyle};
use crate::widgets::popup;

const MAX_WIDTH: u16 = 50;

/// Draw the current toast in the top-right corner, dropping it if expired
pub fn render_notification(frame: &mut Frame, state: &mut NotificationState) {
    state.clear_if_expired();
    let Some(notification) = state.current() else {
        return;
    };

    let color = match notification.style {
        NotificationStyle::Success => Color::Green,
        NotificationStyle::Error => Color::Red,
    };

    let width = (notification.message.chars().count() as u16 + 4).min(MAX_WIDTH);
    let area = popup::top_right_popup(frame.area(), width, 3);
    popup::clear_area(frame, area);

    let toast = Paragraph::new(Line::from(notification.message.as_str()))
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        );
    frame.render_widget(toast, area);
}

#[cfg(test)]
#[path = "render_tests.rs"]
mod render_tests;
