use ratatui::{Frame, layout::Rect, widgets::Clear};

/// Rect of at most `width` x `height` centered inside `area`
pub fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let popup_width = width.min(area.width);
    let popup_height = height.min(area.height);

    Rect {
        x: area.x + area.width.saturating_sub(popup_width) / 2,
        y: area.y + area.height.saturating_sub(popup_height) / 2,
        width: popup_width,
        height: popup_height,
    }
}

/// Rect pinned to the top-right corner of `area`, one cell in from the edge
pub fn top_right_popup(area: Rect, width: u16, height: u16) -> Rect {
    let popup_width = width.min(area.width.saturating_sub(2));
    let popup_height = height.min(area.height);

    Rect {
        x: area.x + area.width.saturating_sub(popup_width + 1),
        y: area.y + 1.min(area.height.saturating_sub(popup_height)),
        width: popup_width,
        height: popup_height,
    }
}

pub fn clear_area(frame: &mut Frame, area: Rect) {
    frame.render_widget(Clear, area);
}

#[cfg(test)]
#[path = "popup_tests.rs"]
mod popup_tests;
