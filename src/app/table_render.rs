use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::actions::{ActionMap, RowAction};
use super::form::FormState;
use super::table_screen::{TableMode, TableScreen};
use crate::records::{FieldKind, Record, RecordKind, StockLevel, format_amount, grade, stock_level};
use crate::widgets::popup;

/// Column computed from the record rather than stored in it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Derived {
    Grade,
    StockLevel,
}

#[derive(Debug, Clone, Copy)]
enum Column {
    Field {
        name: &'static str,
        label: &'static str,
        kind: FieldKind,
    },
    Derived(Derived),
}

impl Column {
    fn header(&self) -> &'static str {
        match *self {
            Column::Field { name: "id", .. } => "ID",
            Column::Field { label, .. } => label,
            Column::Derived(Derived::Grade) => "Grade",
            Column::Derived(Derived::StockLevel) => "Level",
        }
    }

    fn width(&self) -> u16 {
        match *self {
            Column::Field { name: "id", .. } => 8,
            Column::Field {
                kind: FieldKind::Text,
                ..
            } => 20,
            Column::Field { .. } => 11,
            Column::Derived(Derived::Grade) => 7,
            Column::Derived(Derived::StockLevel) => 10,
        }
    }
}

fn columns(kind: RecordKind) -> Vec<Column> {
    let mut columns: Vec<Column> = kind
        .fields()
        .iter()
        .map(|spec| Column::Field {
            name: spec.name,
            label: spec.label,
            kind: spec.kind,
        })
        .collect();
    match kind {
        RecordKind::Roster => columns.push(Column::Derived(Derived::Grade)),
        RecordKind::Product => columns.push(Column::Derived(Derived::StockLevel)),
        _ => {}
    }
    columns
}

/// Cell text and color for one column of a record
fn cell(record: &Record, column: &Column) -> (String, Option<Color>) {
    match *column {
        Column::Field {
            name,
            kind: FieldKind::Flag,
            ..
        } => match record.flag(name) {
            Some(true) => ("Available".to_string(), Some(Color::Green)),
            Some(false) => ("Issued".to_string(), Some(Color::Red)),
            None => (String::new(), None),
        },
        Column::Field {
            name: name @ ("price" | "salary"),
            ..
        } => match record.number(name) {
            Some(amount) => (format!("${}", format_amount(amount)), None),
            None => (record.text(name), None),
        },
        Column::Field { name, .. } => (record.text(name), None),
        Column::Derived(Derived::Grade) => match record.number("marks") {
            Some(marks) => {
                let letter = grade(marks);
                let color = if letter == 'F' { Color::Red } else { Color::Green };
                (letter.to_string(), Some(color))
            }
            None => ("-".to_string(), None),
        },
        Column::Derived(Derived::StockLevel) => match record.number("stock").map(stock_level) {
            Some(StockLevel::Critical) => ("Critical".to_string(), Some(Color::Red)),
            Some(StockLevel::Low) => ("Low".to_string(), Some(Color::Yellow)),
            Some(StockLevel::Normal) => ("OK".to_string(), Some(Color::Green)),
            None => ("-".to_string(), None),
        },
    }
}

/// Pad or cut `text` to exactly `width` cells, keeping one cell of gap
fn fit(text: &str, width: u16) -> String {
    let max = width.saturating_sub(1) as usize;
    let cut: String = text.chars().take(max).collect();
    format!("{:<width$}", cut, width = width as usize)
}

pub fn render_screen(
    screen: &mut TableScreen,
    actions: &mut ActionMap,
    frame: &mut Frame,
    area: Rect,
) {
    let search_height = if screen.search.is_some() { 3 } else { 0 };
    let layout = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(search_height),
        Constraint::Min(3),
    ])
    .split(area);

    let stats = Paragraph::new(format!(" {}", screen.collection.stats()))
        .style(Style::default().fg(Color::Cyan));
    frame.render_widget(stats, layout[0]);

    let searching = matches!(screen.mode, TableMode::Search);
    if let Some(search) = &mut screen.search {
        search.input.render(frame, layout[1], searching);
    }

    render_table(screen, actions, frame, layout[2]);

    match &mut screen.mode {
        TableMode::Form(form) => render_form(form, actions, frame, area),
        TableMode::ConfirmDelete(id) => {
            let noun = screen.collection.kind().noun();
            render_confirm(noun, id, actions, frame, area)
        }
        TableMode::Browse | TableMode::Search => {}
    }
}

fn render_table(screen: &TableScreen, actions: &mut ActionMap, frame: &mut Frame, area: Rect) {
    let kind = screen.collection.kind();
    let visible = screen.collection.visible();

    let mut title = format!(" {} ({}) ", kind.title(), visible.len());
    if !screen.collection.is_persistent() {
        title.push_str("[not saved] ");
    }
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height == 0 {
        return;
    }

    let columns = columns(kind);
    let header: String = columns.iter().map(|c| fit(c.header(), c.width())).collect();
    frame.render_widget(
        Paragraph::new(header).style(Style::default().add_modifier(Modifier::BOLD)),
        Rect { height: 1, ..inner },
    );

    if visible.is_empty() {
        let empty = Paragraph::new(" No records").style(Style::default().fg(Color::DarkGray));
        frame.render_widget(
            empty,
            Rect {
                y: inner.y + 1,
                height: inner.height.saturating_sub(1).min(1),
                ..inner
            },
        );
        return;
    }

    let rows = inner.height.saturating_sub(1) as usize;
    let offset = (screen.selected + 1).saturating_sub(rows);

    for (slot, (index, record)) in visible.iter().enumerate().skip(offset).take(rows).enumerate() {
        let row = Rect {
            y: inner.y + 1 + slot as u16,
            height: 1,
            ..inner
        };
        actions.register(row, RowAction::Select(index));

        let selected = index == screen.selected;
        let base = if selected {
            Style::default().bg(Color::DarkGray)
        } else {
            Style::default()
        };

        let mut spans = Vec::new();
        let mut x = 0u16;
        for column in &columns {
            let (text, color) = cell(record, column);
            let style = color.map_or(base, |c| base.fg(c));
            spans.push(Span::styled(fit(&text, column.width()), style));
            x += column.width();
        }

        let id = record.id();
        let mut buttons = Vec::new();
        if let Some(field) = kind.toggle_field() {
            let label = if record.flag(field) == Some(true) {
                "[Issue]"
            } else {
                "[Return]"
            };
            buttons.push((label, RowAction::Toggle(id.clone()), Color::Yellow));
        }
        buttons.push(("[Edit]", RowAction::Edit(id.clone()), Color::Cyan));
        buttons.push(("[Del]", RowAction::Delete(id), Color::Red));

        for (label, action, color) in buttons {
            let width = label.len() as u16;
            if x + width <= row.width {
                actions.register(
                    Rect {
                        x: row.x + x,
                        width,
                        ..row
                    },
                    action,
                );
            }
            spans.push(Span::styled(label, base.fg(color)));
            spans.push(Span::styled(" ", base));
            x += width + 1;
        }

        frame.render_widget(Paragraph::new(Line::from(spans)).style(base), row);
    }
}

fn render_form(form: &mut FormState, actions: &mut ActionMap, frame: &mut Frame, area: Rect) {
    let field_count = form.fields.len() as u16;
    let popup_area = popup::centered_popup(area, 60, field_count * 3 + 4);
    popup::clear_area(frame, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(form.title())
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let mut layout: Vec<Constraint> = (0..field_count).map(|_| Constraint::Length(3)).collect();
    layout.push(Constraint::Length(1));
    layout.push(Constraint::Length(1));
    let rows = Layout::vertical(layout).split(inner);

    let focus = form.focus();
    for (i, field) in form.fields.iter_mut().enumerate() {
        field.render(frame, rows[i], i == focus);
        actions.register(rows[i], RowAction::Focus(i));
    }

    if let Some(error) = &form.error {
        frame.render_widget(
            Paragraph::new(format!(" {}", error)).style(Style::default().fg(Color::Red)),
            rows[field_count as usize],
        );
    }

    let buttons = rows[field_count as usize + 1];
    render_buttons(
        frame,
        actions,
        buttons,
        &[
            ("[Save]", RowAction::Submit, Color::Green),
            ("[Cancel]", RowAction::Cancel, Color::DarkGray),
        ],
    );
}

fn render_confirm(
    noun: &str,
    id: &str,
    actions: &mut ActionMap,
    frame: &mut Frame,
    area: Rect,
) {
    let popup_area = popup::centered_popup(area, 44, 5);
    popup::clear_area(frame, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Confirm Delete ")
        .border_style(Style::default().fg(Color::Red));
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let rows = Layout::vertical([Constraint::Length(2), Constraint::Length(1)]).split(inner);
    frame.render_widget(
        Paragraph::new(format!(" Delete {} {}?", noun.to_lowercase(), id)),
        rows[0],
    );
    render_buttons(
        frame,
        actions,
        rows[1],
        &[
            ("[Yes]", RowAction::Confirm, Color::Red),
            ("[No]", RowAction::Cancel, Color::DarkGray),
        ],
    );
}

fn render_buttons(
    frame: &mut Frame,
    actions: &mut ActionMap,
    area: Rect,
    buttons: &[(&str, RowAction, Color)],
) {
    let mut x = area.x + 1;
    let mut spans = vec![Span::raw(" ")];
    for (label, action, color) in buttons {
        let width = label.len() as u16;
        if x + width <= area.right() {
            actions.register(
                Rect {
                    x,
                    width,
                    ..area
                },
                action.clone(),
            );
        }
        spans.push(Span::styled(
            *label,
            Style::default().fg(*color).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw("  "));
        x += width + 2;
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
#[path = "table_render_tests.rs"]
mod table_render_tests;
