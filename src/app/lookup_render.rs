use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::actions::{ActionMap, RowAction};
use super::lookup_screen::{LookupPane, LookupScreen, RegisterFocus, RegisterScreen, WeatherScreen};
use crate::pipeline::{Display, Outcome};
use crate::records::{Record, format_amount};

pub fn render_screen(
    screen: &mut LookupScreen,
    actions: &mut ActionMap,
    frame: &mut Frame,
    area: Rect,
) {
    match screen {
        LookupScreen::Register(screen) => render_register(screen, actions, frame, area),
        LookupScreen::Products(pane) => render_products(pane, frame, area),
        LookupScreen::Weather(screen) => render_weather(screen, actions, frame, area),
    }
}

/// A clickable `[ label ]` button at the start of `area`
fn render_button(
    frame: &mut Frame,
    actions: &mut ActionMap,
    area: Rect,
    label: &str,
    enabled: bool,
) {
    let text = format!("[ {} ]", label);
    let style = if enabled {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let button = Rect {
        x: area.x + 1,
        y: area.y,
        width: (text.chars().count() as u16).min(area.width.saturating_sub(1)),
        height: 1,
    };
    frame.render_widget(Paragraph::new(Span::styled(text, style)), button);
    actions.register(button, RowAction::Submit);
}

fn status_line(text: &str, color: Color) -> Paragraph<'_> {
    Paragraph::new(Line::from(Span::styled(
        format!(" {}", text),
        Style::default().fg(color),
    )))
}

fn render_register(
    screen: &mut RegisterScreen,
    actions: &mut ActionMap,
    frame: &mut Frame,
    area: Rect,
) {
    let layout = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(0),
    ])
    .split(area);

    let username_focused = screen.focus == RegisterFocus::Username;
    screen.username.input.render(frame, layout[0], username_focused);
    actions.register(layout[0], RowAction::Focus(0));

    let status = match screen.username.pipeline.display() {
        Display::Loading { .. } => Some(Color::Yellow),
        _ => screen.status().map(|(_, ok)| if ok { Color::Green } else { Color::Red }),
    };
    if let (Some((text, _)), Some(color)) = (screen.status(), status) {
        frame.render_widget(status_line(text, color), layout[1]);
    }

    screen.email.render(frame, layout[2], !username_focused);
    actions.register(layout[2], RowAction::Focus(1));

    let enabled = screen.username.pipeline.submit_enabled();
    render_button(frame, actions, layout[4], "Register", enabled);
}

fn product_line(product: &Record) -> Line<'static> {
    let price = product
        .number("price")
        .map(|p| format!("${}", format_amount(p)))
        .unwrap_or_default();
    Line::from(vec![
        Span::styled(
            format!(" {:<28}", product.text("name")),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("{:>12}  ", price), Style::default().fg(Color::Green)),
        Span::styled(product.text("category"), Style::default().fg(Color::DarkGray)),
    ])
}

fn render_products(pane: &mut LookupPane<Vec<Record>>, frame: &mut Frame, area: Rect) {
    let layout = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Min(0),
    ])
    .split(area);

    pane.input.render(frame, layout[0], true);

    let (status, color) = match pane.pipeline.display() {
        Display::Empty => ("Type to search by name or category".to_string(), Color::DarkGray),
        Display::Loading { .. } => ("Searching...".to_string(), Color::Yellow),
        Display::Settled(result) => match &result.outcome {
            Outcome::Match(products) => (format!("{} products found", products.len()), Color::Green),
            Outcome::NoMatch => ("No products found".to_string(), Color::DarkGray),
            Outcome::Error(_) => (
                "Failed to load products. Please try again.".to_string(),
                Color::Red,
            ),
        },
    };
    frame.render_widget(status_line(&status, color), layout[1]);

    if let Display::Settled(result) = pane.pipeline.display()
        && let Outcome::Match(products) = &result.outcome
    {
        let lines: Vec<Line> = products.iter().map(product_line).collect();
        let list = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Results ")
                .border_style(Style::default().fg(Color::Cyan)),
        );
        frame.render_widget(list, layout[2]);
    }
}

fn render_weather(
    screen: &mut WeatherScreen,
    actions: &mut ActionMap,
    frame: &mut Frame,
    area: Rect,
) {
    let layout = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(0),
    ])
    .split(area);

    screen.city.input.render(frame, layout[0], true);

    let busy = screen.city.pipeline.is_busy();
    let label = if busy { "Searching..." } else { "Search Weather" };
    render_button(frame, actions, layout[1], label, !busy);

    match screen.city.pipeline.display() {
        Display::Settled(result) => match &result.outcome {
            Outcome::Match(report) => {
                let lines = vec![
                    Line::from(format!(" Temperature: {}°C", report.temperature)),
                    Line::from(format!(" Humidity:    {}%", report.humidity)),
                    Line::from(format!(" Condition:   {}", report.condition)),
                ];
                let card = Paragraph::new(lines).block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(format!(" {} ", report.city))
                        .border_style(Style::default().fg(Color::Cyan)),
                );
                frame.render_widget(card, layout[3]);
                if let Some(city) = &screen.last_city {
                    let text = format!("Last searched: {}", city);
                    frame.render_widget(status_line(&text, Color::DarkGray), layout[2]);
                }
            }
            Outcome::Error(message) => {
                frame.render_widget(status_line(message, Color::Red), layout[2])
            }
            Outcome::NoMatch => {
                frame.render_widget(status_line("No weather data", Color::DarkGray), layout[2])
            }
        },
        Display::Loading { query } => frame.render_widget(
            status_line(&format!("Fetching weather for {}...", query), Color::Yellow),
            layout[2],
        ),
        Display::Empty => {
            if let Some(city) = &screen.last_city {
                let text = format!("Last searched: {}", city);
                frame.render_widget(status_line(&text, Color::DarkGray), layout[2]);
            }
        }
    }
}
