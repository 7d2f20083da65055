use super::*;
use crate::app::actions::RowAction;
use crate::app::launch::{ScreenKind, open_screen};
use crate::app::lookup_screen::{LookupPane, RegisterFocus, RegisterScreen, WeatherScreen};
use crate::config::Config;
use crate::pipeline::{SubmitGate, Verdict};
use crate::records::Record;
use crate::test_utils::test_helpers::{after_debounce, key, manual_pipeline, type_text};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::crossterm::event::{KeyCode, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use tempfile::TempDir;

const BOOKS: &str = r#"[
    {"id": "B001", "title": "Dune", "author": "Frank Herbert", "available": true},
    {"id": "B002", "title": "Emma", "author": "Jane Austen", "available": false}
]"#;

fn render_app(app: &mut App, width: u16, height: u16) -> String {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal.draw(|f| app.render(f)).unwrap();
    terminal.backend().to_string()
}

fn table_app(kind: ScreenKind, dir: &TempDir, document: &str) -> App {
    let path = dir.path().join("document.json");
    std::fs::write(&path, document).unwrap();
    let config = Config::default();
    App::new(open_screen(kind, Some(path), &config).unwrap(), &config)
}

fn click_action(app: &mut App, action: &RowAction) {
    let area = *app
        .actions
        .areas_for(action)
        .last()
        .unwrap_or_else(|| panic!("{:?} is not on screen", action));
    app.handle_mouse_event(MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column: area.x,
        row: area.y,
        modifiers: KeyModifiers::empty(),
    });
}

#[test]
fn test_library_table_shows_rows_and_stats() {
    let dir = TempDir::new().unwrap();
    let mut app = table_app(ScreenKind::Books, &dir, BOOKS);
    let output = render_app(&mut app, 100, 20);

    assert!(output.contains("crudlab"));
    assert!(output.contains("Library (2)"));
    assert!(output.contains("Total: 2 | Available: 1 | Issued: 1"));
    assert!(output.contains("Frank Herbert"));
    assert!(output.contains("Issued"));
    assert!(output.contains("[Issue]"));
    assert!(output.contains("[Return]"));
    assert!(output.contains("t: issue/return"));
}

#[test]
fn test_static_document_is_marked_unsaved() {
    let dir = TempDir::new().unwrap();
    let mut app = table_app(ScreenKind::Books, &dir, BOOKS);
    assert!(render_app(&mut app, 100, 20).contains("[not saved]"));
}

#[test]
fn test_every_row_registers_its_buttons() {
    let dir = TempDir::new().unwrap();
    let mut app = table_app(ScreenKind::Books, &dir, BOOKS);
    render_app(&mut app, 100, 20);

    for id in ["B001", "B002"] {
        assert_eq!(app.actions.areas_for(&RowAction::Edit(id.to_string())).len(), 1);
        assert_eq!(app.actions.areas_for(&RowAction::Delete(id.to_string())).len(), 1);
        assert_eq!(app.actions.areas_for(&RowAction::Toggle(id.to_string())).len(), 1);
    }
    assert_eq!(app.actions.areas_for(&RowAction::Select(1)).len(), 1);
}

#[test]
fn test_click_delete_then_confirm() {
    let dir = TempDir::new().unwrap();
    let mut app = table_app(ScreenKind::Books, &dir, BOOKS);
    render_app(&mut app, 100, 20);

    click_action(&mut app, &RowAction::Delete("B002".to_string()));
    let output = render_app(&mut app, 100, 20);
    assert!(output.contains("Delete book B002?"));
    assert!(output.contains("[Yes]"));

    click_action(&mut app, &RowAction::Confirm);
    let output = render_app(&mut app, 100, 20);
    assert!(output.contains("Book B002 deleted"));
    assert!(output.contains("Library (1)"));
    assert!(!output.contains("Jane Austen"));
}

#[test]
fn test_confirm_popup_shadows_rows_below() {
    let dir = TempDir::new().unwrap();
    let mut app = table_app(ScreenKind::Books, &dir, BOOKS);
    render_app(&mut app, 100, 20);
    app.handle_key_event(key(KeyCode::Char('d')));
    render_app(&mut app, 100, 20);

    let yes = app.actions.areas_for(&RowAction::Confirm)[0];
    assert_eq!(app.actions.action_at(yes.x, yes.y), Some(&RowAction::Confirm));
}

#[test]
fn test_click_toggle_updates_availability() {
    let dir = TempDir::new().unwrap();
    let mut app = table_app(ScreenKind::Books, &dir, BOOKS);
    render_app(&mut app, 100, 20);

    click_action(&mut app, &RowAction::Toggle("B001".to_string()));
    let output = render_app(&mut app, 100, 20);
    assert!(output.contains("Book B001 issued"));
    assert!(output.contains("Available: 0 | Issued: 2"));
}

#[test]
fn test_add_form_popup() {
    let dir = TempDir::new().unwrap();
    let mut app = table_app(ScreenKind::Books, &dir, BOOKS);
    app.handle_key_event(key(KeyCode::Char('a')));
    let output = render_app(&mut app, 100, 24);

    assert!(output.contains("Add Book"));
    assert!(output.contains("Book ID"));
    assert!(output.contains("(yes/no)"));
    assert!(output.contains("[Save]"));
    assert!(output.contains("[Cancel]"));
    assert!(output.contains("Esc: cancel"));
}

#[test]
fn test_form_field_click_moves_focus_and_error_is_shown() {
    let dir = TempDir::new().unwrap();
    let mut app = table_app(ScreenKind::Books, &dir, BOOKS);
    app.handle_key_event(key(KeyCode::Char('a')));
    render_app(&mut app, 100, 24);

    click_action(&mut app, &RowAction::Focus(2));
    if let Screen::Table(table) = &app.screen
        && let TableMode::Form(form) = &table.mode
    {
        assert_eq!(form.focus(), 2);
    } else {
        panic!("Expected the form to stay open");
    }

    click_action(&mut app, &RowAction::Submit);
    let output = render_app(&mut app, 100, 24);
    assert!(output.contains("[Save]"));
    assert!(app.notification.current().is_some());
}

#[test]
fn test_inventory_levels_and_search_box() {
    let dir = TempDir::new().unwrap();
    let mut app = table_app(
        ScreenKind::Inventory,
        &dir,
        r#"[
            {"id": "P001", "name": "Laptop", "category": "Electronics", "price": 1200.5, "stock": 1},
            {"id": "P002", "name": "Mouse", "category": "Electronics", "price": 25, "stock": 4},
            {"id": "P003", "name": "Chair", "category": "Furniture", "price": 80, "stock": 30}
        ]"#,
    );
    let output = render_app(&mut app, 110, 20);

    assert!(output.contains("Search by category"));
    assert!(output.contains("Products: 3"));
    assert!(output.contains("$1,200.50"));
    assert!(output.contains("Critical"));
    assert!(output.contains("Low"));
    assert!(output.contains("/: search"));
}

#[test]
fn test_roster_shows_grades() {
    let dir = TempDir::new().unwrap();
    let mut app = table_app(
        ScreenKind::Roster,
        &dir,
        r#"[{"id": "S001", "name": "Asha", "course": "Physics", "marks": 91}]"#,
    );
    let output = render_app(&mut app, 100, 16);
    assert!(output.contains("Grade"));
    assert!(output.contains("Avg marks: 91"));
}

#[test]
fn test_empty_table_message() {
    let dir = TempDir::new().unwrap();
    let mut app = table_app(ScreenKind::Books, &dir, "[]");
    assert!(render_app(&mut app, 100, 16).contains("No records"));
}

#[test]
fn test_selection_scrolls_into_view() {
    let dir = TempDir::new().unwrap();
    let books: Vec<String> = (1..=20)
        .map(|i| {
            format!(
                r#"{{"id": "B{:03}", "title": "Title {}", "author": "A", "available": true}}"#,
                i, i
            )
        })
        .collect();
    let mut app = table_app(ScreenKind::Books, &dir, &format!("[{}]", books.join(",")));

    for _ in 0..19 {
        app.handle_key_event(key(KeyCode::Down));
    }
    let output = render_app(&mut app, 100, 14);
    assert!(output.contains("B020"));
    assert!(!output.contains("B001"));
}

#[test]
fn test_register_screen_buttons_and_status() {
    let (pipeline, mut worker) = manual_pipeline::<()>(300, 3, SubmitGate::RequiresMatch);
    let mut app = App::new(
        Screen::Lookup(LookupScreen::Register(RegisterScreen::new(pipeline))),
        &Config::default(),
    );

    let output = render_app(&mut app, 80, 20);
    assert!(output.contains("[ Register ]"));

    click_action(&mut app, &RowAction::Focus(1));
    if let Screen::Lookup(LookupScreen::Register(screen)) = &mut app.screen {
        assert_eq!(screen.focus, RegisterFocus::Email);
        type_text(&mut screen.username.input, "carol");
        screen.username.pipeline.on_input("carol");
    }
    app.tick_at(after_debounce());
    assert!(render_app(&mut app, 80, 20).contains("Checking availability..."));

    worker.answer(Verdict::Match(()));
    app.tick_at(after_debounce());
    assert!(render_app(&mut app, 80, 20).contains("Username available!"));
}

#[test]
fn test_product_results_are_listed() {
    let (pipeline, mut worker) = manual_pipeline(300, 2, SubmitGate::WhenIdle);
    let mut app = App::new(
        Screen::Lookup(LookupScreen::Products(LookupPane::new("Search products", pipeline))),
        &Config::default(),
    );
    assert!(render_app(&mut app, 80, 20).contains("Type to search by name or category"));

    if let Screen::Lookup(LookupScreen::Products(pane)) = &mut app.screen {
        type_text(&mut pane.input, "lamp");
        pane.pipeline.on_input("lamp");
    }
    app.tick_at(after_debounce());
    worker.answer(Verdict::Match(vec![
        Record::new()
            .with("name", "Desk Lamp")
            .with("category", "Furniture")
            .with("price", 45),
    ]));
    app.tick_at(after_debounce());

    let output = render_app(&mut app, 80, 20);
    assert!(output.contains("1 products found"));
    assert!(output.contains("Desk Lamp"));
    assert!(output.contains("$45"));
}

#[test]
fn test_weather_screen_idle() {
    let (pipeline, _worker) = manual_pipeline(300, 1, SubmitGate::WhenIdle);
    let mut app = App::new(
        Screen::Lookup(LookupScreen::Weather(WeatherScreen::new(pipeline))),
        &Config::default(),
    );
    let output = render_app(&mut app, 80, 20);
    assert!(output.contains("[ Search Weather ]"));
    assert!(output.contains("Enter: search"));
}
