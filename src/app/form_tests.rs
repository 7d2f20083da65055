use super::*;
use crate::test_utils::test_helpers::key;

#[test]
fn test_new_form_has_one_field_per_schema_field() {
    let form = FormState::new(RecordKind::Product);
    assert_eq!(form.fields.len(), 5);
    assert_eq!(form.title(), " Add Product ");
}

#[test]
fn test_for_record_prefills_values() {
    let record = Record::new()
        .with("id", "B001")
        .with("title", "Dune")
        .with("author", "Herbert")
        .with("available", false);
    let form = FormState::for_record(RecordKind::Book, &record);

    assert_eq!(form.inputs(), vec!["B001", "Dune", "Herbert", "no"]);
    assert_eq!(form.title(), " Edit Book ");
}

#[test]
fn test_prefilled_form_parses_back_to_same_record() {
    let record = Record::new()
        .with("id", "P001")
        .with("name", "Laptop")
        .with("category", "Electronics")
        .with("price", 999.5)
        .with("stock", 4);
    let form = FormState::for_record(RecordKind::Product, &record);

    let parsed = RecordKind::Product.parse_form(&form.inputs()).unwrap();
    assert_eq!(parsed, record);
}

#[test]
fn test_focus_wraps_around() {
    let mut form = FormState::new(RecordKind::Roster);
    assert_eq!(form.handle_key(key(KeyCode::BackTab)), FormKey::Handled);
    assert_eq!(form.focus(), 3);
    form.handle_key(key(KeyCode::Tab));
    assert_eq!(form.focus(), 0);

    form.set_focus(9);
    assert_eq!(form.focus(), 0);
}

#[test]
fn test_typing_goes_to_focused_field_and_clears_error() {
    let mut form = FormState::new(RecordKind::Employee);
    form.error = Some("Name is required".to_string());
    form.set_focus(1);
    form.handle_key(key(KeyCode::Char('A')));

    assert_eq!(form.inputs()[1], "A");
    assert_eq!(form.error, None);
}

#[test]
fn test_enter_and_esc() {
    let mut form = FormState::new(RecordKind::Student);
    assert_eq!(form.handle_key(key(KeyCode::Enter)), FormKey::Submit);
    assert_eq!(form.handle_key(key(KeyCode::Esc)), FormKey::Cancel);
}

#[test]
fn test_generated_id_label() {
    let form = FormState::new(RecordKind::Student);
    assert_eq!(form.fields[0].label(), "Student ID (blank = auto)");
}
