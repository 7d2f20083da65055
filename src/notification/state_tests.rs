use super::*;

#[test]
fn test_show_sets_success_message() {
    let mut state = NotificationState::default();
    state.show("Student added");

    let current = state.current().unwrap();
    assert_eq!(current.message, "Student added");
    assert_eq!(current.style, NotificationStyle::Success);
}

#[test]
fn test_new_toast_replaces_previous() {
    let mut state = NotificationState::default();
    state.show("first");
    state.show_error("second");

    assert_eq!(state.current_message(), Some("second"));
    assert_eq!(state.current().unwrap().style, NotificationStyle::Error);
}

#[test]
fn test_toast_expires_after_duration() {
    let mut state = NotificationState::new(3000);
    let start = Instant::now();
    state.show_styled_at("Saved", NotificationStyle::Success, start);

    assert!(!state.clear_if_expired_at(start + Duration::from_millis(2999)));
    assert_eq!(state.current_message(), Some("Saved"));

    assert!(state.clear_if_expired_at(start + Duration::from_millis(3000)));
    assert!(state.current().is_none());
}

#[test]
fn test_clear_if_expired_without_toast() {
    let mut state = NotificationState::new(10);
    assert!(!state.clear_if_expired());
}
