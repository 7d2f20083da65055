use std::fs;

use serde_json::json;
use tempfile::TempDir;

use super::*;
use crate::records::RecordKind;

fn sample_records() -> Vec<Record> {
    vec![
        Record::new()
            .with("id", "P001")
            .with("name", "Laptop")
            .with("category", "Electronics")
            .with("price", 999.5)
            .with("stock", 4),
        Record::new()
            .with("id", "P002")
            .with("name", "Desk")
            .with("category", "Furniture")
            .with("price", 150)
            .with("stock", 12),
    ]
}

#[test]
fn test_parse_records_valid_array() {
    let records = parse_records(r#"[{"id": "B001", "title": "Dune"}, {"id": "B002"}]"#).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id(), "B001");
    assert_eq!(records[0].text("title"), "Dune");
}

#[test]
fn test_parse_records_rejects_non_array() {
    let err = parse_records(r#"{"id": "B001"}"#).unwrap_err();
    assert!(matches!(err, LabError::Parse(msg) if msg.contains("array")));
}

#[test]
fn test_parse_records_rejects_non_object_entries() {
    let err = parse_records(r#"[{"id": "B001"}, 42]"#).unwrap_err();
    assert!(matches!(err, LabError::Parse(msg) if msg.contains("entry 1")));
}

#[test]
fn test_parse_records_malformed_json() {
    let err = parse_records("[{").unwrap_err();
    assert!(matches!(err, LabError::Parse(_)));
}

#[test]
fn test_static_store_missing_file_is_not_found() {
    let store = StaticJsonStore::new("/nonexistent/inventory.json");
    let err = store.load().unwrap_err();
    assert!(matches!(err, LabError::NotFound(msg) if msg.contains("inventory.json")));
}

#[test]
fn test_static_store_loads_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("inventory.json");
    fs::write(&path, serde_json::to_string(&sample_records()).unwrap()).unwrap();

    let store = StaticJsonStore::new(&path);
    assert_eq!(store.load().unwrap(), sample_records());
    assert!(!store.is_writable());
}

#[test]
fn test_static_store_refuses_writes() {
    let store = StaticJsonStore::new("/tmp/any.json");
    let err = store.save(&sample_records()).unwrap_err();
    assert!(matches!(err, LabError::ReadOnly(_)));
}

#[test]
fn test_key_value_get_missing_key() {
    let temp_dir = TempDir::new().unwrap();
    let kv = KeyValueStore::new(temp_dir.path());
    assert_eq!(kv.get("students").unwrap(), None);
}

#[test]
fn test_key_value_set_get_replace() {
    let temp_dir = TempDir::new().unwrap();
    let kv = KeyValueStore::new(temp_dir.path().join("nested"));

    kv.set("prefs", &json!({"theme": "dark"})).unwrap();
    assert_eq!(kv.get("prefs").unwrap(), Some(json!({"theme": "dark"})));

    kv.set("prefs", &json!({"theme": "light"})).unwrap();
    assert_eq!(kv.get("prefs").unwrap(), Some(json!({"theme": "light"})));
}

#[test]
fn test_key_value_rejects_path_like_keys() {
    let temp_dir = TempDir::new().unwrap();
    let kv = KeyValueStore::new(temp_dir.path());
    assert!(matches!(
        kv.set("../escape", &json!(1)),
        Err(LabError::Validation(_))
    ));
    assert!(matches!(kv.get(""), Err(LabError::Validation(_))));
}

#[test]
fn test_key_value_corrupt_entry_is_parse_error() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("students.json"), "not json").unwrap();
    let kv = KeyValueStore::new(temp_dir.path());
    assert!(matches!(kv.get("students"), Err(LabError::Parse(_))));
}

#[test]
fn test_kv_document_store_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let store = KvDocumentStore::new(KeyValueStore::new(temp_dir.path()), "inventory", vec![]);

    store.save(&sample_records()).unwrap();
    let reloaded = store.load().unwrap();

    assert_eq!(reloaded, sample_records());
    // Field order survives the trip
    let fields: Vec<&String> = reloaded[0].fields().map(|(k, _)| k).collect();
    assert_eq!(fields, vec!["id", "name", "category", "price", "stock"]);
}

#[test]
fn test_kv_document_store_seeds_on_first_load() {
    let temp_dir = TempDir::new().unwrap();
    let kv = KeyValueStore::new(temp_dir.path());
    let seed = RecordKind::Student.default_records();
    let store = KvDocumentStore::new(kv.clone(), "students", seed.clone());

    assert_eq!(store.load().unwrap(), seed);
    // Seed was written through
    assert!(kv.get("students").unwrap().is_some());
}

#[test]
fn test_kv_document_store_keeps_saved_list_over_seed() {
    let temp_dir = TempDir::new().unwrap();
    let kv = KeyValueStore::new(temp_dir.path());
    let store = KvDocumentStore::new(kv, "students", RecordKind::Student.default_records());

    store.save(&[]).unwrap();
    assert!(store.load().unwrap().is_empty());
}
