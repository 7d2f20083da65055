use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Number, Value};

use super::record::Record;
use crate::error::LabError;

static ROSTER_ID: LazyLock<Regex> = LazyLock::new(|| id_pattern(r"^S\d{3}$"));
static BOOK_ID: LazyLock<Regex> = LazyLock::new(|| id_pattern(r"^B\d{3}$"));
static PRODUCT_ID: LazyLock<Regex> = LazyLock::new(|| id_pattern(r"^P\d{3}$"));

fn id_pattern(pattern: &str) -> Regex {
    Regex::new(pattern).expect("valid id pattern")
}

fn id_matches(pattern: &Regex, record: &Record) -> bool {
    pattern.is_match(&record.id())
}

/// How form text is converted into a field value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer,
    Decimal,
    Flag,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
}

const fn field(name: &'static str, label: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec { name, label, kind }
}

const STUDENT_FIELDS: &[FieldSpec] = &[
    field("id", "Student ID", FieldKind::Text),
    field("name", "Name", FieldKind::Text),
    field("department", "Department", FieldKind::Text),
    field("marks", "Marks", FieldKind::Integer),
];

const ROSTER_FIELDS: &[FieldSpec] = &[
    field("id", "Student ID", FieldKind::Text),
    field("name", "Name", FieldKind::Text),
    field("course", "Course", FieldKind::Text),
    field("marks", "Marks", FieldKind::Integer),
];

const BOOK_FIELDS: &[FieldSpec] = &[
    field("id", "Book ID", FieldKind::Text),
    field("title", "Title", FieldKind::Text),
    field("author", "Author", FieldKind::Text),
    field("available", "Available", FieldKind::Flag),
];

const EMPLOYEE_FIELDS: &[FieldSpec] = &[
    field("id", "Employee ID", FieldKind::Text),
    field("name", "Name", FieldKind::Text),
    field("department", "Department", FieldKind::Text),
    field("salary", "Salary", FieldKind::Integer),
];

const PRODUCT_FIELDS: &[FieldSpec] = &[
    field("id", "Product ID", FieldKind::Text),
    field("name", "Name", FieldKind::Text),
    field("category", "Category", FieldKind::Text),
    field("price", "Price", FieldKind::Decimal),
    field("stock", "Stock", FieldKind::Integer),
];

/// Per-screen record schema
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    /// Key-value backed student list with generated ids
    Student,
    /// File backed student list with `S001` ids and grades
    Roster,
    Book,
    Employee,
    Product,
}

impl RecordKind {
    pub fn fields(&self) -> &'static [FieldSpec] {
        match self {
            RecordKind::Student => STUDENT_FIELDS,
            RecordKind::Roster => ROSTER_FIELDS,
            RecordKind::Book => BOOK_FIELDS,
            RecordKind::Employee => EMPLOYEE_FIELDS,
            RecordKind::Product => PRODUCT_FIELDS,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            RecordKind::Student | RecordKind::Roster => "Students",
            RecordKind::Book => "Library",
            RecordKind::Employee => "Employees",
            RecordKind::Product => "Inventory",
        }
    }

    pub fn noun(&self) -> &'static str {
        match self {
            RecordKind::Student | RecordKind::Roster => "Student",
            RecordKind::Book => "Book",
            RecordKind::Employee => "Employee",
            RecordKind::Product => "Product",
        }
    }

    /// Key under which the list lives in the key-value store
    pub fn storage_key(&self) -> &'static str {
        match self {
            RecordKind::Student | RecordKind::Roster => "students",
            RecordKind::Book => "books",
            RecordKind::Employee => "employees",
            RecordKind::Product => "inventory",
        }
    }

    /// Field matched by the search box, if the screen has one
    pub fn filter_field(&self) -> Option<&'static str> {
        match self {
            RecordKind::Product => Some("category"),
            _ => None,
        }
    }

    /// Boolean field flipped by the toggle action
    pub fn toggle_field(&self) -> Option<&'static str> {
        match self {
            RecordKind::Book => Some("available"),
            _ => None,
        }
    }

    /// Whether a blank id is filled in with a generated one
    pub fn generates_ids(&self) -> bool {
        matches!(self, RecordKind::Student)
    }

    /// Records written on first load of an empty key-value store
    pub fn default_records(&self) -> Vec<Record> {
        match self {
            RecordKind::Student => vec![
                student("S1001", "John Doe", "Computer Science", 85),
                student("S1002", "Jane Smith", "Mathematics", 92),
                student("S1003", "Mike Johnson", "Physics", 78),
            ],
            _ => Vec::new(),
        }
    }

    /// Convert raw form inputs (one per field, in `fields()` order) into a record
    pub fn parse_form(&self, inputs: &[String]) -> Result<Record, LabError> {
        let mut record = Record::new();

        for (spec, raw) in self.fields().iter().zip(inputs) {
            let raw = raw.trim();
            let value = match spec.kind {
                FieldKind::Text => Value::String(raw.to_string()),
                FieldKind::Integer => raw
                    .parse::<i64>()
                    .map(Value::from)
                    .map_err(|_| invalid_number(spec, "a whole number"))?,
                FieldKind::Decimal => raw
                    .parse::<f64>()
                    .ok()
                    .and_then(Number::from_f64)
                    .map(Value::Number)
                    .ok_or_else(|| invalid_number(spec, "a number"))?,
                FieldKind::Flag => Value::Bool(parse_flag(raw).ok_or_else(|| {
                    LabError::Validation(format!("{} must be yes or no", spec.label))
                })?),
            };
            record.set(spec.name, value);
        }

        if self.generates_ids() && record.id().is_empty() {
            record.set("id", generate_id());
        }

        Ok(record)
    }

    /// Check a record against the schema's rules
    ///
    /// Returns the first failing rule as a `Validation` error.
    pub fn validate(&self, record: &Record) -> Result<(), LabError> {
        let failure = match self {
            RecordKind::Roster => validate_roster(record),
            RecordKind::Book => validate_book(record),
            RecordKind::Product => validate_product(record),
            RecordKind::Student | RecordKind::Employee => validate_required(self, record),
        };

        match failure {
            Some(message) => Err(LabError::Validation(message.to_string())),
            None => Ok(()),
        }
    }
}

fn student(id: &str, name: &str, department: &str, marks: i64) -> Record {
    Record::new()
        .with("id", id)
        .with("name", name)
        .with("department", department)
        .with("marks", marks)
}

fn invalid_number(spec: &FieldSpec, expected: &str) -> LabError {
    LabError::Validation(format!("{} must be {}", spec.label, expected))
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.to_lowercase().as_str() {
        "true" | "yes" | "y" | "available" => Some(true),
        "false" | "no" | "n" | "issued" => Some(false),
        _ => None,
    }
}

/// `S` followed by the last six digits of the current millisecond timestamp
pub fn generate_id() -> String {
    let millis = chrono::Utc::now().timestamp_millis().to_string();
    let tail = &millis[millis.len().saturating_sub(6)..];
    format!("S{}", tail)
}

fn text_len(record: &Record, field: &str) -> usize {
    record.text(field).chars().count()
}

fn validate_roster(record: &Record) -> Option<&'static str> {
    let marks = record.number("marks").unwrap_or(-1.0);
    if !id_matches(&ROSTER_ID, record) {
        Some("ID must be S001 format")
    } else if text_len(record, "name") < 2 {
        Some("Name too short")
    } else if text_len(record, "course") < 2 {
        Some("Course too short")
    } else if !(0.0..=100.0).contains(&marks) {
        Some("Marks must be 0-100")
    } else {
        None
    }
}

fn validate_book(record: &Record) -> Option<&'static str> {
    if !id_matches(&BOOK_ID, record) {
        Some("ID must be format B001")
    } else if text_len(record, "title") < 2 {
        Some("Title too short")
    } else if text_len(record, "author") < 2 {
        Some("Author name too short")
    } else {
        None
    }
}

fn validate_product(record: &Record) -> Option<&'static str> {
    if !id_matches(&PRODUCT_ID, record) {
        Some("ID must be P001 format")
    } else if text_len(record, "name") < 2 {
        Some("Name too short")
    } else if text_len(record, "category") < 2 {
        Some("Category required")
    } else if record.number("price").is_none_or(|p| p <= 0.0) {
        Some("Price must be positive")
    } else if record.number("stock").is_none_or(|s| s < 0.0) {
        Some("Stock cannot be negative")
    } else {
        None
    }
}

fn validate_required(kind: &RecordKind, record: &Record) -> Option<&'static str> {
    kind.fields()
        .iter()
        .find(|spec| record.text(spec.name).trim().is_empty())
        .map(|spec| match spec.name {
            "id" => "ID is required",
            "name" => "Name is required",
            "department" => "Department is required",
            _ => "All fields are required",
        })
}
