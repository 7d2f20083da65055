//! Records, per-screen schemas and the collection controller

mod collection;
mod record;
mod schema;
mod stats;

pub use collection::{Collection, SubmitKind};
pub use record::Record;
pub use schema::{FieldKind, FieldSpec, RecordKind, generate_id};
pub use stats::{CollectionStats, StockLevel, format_amount, grade, stock_level};

#[cfg(test)]
#[path = "records_tests.rs"]
mod records_tests;
