//! Building a screen from the command line choice

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use super::app_state::Screen;
use super::lookup_screen::{LookupPane, LookupScreen, RegisterScreen, WeatherScreen};
use super::table_screen::TableScreen;
use crate::config::{Config, data_dir};
use crate::error::LabError;
use crate::lookup::{ProductSearch, UsernameLookup, WeatherLookup};
use crate::pipeline::{QueryPipeline, SubmitGate};
use crate::records::{Collection, RecordKind};
use crate::store::{DocumentStore, KeyValueStore, KvDocumentStore, StaticJsonStore};

/// Directory searched for JSON documents when no path is given
pub const DEFAULT_DOCUMENT_DIR: &str = "data";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenKind {
    Register,
    Products,
    Weather,
    Students,
    Roster,
    Books,
    Employees,
    Inventory,
}

impl ScreenKind {
    /// JSON document the screen reads, if it reads one
    pub fn default_document(&self) -> Option<&'static str> {
        match self {
            ScreenKind::Register => Some("usernames.json"),
            ScreenKind::Products => Some("products.json"),
            ScreenKind::Roster => Some("roster.json"),
            ScreenKind::Books => Some("books.json"),
            ScreenKind::Employees => Some("employees.json"),
            ScreenKind::Inventory => Some("inventory.json"),
            ScreenKind::Weather | ScreenKind::Students => None,
        }
    }

    fn record_kind(&self) -> Option<RecordKind> {
        match self {
            ScreenKind::Students => Some(RecordKind::Student),
            ScreenKind::Roster => Some(RecordKind::Roster),
            ScreenKind::Books => Some(RecordKind::Book),
            ScreenKind::Employees => Some(RecordKind::Employee),
            ScreenKind::Inventory => Some(RecordKind::Product),
            _ => None,
        }
    }
}

fn document_path(kind: ScreenKind, path: Option<PathBuf>) -> PathBuf {
    path.unwrap_or_else(|| {
        Path::new(DEFAULT_DOCUMENT_DIR).join(kind.default_document().unwrap_or_default())
    })
}

/// Build the screen for `kind`
///
/// Table screens load their records here so an unreadable document is
/// reported before the terminal is taken over.
pub fn open_screen(
    kind: ScreenKind,
    path: Option<PathBuf>,
    config: &Config,
) -> Result<Screen, LabError> {
    let pipeline = &config.pipeline;
    let debounce = pipeline.debounce_ms;

    if let Some(record_kind) = kind.record_kind() {
        let store: Box<dyn DocumentStore> = match record_kind {
            RecordKind::Student => Box::new(KvDocumentStore::new(
                KeyValueStore::new(data_dir(config)),
                record_kind.storage_key(),
                record_kind.default_records(),
            )),
            _ => Box::new(StaticJsonStore::new(document_path(kind, path))),
        };
        let mut collection = Collection::new(record_kind, store);
        collection.load()?;
        return Ok(Screen::Table(TableScreen::new(collection, debounce)));
    }

    let screen = match kind {
        ScreenKind::Register => {
            let lookup = UsernameLookup::new(
                document_path(kind, path),
                Duration::from_millis(pipeline.username_latency_ms),
            );
            LookupScreen::Register(RegisterScreen::new(QueryPipeline::spawn(
                Arc::new(lookup),
                debounce,
                pipeline.username_min_len,
                SubmitGate::RequiresMatch,
            )?))
        }
        ScreenKind::Products => {
            let lookup = ProductSearch::new(
                document_path(kind, path),
                Duration::from_millis(pipeline.simulated_latency_ms),
            );
            LookupScreen::Products(LookupPane::new(
                "Search products",
                QueryPipeline::spawn(
                    Arc::new(lookup),
                    debounce,
                    pipeline.search_min_len,
                    SubmitGate::WhenIdle,
                )?,
            ))
        }
        _ => LookupScreen::Weather(WeatherScreen::new(QueryPipeline::spawn(
            Arc::new(WeatherLookup::default()),
            debounce,
            1,
            SubmitGate::WhenIdle,
        )?)),
    };
    Ok(Screen::Lookup(screen))
}

#[cfg(test)]
#[path = "launch_tests.rs"]
mod launch_tests;
