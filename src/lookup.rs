//! Lookups driven by the query pipeline
//!
//! Each lookup turns a settled query into a [`Verdict`](crate::pipeline::Verdict)
//! on the worker's runtime: two file-backed lookups with artificial latency
//! and one HTTP weather lookup.

mod catalog;
mod username;
mod weather;

use std::path::Path;

pub use catalog::ProductSearch;
pub use username::UsernameLookup;
pub use weather::{SUPPORTED_CITIES, WeatherLookup, WeatherReport, weather_code_description};

use crate::error::LabError;

/// Read a JSON document without blocking the worker's runtime
async fn read_document(path: &Path) -> Result<String, LabError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => {
                LabError::NotFound(format!("{} file not found", path.display()))
            }
            _ => LabError::from(e),
        })
}

#[cfg(test)]
#[path = "lookup_tests.rs"]
mod lookup_tests;
