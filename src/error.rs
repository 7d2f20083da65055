use thiserror::Error;

/// Error taxonomy shared by stores, lookups and collections
///
/// Every variant is recoverable: call sites surface it as an error toast and
/// log it, and the user re-triggers the action.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LabError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid format: {0}")]
    Parse(String),

    #[error("{0}")]
    Validation(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Store is read-only: {0}")]
    ReadOnly(String),

    #[error("IO error: {0}")]
    Io(String),
}

impl From<std::io::Error> for LabError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => LabError::NotFound(err.to_string()),
            _ => LabError::Io(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for LabError {
    fn from(err: serde_json::Error) -> Self {
        LabError::Parse(err.to_string())
    }
}

impl From<reqwest::Error> for LabError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            LabError::Parse(err.to_string())
        } else {
            LabError::Network(err.to_string())
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
