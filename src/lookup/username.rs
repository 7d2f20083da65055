use std::path::PathBuf;
use std::time::Duration;

use futures::future::BoxFuture;

use super::read_document;
use crate::error::LabError;
use crate::pipeline::{Lookup, Verdict};

/// Checks a username against a JSON array of taken names
///
/// `Match` means the name is free.
#[derive(Debug, Clone)]
pub struct UsernameLookup {
    path: PathBuf,
    latency: Duration,
}

impl UsernameLookup {
    pub fn new(path: impl Into<PathBuf>, latency: Duration) -> Self {
        Self {
            path: path.into(),
            latency,
        }
    }

    async fn taken_usernames(&self) -> Result<Vec<String>, LabError> {
        let text = read_document(&self.path).await?;
        let names: Vec<String> = serde_json::from_str(&text)?;
        Ok(names)
    }
}

impl Lookup for UsernameLookup {
    type Hit = ();

    fn lookup<'a>(&'a self, query: &'a str) -> BoxFuture<'a, Result<Verdict<()>, LabError>> {
        Box::pin(async move {
            // Re-read every time so edits to the file show up without a restart
            let taken = self.taken_usernames().await?;
            tokio::time::sleep(self.latency).await;

            let wanted = query.to_lowercase();
            if taken.iter().any(|name| name.to_lowercase() == wanted) {
                Ok(Verdict::NoMatch)
            } else {
                Ok(Verdict::Match(()))
            }
        })
    }
}
