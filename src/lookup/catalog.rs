use std::path::PathBuf;
use std::time::Duration;

use futures::future::BoxFuture;

use super::read_document;
use crate::error::LabError;
use crate::pipeline::{Lookup, Verdict};
use crate::records::Record;
use crate::store::parse_records;

/// Substring search over the product catalog's names and categories
#[derive(Debug, Clone)]
pub struct ProductSearch {
    path: PathBuf,
    latency: Duration,
}

impl ProductSearch {
    pub fn new(path: impl Into<PathBuf>, latency: Duration) -> Self {
        Self {
            path: path.into(),
            latency,
        }
    }
}

fn matches(product: &Record, query: &str) -> bool {
    ["name", "category"]
        .iter()
        .any(|field| product.text(field).to_lowercase().contains(query))
}

impl Lookup for ProductSearch {
    type Hit = Vec<Record>;

    fn lookup<'a>(&'a self, query: &'a str) -> BoxFuture<'a, Result<Verdict<Vec<Record>>, LabError>> {
        Box::pin(async move {
            let products = parse_records(&read_document(&self.path).await?)?;
            tokio::time::sleep(self.latency).await;

            let query = query.to_lowercase();
            let found: Vec<Record> = products
                .into_iter()
                .filter(|product| matches(product, &query))
                .collect();

            if found.is_empty() {
                Ok(Verdict::NoMatch)
            } else {
                Ok(Verdict::Match(found))
            }
        })
    }
}
