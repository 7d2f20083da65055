use futures::future::BoxFuture;
use tokio_util::sync::CancellationToken;

use crate::error::LabError;

/// What a successful lookup concluded
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict<H> {
    /// Available / matching, with the lookup's payload
    Match(H),
    /// Unavailable / nothing matched
    NoMatch,
}

/// Tri-state outcome shown to the user
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<H> {
    Match(H),
    NoMatch,
    Error(String),
}

impl<H> From<Verdict<H>> for Outcome<H> {
    fn from(verdict: Verdict<H>) -> Self {
        match verdict {
            Verdict::Match(hit) => Outcome::Match(hit),
            Verdict::NoMatch => Outcome::NoMatch,
        }
    }
}

/// An outcome paired with the query that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct LookupResult<H> {
    pub query: String,
    pub outcome: Outcome<H>,
}

impl<H> LookupResult<H> {
    pub fn is_match(&self) -> bool {
        matches!(self.outcome, Outcome::Match(_))
    }
}

/// Asynchronous lookup supplied per screen
pub trait Lookup: Send + Sync + 'static {
    type Hit: Send + 'static;

    fn lookup<'a>(&'a self, query: &'a str) -> BoxFuture<'a, Result<Verdict<Self::Hit>, LabError>>;
}

/// Request sent to the lookup worker
#[derive(Debug)]
pub struct LookupRequest {
    pub query: String,
    /// Unique ID for this request, used to filter stale responses
    pub request_id: u64,
    pub cancel_token: CancellationToken,
}

/// Response sent back from the lookup worker
#[derive(Debug)]
pub enum LookupResponse<H> {
    Settled {
        request_id: u64,
        query: String,
        verdict: Verdict<H>,
    },
    Failed {
        request_id: u64,
        query: String,
        error: LabError,
    },
    Cancelled {
        request_id: u64,
    },
}
