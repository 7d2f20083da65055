//! Debounced query pipeline
//!
//! Turns a stream of keystrokes into at most one lookup per quiet period and
//! reconciles the asynchronous results with whatever the input holds now.

pub mod debouncer;
pub mod pipeline_state;
pub mod types;
pub mod worker;

// Re-export public types
pub use debouncer::Debouncer;
pub use pipeline_state::{Display, QueryPipeline, SubmitGate};
pub use types::{Lookup, LookupRequest, LookupResponse, LookupResult, Outcome, Verdict};
