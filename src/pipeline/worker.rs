//! Lookup worker thread
//!
//! Runs lookups on a background thread so the UI never blocks on file reads,
//! artificial latency or HTTP. Requests arrive on an unbounded channel; each
//! one becomes a task on a current-thread runtime racing its cancellation
//! token, and the outcome is sent back over a std channel the UI polls.

use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::thread::JoinHandle;

use tokio::runtime::{Builder, Runtime};
use tokio::sync::mpsc::UnboundedReceiver;

use super::types::{Lookup, LookupRequest, LookupResponse};
use crate::error::LabError;

/// Spawn the lookup worker thread
///
/// The thread exits once every request sender has been dropped.
pub fn spawn_worker<L: Lookup>(
    lookup: Arc<L>,
    request_rx: UnboundedReceiver<LookupRequest>,
    response_tx: Sender<LookupResponse<L::Hit>>,
) -> Result<JoinHandle<()>, LabError> {
    let runtime = Builder::new_current_thread().enable_all().build()?;

    std::thread::Builder::new()
        .name("lookup-worker".to_string())
        .spawn(move || worker_loop(runtime, lookup, request_rx, response_tx))
        .map_err(LabError::from)
}

fn worker_loop<L: Lookup>(
    runtime: Runtime,
    lookup: Arc<L>,
    mut request_rx: UnboundedReceiver<LookupRequest>,
    response_tx: Sender<LookupResponse<L::Hit>>,
) {
    runtime.block_on(async move {
        while let Some(request) = request_rx.recv().await {
            log::debug!(
                "Starting lookup {} for {:?}",
                request.request_id,
                request.query
            );
            tokio::spawn(handle_request(
                Arc::clone(&lookup),
                request,
                response_tx.clone(),
            ));
        }
    });

    log::debug!("Lookup worker shutting down");
}

async fn handle_request<L: Lookup>(
    lookup: Arc<L>,
    request: LookupRequest,
    response_tx: Sender<LookupResponse<L::Hit>>,
) {
    let LookupRequest {
        query,
        request_id,
        cancel_token,
    } = request;

    let result = tokio::select! {
        biased;
        _ = cancel_token.cancelled() => None,
        result = lookup.lookup(&query) => Some(result),
    };

    let response = match result {
        None => {
            log::debug!("Cancelled lookup {}", request_id);
            LookupResponse::Cancelled { request_id }
        }
        Some(Ok(verdict)) => LookupResponse::Settled {
            request_id,
            query,
            verdict,
        },
        Some(Err(error)) => {
            log::warn!("Lookup {} for {:?} failed: {}", request_id, query, error);
            LookupResponse::Failed {
                request_id,
                query,
                error,
            }
        }
    };

    // The UI may already be gone during shutdown
    let _ = response_tx.send(response);
}

#[cfg(test)]
#[path = "worker_tests.rs"]
mod worker_tests;
