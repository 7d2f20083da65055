//! Debounced query pipeline state
//!
//! Owns the latest query, the debounce countdown and the single logical
//! in-flight lookup for one input stream. Results are tagged with the
//! request ID and query they were issued for; anything that no longer
//! matches the live input is dropped instead of being displayed.

use std::sync::Arc;
use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::Instant;

use tokio::sync::mpsc::{UnboundedSender, unbounded_channel};
use tokio_util::sync::CancellationToken;

use super::debouncer::Debouncer;
use super::types::{Lookup, LookupRequest, LookupResponse, LookupResult, Outcome};
use super::worker::spawn_worker;
use crate::error::LabError;

/// When the dependent submit action may be used
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitGate {
    /// Enabled whenever no lookup is running
    WhenIdle,
    /// Enabled only while a matching result is displayed
    RequiresMatch,
}

/// What the screen should show for this input stream
#[derive(Debug, Clone, PartialEq)]
pub enum Display<H> {
    Empty,
    Loading { query: String },
    Settled(LookupResult<H>),
}

#[derive(Debug)]
struct InFlight {
    request_id: u64,
    query: String,
    cancel_token: CancellationToken,
}

pub struct QueryPipeline<H> {
    debouncer: Debouncer,
    min_len: usize,
    gate: SubmitGate,
    /// Latest trimmed input value
    live_query: String,
    /// Incremented for each issued lookup
    request_id: u64,
    in_flight: Option<InFlight>,
    display: Display<H>,
    request_tx: Option<UnboundedSender<LookupRequest>>,
    response_rx: Option<Receiver<LookupResponse<H>>>,
    lookups_issued: u64,
}

impl<H: Send + 'static> QueryPipeline<H> {
    /// Create a pipeline without a worker attached
    pub fn new(delay_ms: u64, min_len: usize, gate: SubmitGate) -> Self {
        Self {
            debouncer: Debouncer::new(delay_ms),
            min_len,
            gate,
            live_query: String::new(),
            request_id: 0,
            in_flight: None,
            display: Display::Empty,
            request_tx: None,
            response_rx: None,
            lookups_issued: 0,
        }
    }

    /// Create a pipeline backed by its own lookup worker thread
    pub fn spawn<L>(
        lookup: Arc<L>,
        delay_ms: u64,
        min_len: usize,
        gate: SubmitGate,
    ) -> Result<Self, LabError>
    where
        L: Lookup<Hit = H>,
    {
        let (request_tx, request_rx) = unbounded_channel();
        let (response_tx, response_rx) = std::sync::mpsc::channel();
        spawn_worker(lookup, request_rx, response_tx)?;

        let mut pipeline = Self::new(delay_ms, min_len, gate);
        pipeline.set_channels(request_tx, response_rx);
        Ok(pipeline)
    }

    /// Set the channel handles for communication with the worker thread
    pub fn set_channels(
        &mut self,
        request_tx: UnboundedSender<LookupRequest>,
        response_rx: Receiver<LookupResponse<H>>,
    ) {
        self.request_tx = Some(request_tx);
        self.response_rx = Some(response_rx);
    }

    /// Record a new input value and restart the countdown
    pub fn on_input(&mut self, raw: &str) {
        self.on_input_at(raw, Instant::now());
    }

    pub fn on_input_at(&mut self, raw: &str, now: Instant) {
        let query = raw.trim();
        let already_requested = self.debouncer.has_pending()
            || self.in_flight.as_ref().is_some_and(|f| f.query == query);
        if query == self.live_query && already_requested {
            return;
        }

        self.live_query = query.to_string();
        self.hide_outdated_result();
        self.debouncer.schedule_at(now);
    }

    /// Record a new input value without starting a countdown
    ///
    /// For inputs looked up only on an explicit submit. A result for a
    /// different query is hidden straight away.
    pub fn note_input(&mut self, raw: &str) {
        self.live_query = raw.trim().to_string();
        self.hide_outdated_result();
    }

    /// Record a value and look it up immediately, skipping the quiet period
    pub fn submit_now(&mut self, raw: &str) {
        self.live_query = raw.trim().to_string();
        self.debouncer.cancel();
        self.fire();
    }

    /// Fire the lookup if the countdown has elapsed
    ///
    /// Returns true when the countdown fired (even if the minimum-length
    /// guard then skipped the lookup).
    pub fn tick(&mut self) -> bool {
        self.tick_at(Instant::now())
    }

    pub fn tick_at(&mut self, now: Instant) -> bool {
        if self.debouncer.fire_at(now) {
            self.fire();
            true
        } else {
            false
        }
    }

    fn fire(&mut self) {
        self.cancel_in_flight_request();

        let query = self.live_query.clone();
        if query.chars().count() < self.min_len {
            log::debug!("Skipping lookup for short query {:?}", query);
            self.display = Display::Empty;
            return;
        }

        self.request_id = self.request_id.wrapping_add(1);
        let request_id = self.request_id;
        let cancel_token = CancellationToken::new();
        let request = LookupRequest {
            query: query.clone(),
            request_id,
            cancel_token: cancel_token.clone(),
        };

        let sent = self
            .request_tx
            .as_ref()
            .is_some_and(|tx| tx.send(request).is_ok());

        if !sent {
            log::error!("Lookup worker unavailable, dropping request {}", request_id);
            self.display = Display::Settled(LookupResult {
                query,
                outcome: Outcome::Error("Lookup service unavailable".to_string()),
            });
            return;
        }

        self.lookups_issued += 1;
        self.in_flight = Some(InFlight {
            request_id,
            query: query.clone(),
            cancel_token,
        });
        self.display = Display::Loading { query };
    }

    /// Drain worker responses, applying only current ones
    ///
    /// Returns true if the display changed.
    pub fn poll_response(&mut self) -> bool {
        let mut changed = false;

        loop {
            let response = match self.response_rx.as_ref().map(|rx| rx.try_recv()) {
                Some(Ok(response)) => response,
                Some(Err(TryRecvError::Empty)) | None => break,
                Some(Err(TryRecvError::Disconnected)) => {
                    log::warn!("Lookup worker disconnected");
                    self.response_rx = None;
                    break;
                }
            };
            changed |= self.apply_response(response);
        }

        changed
    }

    /// Apply a single worker response; returns true if the display changed
    pub fn apply_response(&mut self, response: LookupResponse<H>) -> bool {
        match response {
            LookupResponse::Settled {
                request_id,
                query,
                verdict,
            } => self.settle(request_id, query, verdict.into()),
            LookupResponse::Failed {
                request_id,
                query,
                error,
            } => self.settle(request_id, query, Outcome::Error(error.to_string())),
            LookupResponse::Cancelled { request_id } => {
                log::debug!("Lookup {} acknowledged cancellation", request_id);
                false
            }
        }
    }

    fn settle(&mut self, request_id: u64, query: String, outcome: Outcome<H>) -> bool {
        let is_in_flight = self
            .in_flight
            .as_ref()
            .is_some_and(|f| f.request_id == request_id);

        if !is_in_flight {
            log::debug!("Discarding stale result {} for {:?}", request_id, query);
            return false;
        }
        self.in_flight = None;

        if query != self.live_query {
            log::debug!(
                "Discarding result {} for {:?}; input is now {:?}",
                request_id,
                query,
                self.live_query
            );
            // Nothing else is coming for the edited input
            if !self.debouncer.has_pending() {
                self.display = Display::Empty;
                return true;
            }
            return false;
        }

        self.display = Display::Settled(LookupResult { query, outcome });
        true
    }

    /// Cancel the in-flight request, if any
    ///
    /// Returns true if a request was cancelled.
    pub fn cancel_in_flight_request(&mut self) -> bool {
        match self.in_flight.take() {
            Some(in_flight) => {
                log::debug!(
                    "Cancelling lookup {} for {:?}",
                    in_flight.request_id,
                    in_flight.query
                );
                in_flight.cancel_token.cancel();
                true
            }
            None => false,
        }
    }

    /// A settled result for a different query must not stay on screen
    fn hide_outdated_result(&mut self) {
        if let Display::Settled(result) = &self.display
            && result.query != self.live_query
        {
            self.display = Display::Empty;
        }
    }

    /// Reset to the initial state, e.g. after the form was submitted
    pub fn clear(&mut self) {
        self.debouncer.cancel();
        self.cancel_in_flight_request();
        self.live_query.clear();
        self.display = Display::Empty;
    }

    pub fn display(&self) -> &Display<H> {
        &self.display
    }

    pub fn live_query(&self) -> &str {
        &self.live_query
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn has_pending(&self) -> bool {
        self.debouncer.has_pending()
    }

    pub fn debouncer(&self) -> &Debouncer {
        &self.debouncer
    }

    /// Whether dependent actions (submit) may be used right now
    pub fn submit_enabled(&self) -> bool {
        if self.is_busy() {
            return false;
        }
        match self.gate {
            SubmitGate::WhenIdle => true,
            SubmitGate::RequiresMatch => {
                matches!(&self.display, Display::Settled(result) if result.is_match())
            }
        }
    }

    pub fn lookups_issued(&self) -> u64 {
        self.lookups_issued
    }
}

#[cfg(test)]
#[path = "pipeline_state_tests.rs"]
mod pipeline_state_tests;
