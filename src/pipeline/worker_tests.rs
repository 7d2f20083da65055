//! Tests for the lookup worker thread

use super::*;
use crate::pipeline::types::Verdict;
use futures::future::BoxFuture;
use std::sync::mpsc;
use std::time::Duration;
use tokio::sync::mpsc::unbounded_channel;
use tokio_util::sync::CancellationToken;

/// Uppercases the query after a delay; "boom" fails, "" is a no-match
struct SlowUpper {
    delay: Duration,
}

impl Lookup for SlowUpper {
    type Hit = String;

    fn lookup<'a>(&'a self, query: &'a str) -> BoxFuture<'a, Result<Verdict<String>, LabError>> {
        Box::pin(async move {
            tokio::time::sleep(self.delay).await;
            match query {
                "boom" => Err(LabError::Network("connection reset".to_string())),
                "" => Ok(Verdict::NoMatch),
                _ => Ok(Verdict::Match(query.to_uppercase())),
            }
        })
    }
}

fn request(query: &str, request_id: u64) -> (LookupRequest, CancellationToken) {
    let cancel_token = CancellationToken::new();
    (
        LookupRequest {
            query: query.to_string(),
            request_id,
            cancel_token: cancel_token.clone(),
        },
        cancel_token,
    )
}

const TIMEOUT: Duration = Duration::from_secs(2);

#[test]
fn test_worker_settles_request() {
    let (request_tx, request_rx) = unbounded_channel();
    let (response_tx, response_rx) = mpsc::channel();
    let lookup = Arc::new(SlowUpper {
        delay: Duration::from_millis(5),
    });
    spawn_worker(lookup, request_rx, response_tx).unwrap();

    let (req, _token) = request("abc", 1);
    request_tx.send(req).unwrap();

    match response_rx.recv_timeout(TIMEOUT).unwrap() {
        LookupResponse::Settled {
            request_id,
            query,
            verdict,
        } => {
            assert_eq!(request_id, 1);
            assert_eq!(query, "abc");
            assert_eq!(verdict, Verdict::Match("ABC".to_string()));
        }
        other => panic!("Expected settled response, got {:?}", other),
    }
}

#[test]
fn test_worker_reports_failure() {
    let (request_tx, request_rx) = unbounded_channel();
    let (response_tx, response_rx) = mpsc::channel();
    let lookup = Arc::new(SlowUpper {
        delay: Duration::ZERO,
    });
    spawn_worker(lookup, request_rx, response_tx).unwrap();

    let (req, _token) = request("boom", 7);
    request_tx.send(req).unwrap();

    match response_rx.recv_timeout(TIMEOUT).unwrap() {
        LookupResponse::Failed {
            request_id, error, ..
        } => {
            assert_eq!(request_id, 7);
            assert!(matches!(error, LabError::Network(_)));
        }
        other => panic!("Expected failed response, got {:?}", other),
    }
}

#[test]
fn test_worker_honours_cancellation() {
    let (request_tx, request_rx) = unbounded_channel();
    let (response_tx, response_rx) = mpsc::channel();
    let lookup = Arc::new(SlowUpper {
        delay: Duration::from_secs(30),
    });
    spawn_worker(lookup, request_rx, response_tx).unwrap();

    let (req, token) = request("slow", 3);
    request_tx.send(req).unwrap();
    token.cancel();

    let response = response_rx.recv_timeout(TIMEOUT).unwrap();
    assert!(matches!(response, LookupResponse::Cancelled { request_id: 3 }));
}

#[test]
fn test_worker_runs_overlapping_requests() {
    let (request_tx, request_rx) = unbounded_channel();
    let (response_tx, response_rx) = mpsc::channel();
    let lookup = Arc::new(SlowUpper {
        delay: Duration::from_millis(20),
    });
    spawn_worker(lookup, request_rx, response_tx).unwrap();

    let (first, _t1) = request("one", 1);
    let (second, _t2) = request("two", 2);
    request_tx.send(first).unwrap();
    request_tx.send(second).unwrap();

    let mut ids = vec![];
    for _ in 0..2 {
        match response_rx.recv_timeout(TIMEOUT).unwrap() {
            LookupResponse::Settled { request_id, .. } => ids.push(request_id),
            other => panic!("Expected settled response, got {:?}", other),
        }
    }
    ids.sort();
    assert_eq!(ids, vec![1, 2]);
}

#[test]
fn test_worker_shuts_down_when_channel_closed() {
    let (request_tx, request_rx) = unbounded_channel::<LookupRequest>();
    let (response_tx, _response_rx) = mpsc::channel();
    let lookup = Arc::new(SlowUpper {
        delay: Duration::ZERO,
    });
    let handle = spawn_worker(lookup, request_rx, response_tx).unwrap();

    drop(request_tx);

    handle.join().expect("Worker thread should exit cleanly");
}
