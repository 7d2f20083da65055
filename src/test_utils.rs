#[cfg(test)]
pub mod test_helpers {
    use std::sync::mpsc::{self, Sender};
    use std::time::{Duration, Instant};

    use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use tokio::sync::mpsc::{UnboundedReceiver, unbounded_channel};

    use crate::app::InputField;
    use crate::pipeline::{LookupRequest, LookupResponse, QueryPipeline, SubmitGate, Verdict};

    pub fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    pub fn key_with_mods(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    pub fn type_text(field: &mut InputField, text: &str) {
        for c in text.chars() {
            field.handle_key(key(KeyCode::Char(c)));
        }
    }

    /// The worker's ends of a pipeline's channels, driven by hand in tests
    pub struct WorkerChannels<H> {
        pub requests: UnboundedReceiver<LookupRequest>,
        pub responses: Sender<LookupResponse<H>>,
    }

    impl<H> WorkerChannels<H> {
        /// Take the next request and answer it with `verdict`
        pub fn answer(&mut self, verdict: Verdict<H>) -> String {
            let request = self.requests.try_recv().expect("no pending lookup request");
            let query = request.query.clone();
            self.responses
                .send(LookupResponse::Settled {
                    request_id: request.request_id,
                    query: request.query,
                    verdict,
                })
                .expect("pipeline dropped");
            query
        }
    }

    pub fn manual_pipeline<H: Send + 'static>(
        delay_ms: u64,
        min_len: usize,
        gate: SubmitGate,
    ) -> (QueryPipeline<H>, WorkerChannels<H>) {
        let (request_tx, requests) = unbounded_channel();
        let (responses, response_rx) = mpsc::channel();
        let mut pipeline = QueryPipeline::new(delay_ms, min_len, gate);
        pipeline.set_channels(request_tx, response_rx);
        (
            pipeline,
            WorkerChannels {
                requests,
                responses,
            },
        )
    }

    /// An instant comfortably past any debounce used in tests
    pub fn after_debounce() -> Instant {
        Instant::now() + Duration::from_millis(1000)
    }
}
