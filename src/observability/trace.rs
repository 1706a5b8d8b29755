//! Request tracing.
//!
//! # Responsibilities
//! - Assign a request ID and emit one structured record per request
//! - Capture handler errors exactly once, then hand them back unchanged
//!
//! # Design Decisions
//! - `TraceContext` is an explicit value owned by application state, not a
//!   global; tests swap in a counting recorder
//! - The recorder sees either a status or an error for a request, never both

use std::sync::Arc;
use std::time::Duration;

use uuid::Uuid;

/// What the tracer learned about one finished request.
#[derive(Debug, Clone)]
pub struct RequestRecord {
    pub request_id: Uuid,
    pub method: String,
    pub path: String,
    pub outcome: RequestOutcome,
    pub duration: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestOutcome {
    Status(u16),
    Error(String),
}

/// Sink for finished request records.
pub trait TraceRecorder: Send + Sync {
    fn record(&self, record: &RequestRecord);
}

/// Default recorder: one tracing event per request.
#[derive(Debug, Default)]
pub struct LogRecorder;

impl TraceRecorder for LogRecorder {
    fn record(&self, record: &RequestRecord) {
        match &record.outcome {
            RequestOutcome::Status(status) => {
                tracing::info!(
                    request_id = %record.request_id,
                    method = %record.method,
                    path = %record.path,
                    status = status,
                    duration_ms = record.duration.as_millis() as u64,
                    "request completed"
                );
            }
            RequestOutcome::Error(error) => {
                tracing::error!(
                    request_id = %record.request_id,
                    method = %record.method,
                    path = %record.path,
                    error = %error,
                    duration_ms = record.duration.as_millis() as u64,
                    "request failed"
                );
            }
        }
    }
}

/// Per-server tracing state, cloned into application state.
#[derive(Clone)]
pub struct TraceContext {
    recorder: Arc<dyn TraceRecorder>,
}

impl TraceContext {
    pub fn new() -> Self {
        Self {
            recorder: Arc::new(LogRecorder),
        }
    }

    pub fn with_recorder(recorder: Arc<dyn TraceRecorder>) -> Self {
        Self { recorder }
    }

    /// Open a trace for an incoming request. The guard must be finished
    /// exactly once with either a status or an error.
    pub fn begin(&self, method: &str, path: &str) -> TraceGuard {
        TraceGuard {
            recorder: Arc::clone(&self.recorder),
            request_id: Uuid::new_v4(),
            method: method.to_string(),
            path: path.to_string(),
            started: std::time::Instant::now(),
        }
    }
}

impl Default for TraceContext {
    fn default() -> Self {
        Self::new()
    }
}

/// In-flight trace for one request.
pub struct TraceGuard {
    recorder: Arc<dyn TraceRecorder>,
    request_id: Uuid,
    method: String,
    path: String,
    started: std::time::Instant,
}

impl TraceGuard {
    pub fn request_id(&self) -> Uuid {
        self.request_id
    }

    pub fn finish_status(self, status: u16) {
        self.finish(RequestOutcome::Status(status));
    }

    pub fn finish_error(self, error: &str) {
        self.finish(RequestOutcome::Error(error.to_string()));
    }

    fn finish(self, outcome: RequestOutcome) {
        let record = RequestRecord {
            request_id: self.request_id,
            method: self.method,
            path: self.path,
            outcome,
            duration: self.started.elapsed(),
        };
        self.recorder.record(&record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct CountingRecorder {
        records: Mutex<Vec<RequestRecord>>,
    }

    impl TraceRecorder for CountingRecorder {
        fn record(&self, record: &RequestRecord) {
            self.records.lock().unwrap().push(record.clone());
        }
    }

    #[test]
    fn each_request_is_recorded_once() {
        let recorder = Arc::new(CountingRecorder::default());
        let ctx = TraceContext::with_recorder(recorder.clone());

        let guard = ctx.begin("GET", "/quantum");
        let first_id = guard.request_id();
        guard.finish_status(200);
        ctx.begin("POST", "/api/register").finish_error("relay unreachable");

        let records = recorder.records.lock().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].outcome, RequestOutcome::Status(200));
        assert_eq!(records[0].path, "/quantum");
        assert_eq!(records[0].request_id, first_id);
        assert!(matches!(records[1].outcome, RequestOutcome::Error(_)));
        assert_ne!(records[1].request_id, first_id);
    }
}
