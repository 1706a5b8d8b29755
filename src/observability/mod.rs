//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! dispatch loop produces:
//!     → trace.rs (one record per request: status or error)
//!     → metrics.rs (counters, histograms, gauges)
//!
//! Consumers:
//!     → stdout structured logs (tracing-subscriber)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Trace context is explicit state, not a global
//! - Metrics are cheap (atomic increments) and optional

pub mod metrics;
pub mod trace;

pub use trace::{LogRecorder, RequestOutcome, RequestRecord, TraceContext, TraceRecorder};
