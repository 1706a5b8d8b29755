//! Realtime collaboration and caching.
//!
//! The simulator room fans qubit updates out over WebSockets; the TTL
//! cache backs the read-through quantum pages and chat answers.

pub mod cache;
pub mod registry;

pub use cache::TtlCache;
pub use registry::{SimRegistry, SimState, SimUpdate};
