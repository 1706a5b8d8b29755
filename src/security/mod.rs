//! Security subsystem.
//!
//! One concern: the placeholder bearer-token gate in front of the sales
//! collateral. Registration and login live in the core API feature; they
//! share the gate's token and email-domain configuration.

pub mod access_gate;

pub use access_gate::{AccessGate, GateDecision};
