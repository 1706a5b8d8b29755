//! HTTP subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware layers)
//!     → routing table resolves the feature (first match wins)
//!     → feature handler builds the canned response
//!     → response.rs helpers set uniform headers
//! ```

pub mod error;
pub mod response;
pub mod server;

pub use error::LabError;
pub use server::{AppState, HttpServer};
