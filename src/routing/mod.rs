//! Path-keyed dispatch.
//!
//! The whole site hangs off one ordered table of (matcher, feature) pairs.
//! The table is constructed once, never mutated, and scanned top-to-bottom
//! per request.

pub mod matcher;
pub mod table;

pub use matcher::{has_image_extension, PathMatch};
pub use table::{Feature, Route, RouteTable};
