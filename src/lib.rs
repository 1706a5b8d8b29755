//! Security lab edge server.
//!
//! Serves the lab demo pages and their JSON APIs from one dispatcher,
//! with a static-site fallback behind them.
//!
//! # Architecture Overview
//!
//! ```text
//!                        ┌──────────────────────────────────────────────┐
//!                        │                LAB EDGE SERVER                │
//!                        │                                               │
//!   Client Request       │  ┌─────────┐   ┌──────────┐   ┌───────────┐  │
//!   ─────────────────────┼─▶│  http   │──▶│ security │──▶│  routing  │  │
//!                        │  │ server  │   │   gate   │   │   table   │  │
//!                        │  └─────────┘   └──────────┘   └─────┬─────┘  │
//!                        │                                     │        │
//!                        │                                     ▼        │
//!                        │  ┌──────────────────────────────────────┐    │
//!                        │  │              features                 │    │
//!                        │  │  lab pages · JSON APIs · simulations  │    │
//!                        │  └──────────────────┬───────────────────┘    │
//!                        │                     │ miss                   │
//!                        │                     ▼                        │
//!   Client Response      │  ┌─────────┐   ┌──────────┐                  │
//!   ◀────────────────────┼──│response │◀──│  assets  │                  │
//!                        │  │ builder │   │ (images, │                  │
//!                        │  └─────────┘   │  site)   │                  │
//!                        │                └──────────┘                  │
//!                        │                                               │
//!                        │  ┌────────────────────────────────────────┐  │
//!                        │  │          Cross-Cutting Concerns         │  │
//!                        │  │  config · observability · realtime      │  │
//!                        │  └────────────────────────────────────────┘  │
//!                        └──────────────────────────────────────────────┘
//! ```

// Core subsystems
pub mod config;
pub mod features;
pub mod http;
pub mod routing;

// Content stores
pub mod assets;
pub mod realtime;

// Cross-cutting concerns
pub mod observability;
pub mod security;
