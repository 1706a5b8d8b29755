//! Configuration management.
//!
//! Schema, TOML loading, and semantic validation. A config file is
//! optional; every field has a default so the server runs bare.

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    AssetConfig, AuthConfig, BindingConfig, ListenerConfig, ObservabilityConfig, RealtimeConfig,
    ServerConfig, TimeoutConfig,
};
pub use validation::{validate_config, ValidationError};
