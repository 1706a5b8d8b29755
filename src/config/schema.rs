//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the lab
//! server. All types derive Serde traits for deserialization from config
//! files.

use serde::{Deserialize, Serialize};

/// Root configuration for the lab server.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Access gate for protected sales collateral.
    pub auth: AuthConfig,

    /// Static-asset and object-store directories.
    pub assets: AssetConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Realtime quantum-sims broadcaster.
    pub realtime: RealtimeConfig,

    /// Optional external collaborators (AI endpoint, email relay).
    pub bindings: BindingConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Access gate configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Shared bearer token for sales content (placeholder, not a security
    /// boundary).
    pub token: String,

    /// Paths that require the token. Must not overlap feature prefixes,
    /// which are dispatched before any static asset is considered.
    pub protected_paths: Vec<String>,

    /// Email domain accepted by /api/register and /api/login.
    pub email_domain: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            // WARNING: This is a placeholder! Change this in production.
            token: "valid-token-placeholder".to_string(),
            protected_paths: vec![
                "/sase-compare".to_string(),
                "/ztna-compare".to_string(),
                "/gartner-mq-live".to_string(),
                "/metrics-scorecard".to_string(),
                "/sales-deck".to_string(),
            ],
            email_domain: "@nexuminc.com".to_string(),
        }
    }
}

/// Asset store configuration. Either directory may be absent; lookups then
/// degrade to the next fallback (ultimately 404).
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AssetConfig {
    /// Directory of prebuilt static files (HTML/CSS/JS).
    pub static_dir: Option<String>,

    /// Directory backing the image passthrough.
    pub image_dir: Option<String>,
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Realtime broadcaster configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RealtimeConfig {
    /// Enable the quantum-sims WebSocket broadcaster.
    pub enabled: bool,
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Optional outbound collaborators.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BindingConfig {
    /// Chat/completions endpoint for the RAG chat demos. Absent → canned
    /// fallback responses.
    pub ai_endpoint: Option<String>,

    /// Email relay endpoint for registration approvals. Absent → approvals
    /// are logged and skipped.
    pub email_relay: Option<String>,

    /// Recipient for approval mails.
    pub approver_email: String,

    /// Public site URL used in approval links.
    pub site_url: String,

    /// TTL for the read-through response cache, seconds.
    pub cache_ttl_secs: u64,
}

impl Default for BindingConfig {
    fn default() -> Self {
        Self {
            ai_endpoint: None,
            email_relay: None,
            approver_email: "jsellers@nexuminc.com".to_string(),
            site_url: "https://sellersco.net".to_string(),
            cache_ttl_secs: 3600,
        }
    }
}
