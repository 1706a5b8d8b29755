//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Catch protected paths that would shadow feature handlers
//! - Validate value ranges and addresses
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: ServerConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::fmt;

use crate::config::schema::ServerConfig;
use crate::routing::RouteTable;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    EmptyBindAddress,
    ZeroRequestTimeout,
    EmptyToken,
    /// Protected path would never be reached: a feature route owns it.
    ProtectedPathShadowed(String),
    InvalidEmailDomain(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyBindAddress => write!(f, "listener.bind_address is empty"),
            ValidationError::ZeroRequestTimeout => write!(f, "timeouts.request_secs must be > 0"),
            ValidationError::EmptyToken => write!(f, "auth.token is empty"),
            ValidationError::ProtectedPathShadowed(path) => {
                write!(f, "auth.protected_paths entry {path} is owned by a feature route")
            }
            ValidationError::InvalidEmailDomain(domain) => {
                write!(f, "auth.email_domain {domain} must start with '@'")
            }
        }
    }
}

/// Validate a configuration, returning every problem found.
pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.trim().is_empty() {
        errors.push(ValidationError::EmptyBindAddress);
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }
    if config.auth.token.trim().is_empty() {
        errors.push(ValidationError::EmptyToken);
    }
    if !config.auth.email_domain.starts_with('@') {
        errors.push(ValidationError::InvalidEmailDomain(
            config.auth.email_domain.clone(),
        ));
    }

    let table = RouteTable::new();
    for path in &config.auth.protected_paths {
        if table.resolve(path).is_some() {
            errors.push(ValidationError::ProtectedPathShadowed(path.clone()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&ServerConfig::default()).is_ok());
    }

    #[test]
    fn shadowed_protected_path_is_rejected() {
        let mut config = ServerConfig::default();
        config
            .auth
            .protected_paths
            .push("/deal-negotiator".to_string());
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::ProtectedPathShadowed(p) if p == "/deal-negotiator")));
    }

    #[test]
    fn all_errors_reported() {
        let mut config = ServerConfig::default();
        config.listener.bind_address = " ".to_string();
        config.timeouts.request_secs = 0;
        config.auth.token = String::new();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
