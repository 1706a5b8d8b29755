//! Bearer-token gate for sales collateral.
//!
//! # Responsibilities
//! - Decide, per path, whether the shared sales token is required
//! - Compare the Authorization header against the configured token
//!
//! # Design Decisions
//! - The token is a demo placeholder, not a security boundary; it keeps
//!   casual crawlers out of pricing collateral and nothing more
//! - Gate decisions are pure so they can be unit-tested without HTTP

use crate::config::AuthConfig;

/// Outcome of checking one request against the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Path is not in the protected set; the gate has no opinion.
    NotProtected,
    /// Path is protected and the token matched.
    Allowed,
    /// Path is protected and the token was missing or wrong.
    Denied,
}

/// Checks protected paths against the shared sales token.
#[derive(Debug, Clone)]
pub struct AccessGate {
    token: String,
    protected_paths: Vec<String>,
}

impl AccessGate {
    pub fn new(auth: &AuthConfig) -> Self {
        Self {
            token: auth.token.clone(),
            protected_paths: auth.protected_paths.clone(),
        }
    }

    /// True if the path itself (or any sub-path of a protected entry) is
    /// gated. A trailing slash or ".html" suffix reaches the same document,
    /// so those spellings are gated too.
    pub fn is_protected(&self, path: &str) -> bool {
        self.protected_paths.iter().any(|protected| {
            path == protected
                || path.strip_prefix(protected.as_str()).is_some_and(|rest| {
                    rest.starts_with('/') || rest == ".html"
                })
        })
    }

    /// Check a request path and its Authorization header value.
    pub fn check(&self, path: &str, authorization: Option<&str>) -> GateDecision {
        if !self.is_protected(path) {
            return GateDecision::NotProtected;
        }

        match authorization {
            Some(value) if value == format!("Bearer {}", self.token) => GateDecision::Allowed,
            _ => GateDecision::Denied,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate() -> AccessGate {
        AccessGate::new(&AuthConfig::default())
    }

    #[test]
    fn unprotected_paths_pass_through() {
        assert_eq!(gate().check("/quantum", None), GateDecision::NotProtected);
        assert_eq!(gate().check("/", None), GateDecision::NotProtected);
    }

    #[test]
    fn protected_path_requires_token() {
        let gate = gate();
        assert_eq!(gate.check("/sales-deck", None), GateDecision::Denied);
        assert_eq!(
            gate.check("/sales-deck", Some("Bearer wrong")),
            GateDecision::Denied
        );
        assert_eq!(
            gate.check("/sales-deck", Some("Bearer valid-token-placeholder")),
            GateDecision::Allowed
        );
    }

    #[test]
    fn alternate_spellings_are_gated() {
        let gate = gate();
        assert!(gate.is_protected("/sales-deck/"));
        assert!(gate.is_protected("/sales-deck.html"));
        assert!(gate.is_protected("/sales-deck/q3.pdf"));
        assert!(!gate.is_protected("/sales-deck-public"));
    }
}
