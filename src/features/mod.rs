//! Lab feature handlers.
//!
//! Each module owns one URL prefix from the dispatch table: its HTML page,
//! its JSON APIs, and any arithmetic behind them. Handlers share one
//! signature so the dispatcher stays a flat match on [`crate::routing::Feature`].
//!
//! The demo datasets in these modules are frozen marketing fixtures, not
//! live telemetry. They are deliberately kept in code so the pages work
//! with no external services configured.

pub mod ai_gateway;
pub mod attack_map;
pub mod attack_patterns;
pub mod core_api;
pub mod deal_negotiator;
pub mod fusion_dashboard;
pub mod owasp_labs;
pub mod product_verticals;
pub mod quantum;
pub mod regulations;
pub mod sales_portal;
pub mod sase;
pub mod storm_center;
pub mod war_room;
pub mod ztna;

/// Path relative to a feature prefix, normalized so `/x`, `/x/` and the
/// bare prefix all dispatch the same way.
pub(crate) fn subpath<'a>(path: &'a str, prefix: &str) -> &'a str {
    let rest = path.strip_prefix(prefix).unwrap_or(path);
    let rest = rest.trim_end_matches('/');
    if rest.is_empty() {
        "/"
    } else {
        rest
    }
}

#[cfg(test)]
mod tests {
    use super::subpath;

    #[test]
    fn subpath_normalizes_prefix_spellings() {
        assert_eq!(subpath("/deal-negotiator", "/deal-negotiator"), "/");
        assert_eq!(subpath("/deal-negotiator/", "/deal-negotiator"), "/");
        assert_eq!(
            subpath("/deal-negotiator/api/history", "/deal-negotiator"),
            "/api/history"
        );
        assert_eq!(
            subpath("/deal-negotiator/api/history/", "/deal-negotiator"),
            "/api/history"
        );
    }
}
