//! Route lookup and dispatch table.
//!
//! # Responsibilities
//! - Hold the ordered list of (matcher, feature) pairs
//! - Resolve a path to the first matching feature
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - Evaluated top-to-bottom, first match wins, so more specific routes
//!   must be registered before broader prefixes that would shadow them
//! - The table is data: handlers are named by the `Feature` enum, so route
//!   order can be unit-tested without the HTTP layer

use crate::routing::matcher::PathMatch;

/// Every feature handler the dispatcher can select.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    AttackPatterns,
    AttackMap,
    Quantum,
    PostQuantumAlias,
    DealNegotiator,
    SalesPortal,
    StormCenter,
    FusionDashboard,
    WarRoom,
    AiGateway,
    OwaspLabs,
    ProductVerticals,
    Regulations,
    SasePhase2,
    ZtnaPhase2,
    CoreApi,
    /// Object-store image passthrough.
    Images,
}

/// One entry in the dispatch table.
#[derive(Debug, Clone, Copy)]
pub struct Route {
    pub name: &'static str,
    pub matcher: PathMatch,
    pub feature: Feature,
}

/// Ordered dispatch table, built once at startup.
#[derive(Debug)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn new() -> Self {
        use Feature::*;
        use PathMatch::*;

        // Order matters: the attack/quantum routes are checked before the
        // image pattern so e.g. /attack-map assets never shadow the handler,
        // and the image pattern runs before the generic feature prefixes.
        let routes = vec![
            Route { name: "attack-patterns", matcher: Prefix("/attack-patterns"), feature: AttackPatterns },
            Route { name: "post-quantum", matcher: Exact("/post-quantum"), feature: PostQuantumAlias },
            Route { name: "quantum", matcher: Prefix("/quantum"), feature: Quantum },
            Route { name: "images", matcher: ImageExt, feature: Images },
            Route { name: "attack-map", matcher: Prefix("/attack-map"), feature: AttackMap },
            Route { name: "deal-negotiator", matcher: Prefix("/deal-negotiator"), feature: DealNegotiator },
            Route { name: "sales-portal", matcher: Prefix("/sales-portal"), feature: SalesPortal },
            Route { name: "storm-center", matcher: Prefix("/storm-center"), feature: StormCenter },
            Route { name: "fusion-dash", matcher: Prefix("/fusion-dash"), feature: FusionDashboard },
            Route { name: "hybrid-cloud-war-room", matcher: Prefix("/hybrid-cloud-war-room"), feature: WarRoom },
            Route { name: "ai-gateway-arena", matcher: Prefix("/ai-gateway-arena"), feature: AiGateway },
            Route { name: "owasp-labs", matcher: Prefix("/owasp-labs"), feature: OwaspLabs },
            Route { name: "product-verticals", matcher: Prefix("/product-verticals"), feature: ProductVerticals },
            Route { name: "regulations", matcher: Prefix("/regulations"), feature: Regulations },
            Route { name: "sase-phase2", matcher: Prefix("/sase-phase2"), feature: SasePhase2 },
            Route { name: "ztna-phase2", matcher: Prefix("/ztna-phase2"), feature: ZtnaPhase2 },
            Route { name: "api", matcher: Prefix("/api"), feature: CoreApi },
            Route { name: "legacy-message", matcher: Exact("/message"), feature: CoreApi },
            Route { name: "legacy-random", matcher: Exact("/random"), feature: CoreApi },
            Route { name: "legacy-ticker", matcher: Exact("/get-ticker"), feature: CoreApi },
        ];

        Self { routes }
    }

    /// First route whose matcher accepts the path, or None for the
    /// static-asset fallback.
    pub fn resolve(&self, path: &str) -> Option<&Route> {
        self.routes.iter().find(|route| route.matcher.matches(path))
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Prefixes that serve an HTML lab page on a bare GET.
    pub fn page_prefixes(&self) -> Vec<&'static str> {
        self.routes
            .iter()
            .filter_map(|route| match route.matcher {
                PathMatch::Prefix(prefix) if route.feature != Feature::CoreApi => Some(prefix),
                _ => None,
            })
            .collect()
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_match_wins() {
        let table = RouteTable::new();
        // /quantum assets would also match the image rule if order were wrong
        assert_eq!(
            table.resolve("/quantum/threats").unwrap().feature,
            Feature::Quantum
        );
        assert_eq!(table.resolve("/logo.png").unwrap().feature, Feature::Images);
    }

    #[test]
    fn post_quantum_aliases_the_hero_page() {
        let table = RouteTable::new();
        assert_eq!(
            table.resolve("/post-quantum").unwrap().feature,
            Feature::PostQuantumAlias
        );
    }

    #[test]
    fn sub_paths_and_trailing_slash_share_the_handler() {
        let table = RouteTable::new();
        for path in [
            "/deal-negotiator",
            "/deal-negotiator/",
            "/deal-negotiator/api/history",
        ] {
            assert_eq!(
                table.resolve(path).unwrap().feature,
                Feature::DealNegotiator,
                "path {path}"
            );
        }
    }

    #[test]
    fn unknown_path_falls_through() {
        let table = RouteTable::new();
        assert!(table.resolve("/this-does-not-exist").is_none());
        assert!(table.resolve("/").is_none());
    }

    #[test]
    fn every_route_is_reachable() {
        // No earlier route may shadow a later one for its own canonical path.
        let table = RouteTable::new();
        for route in table.routes() {
            let probe = match route.matcher {
                PathMatch::Exact(p) | PathMatch::Prefix(p) => p,
                PathMatch::ImageExt => "/probe.png",
            };
            let resolved = table.resolve(probe).unwrap();
            assert_eq!(resolved.feature, route.feature, "route {}", route.name);
        }
    }
}
