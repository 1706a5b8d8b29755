//! HTTP server setup and request dispatch.
//!
//! # Responsibilities
//! - Create the Axum router with middleware (timeout, tracing)
//! - Run the access gate before any static asset is considered
//! - Resolve the path against the dispatch table and call the feature
//! - Fall back to the image store, then the static site, then 404
//! - Emit one trace record and one metrics sample per request
//!
//! # Request Flow
//! ```text
//! request
//!     → access gate (protected sales paths, 401 or no-store asset)
//!     → route table (first match wins) → feature handler
//!     → image store (cacheable) → static site → 404
//! ```

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::assets::{Asset, AssetStore};
use crate::config::ServerConfig;
use crate::features;
use crate::http::error::LabError;
use crate::http::response::not_found;
use crate::observability::metrics;
use crate::observability::TraceContext;
use crate::realtime::{SimRegistry, TtlCache};
use crate::routing::{Feature, RouteTable};
use crate::security::{AccessGate, GateDecision};

/// Application state injected into the dispatcher.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub routes: Arc<RouteTable>,
    pub gate: Arc<AccessGate>,
    pub assets: Arc<AssetStore>,
    pub sims: Arc<SimRegistry>,
    pub cache: Arc<TtlCache>,
    pub trace: TraceContext,
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        let cache_ttl = Duration::from_secs(config.bindings.cache_ttl_secs);
        Self {
            routes: Arc::new(RouteTable::new()),
            gate: Arc::new(AccessGate::new(&config.auth)),
            assets: Arc::new(AssetStore::new(&config.assets)),
            sims: Arc::new(SimRegistry::new()),
            cache: Arc::new(TtlCache::new(cache_ttl)),
            trace: TraceContext::new(),
            http: reqwest::Client::new(),
            config: Arc::new(config),
        }
    }
}

/// HTTP server for the lab edge.
pub struct HttpServer {
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ServerConfig) -> Self {
        Self {
            state: AppState::new(config),
        }
    }

    /// Build the Axum router with all middleware layers. Exposed so tests
    /// can drive the full dispatch path without a listener.
    pub fn router(&self) -> Router {
        let timeout = Duration::from_secs(self.state.config.timeouts.request_secs);
        Router::new()
            .route("/", any(dispatch))
            .route("/{*path}", any(dispatch))
            .with_state(self.state.clone())
            .layer(TimeoutLayer::new(timeout))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        let app = self.router();
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }
}

/// Main dispatcher. Gate first, then the route table, then asset fallbacks.
async fn dispatch(State(state): State<AppState>, request: Request<Body>) -> Response {
    let started = Instant::now();
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let guard = state.trace.begin(&method, &path);

    let authorization = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);

    // The gate runs before any asset lookup so protected HTML can never be
    // fetched directly from the static directory.
    match state.gate.check(&path, authorization.as_deref()) {
        GateDecision::Denied => {
            let response = LabError::Unauthorized.into_response();
            guard.finish_status(response.status().as_u16());
            metrics::record_request(&method, "gate", response.status().as_u16(), started);
            return response;
        }
        GateDecision::Allowed => {
            let response = match state.assets.static_asset(&path).await {
                Some(asset) => no_store_response(asset),
                None => not_found(),
            };
            guard.finish_status(response.status().as_u16());
            metrics::record_request(&method, "gate", response.status().as_u16(), started);
            return response;
        }
        GateDecision::NotProtected => {}
    }

    let (route_name, outcome) = match state.routes.resolve(&path) {
        Some(route) => (
            route.name,
            run_feature(&state, route.feature, request).await,
        ),
        None => ("static", fallback(&state, &path).await),
    };

    let response = match outcome {
        Ok(response) => {
            guard.finish_status(response.status().as_u16());
            response
        }
        Err(LabError::Internal(detail)) => {
            guard.finish_error(&detail);
            LabError::Internal(detail).into_response()
        }
        Err(error) => {
            let response = error.into_response();
            guard.finish_status(response.status().as_u16());
            response
        }
    };

    metrics::record_request(&method, route_name, response.status().as_u16(), started);
    response
}

async fn run_feature(
    state: &AppState,
    feature: Feature,
    request: Request<Body>,
) -> Result<Response, LabError> {
    match feature {
        Feature::AttackPatterns => features::attack_patterns::handle(state, request).await,
        Feature::AttackMap => features::attack_map::handle(state, request).await,
        Feature::Quantum | Feature::PostQuantumAlias => {
            features::quantum::handle(state, request).await
        }
        Feature::DealNegotiator => features::deal_negotiator::handle(state, request).await,
        Feature::SalesPortal => features::sales_portal::handle(state, request).await,
        Feature::StormCenter => features::storm_center::handle(state, request).await,
        Feature::FusionDashboard => features::fusion_dashboard::handle(state, request).await,
        Feature::WarRoom => features::war_room::handle(state, request).await,
        Feature::AiGateway => features::ai_gateway::handle(state, request).await,
        Feature::OwaspLabs => features::owasp_labs::handle(state, request).await,
        Feature::ProductVerticals => features::product_verticals::handle(state, request).await,
        Feature::Regulations => features::regulations::handle(state, request).await,
        Feature::SasePhase2 => features::sase::handle(state, request).await,
        Feature::ZtnaPhase2 => features::ztna::handle(state, request).await,
        Feature::CoreApi => features::core_api::handle(state, request).await,
        Feature::Images => {
            let path = request.uri().path();
            if let Some(asset) = state.assets.image(path).await {
                return Ok(image_response(asset));
            }
            // An image path can still be served from the static site.
            if let Some(asset) = state.assets.static_asset(path).await {
                return Ok(site_response(asset));
            }
            Ok(not_found())
        }
    }
}

/// Unrouted paths serve the prebuilt site, then 404.
async fn fallback(state: &AppState, path: &str) -> Result<Response, LabError> {
    match state.assets.static_asset(path).await {
        Some(asset) => Ok(site_response(asset)),
        None => Ok(not_found()),
    }
}

fn site_response(asset: Asset) -> Response {
    asset_response(asset, None)
}

/// Images are immutable by upload convention, so a year-long public
/// lifetime is safe.
fn image_response(asset: Asset) -> Response {
    asset_response(asset, Some("public, max-age=31536000"))
}

fn no_store_response(asset: Asset) -> Response {
    asset_response(asset, Some("no-store, no-cache, must-revalidate, private"))
}

fn asset_response(asset: Asset, cache_control: Option<&'static str>) -> Response {
    let mut builder = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, asset.content_type)
        .header(header::ETAG, asset.etag);
    if let Some(value) = cache_control {
        builder = builder.header(header::CACHE_CONTROL, value);
    }
    builder.body(Body::from(asset.bytes)).unwrap_or_default()
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}
