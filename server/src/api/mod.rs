//! API Router and Application State
//!
//! Central routing configuration and shared state.

mod skill;

use axum::{
    extract::DefaultBodyLimit,
    extract::State,
    middleware::from_fn_with_state,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::{
    auth::{self, RequestAuthenticator},
    config::Config,
    skill::Skill,
};

pub use skill::skill_endpoint;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration
    pub config: Arc<Config>,
    /// Request authenticator (owns the certificate cache)
    pub authenticator: RequestAuthenticator,
    /// The skill being served
    pub skill: Arc<Skill>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(config: Config, authenticator: RequestAuthenticator, skill: Skill) -> Self {
        Self {
            config: Arc::new(config),
            authenticator,
            skill: Arc::new(skill),
        }
    }
}

/// Create the main application router.
///
/// - POST / - Skill endpoint (signed requests only, unless validation is off)
/// - GET /health - Health check
pub fn create_router(state: AppState) -> Router {
    let max_body_bytes = state.config.max_body_bytes;

    let mut skill_routes: Router<AppState> = Router::new().route("/", post(skill_endpoint));
    if state.config.validate_requests {
        skill_routes =
            skill_routes.route_layer(from_fn_with_state(state.clone(), auth::require_signed_request));
    } else {
        warn!("Request validation is disabled; unsigned requests will be dispatched");
    }

    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Skill endpoint
        .merge(skill_routes)
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(max_body_bytes))
        // State
        .with_state(state)
}

/// Health check response.
#[derive(Serialize)]
struct HealthResponse {
    /// Service status
    status: &'static str,
    /// Whether inbound requests are authenticated
    validate_requests: bool,
    /// Signing certificates currently trusted
    cached_certificates: usize,
}

/// Health check endpoint.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        validate_requests: state.config.validate_requests,
        cached_certificates: state.authenticator.validator().cache().len().await,
    })
}
