pub mod config;
pub mod models;
pub mod repositories;
pub mod services;
pub mod handlers;
pub mod middleware;
pub mod utils;

use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};

use crate::config::AppState;
use crate::handlers::{
    citations::{process_citations, validate_citations},
    claims::analyze_claims,
    health::health_check,
    safety::{check_statement_presence, safety_panel},
};
use crate::middleware::{metrics_handler, metrics_middleware, request_id_middleware};
use crate::repositories::{ClaimStore, SafetyStatementStore};

/// Build the API router over any claim/safety statement store.
///
/// CORS and HTTP tracing layers are added by the binary.
pub fn create_router<S>(state: AppState<S>) -> Router
where
    S: ClaimStore + SafetyStatementStore + 'static,
{
    Router::new()
        .nest(
            "/api/citations",
            Router::new()
                .route("/process", post(process_citations::<S>))
                .route("/validate", post(validate_citations::<S>)),
        )
        .nest(
            "/api/claims",
            Router::new().route("/analyze", post(analyze_claims::<S>)),
        )
        .nest(
            "/api/safety",
            Router::new()
                .route("/presence", post(check_statement_presence::<S>))
                .route("/panel", post(safety_panel::<S>)),
        )
        .route("/api/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .layer(from_fn(metrics_middleware))
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}
