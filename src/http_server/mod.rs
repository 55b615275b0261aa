//! HTTP boundary for the monitoring service.
//!
//! A thin axum adapter over the lifecycle manager and the sweep. The owner
//! identity is supplied by the caller (an upstream session adapter); the
//! core trusts it and never re-derives identity itself.

mod auth;
mod cron;
mod error;
mod monitors;

use std::{net::SocketAddr, sync::Arc};

use axum::{
    middleware,
    response::{IntoResponse, Json},
    routing::{delete, get, post},
    Router,
};
use serde_json::json;

pub use error::ApiError;

use crate::{config::AppConfig, monitor::MonitorManager, sweep::SweepRunner};

/// Shared state for request handlers.
#[derive(Clone)]
pub struct ApiState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Monitor lifecycle operations.
    pub manager: Arc<MonitorManager>,
    /// The change-detection sweep.
    pub sweep: Arc<SweepRunner>,
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// Builds the application router.
pub fn build_router(state: ApiState) -> Router {
    let payment_routes = Router::new()
        .route("/webhooks/payment", post(monitors::payment_completed))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::auth));

    Router::new()
        .route("/health", get(health))
        .route("/monitors", post(monitors::create_monitor).get(monitors::list_monitors))
        .route("/monitors/{id}", delete(monitors::delete_monitor))
        .route("/usage", get(monitors::get_usage))
        .route("/cron/sweep", post(cron::run_sweep))
        .merge(payment_routes)
        .with_state(state)
}

/// Runs the HTTP server based on the provided application state.
pub async fn run_server(state: ApiState) {
    let addr: SocketAddr = state
        .config
        .server
        .listen_address
        .parse()
        .expect("Invalid server.listen_address format");

    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await.expect("Failed to bind address");
    tracing::info!(%addr, "HTTP server listening.");

    axum::serve(listener, app.into_make_service()).await.expect("Server failed");
}
