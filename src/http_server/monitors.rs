//! Handlers for monitor-related endpoints in the HTTP server.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Deserialize;
use serde_json::json;

use super::{error::ApiError, ApiState};

/// Payload for creating a free monitor.
#[derive(Debug, Deserialize)]
pub struct CreateMonitorRequest {
    /// Target page to monitor.
    pub url: String,
    /// Caller-supplied owner identity.
    pub email: String,
}

/// Payload for deleting a monitor.
#[derive(Debug, Deserialize)]
pub struct DeleteMonitorRequest {
    /// Caller-supplied owner identity.
    pub email: String,
}

/// Query string carrying the owner identity.
#[derive(Debug, Deserialize)]
pub struct OwnerQuery {
    /// Caller-supplied owner identity.
    pub email: String,
}

/// Payment-completed event from the external payment collaborator.
#[derive(Debug, Deserialize)]
pub struct PaymentCompletedEvent {
    /// Target page purchased for monitoring.
    pub url: String,
    /// Purchasing account.
    pub email: String,
}

/// Creates a free monitor for the caller, subject to the free-tier quota.
pub async fn create_monitor(
    State(state): State<ApiState>,
    Json(payload): Json<CreateMonitorRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let monitor = state.manager.create_free_monitor(&payload.email, &payload.url).await?;
    let usage = state.manager.free_usage(&monitor.owner_email).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "id": monitor.id,
            "free_used": usage.used,
            "free_limit": usage.limit,
        })),
    ))
}

/// Lists the caller's monitors together with free-tier usage.
pub async fn list_monitors(
    State(state): State<ApiState>,
    Query(query): Query<OwnerQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let monitors = state.manager.list_monitors(&query.email).await?;
    let usage = state.manager.free_usage(&query.email).await?;

    Ok((StatusCode::OK, Json(json!({ "monitors": monitors, "usage": usage }))))
}

/// Reports the caller's free-tier usage.
pub async fn get_usage(
    State(state): State<ApiState>,
    Query(query): Query<OwnerQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let usage = state.manager.free_usage(&query.email).await?;
    Ok((StatusCode::OK, Json(usage)))
}

/// Deletes a monitor owned by the caller.
pub async fn delete_monitor(
    State(state): State<ApiState>,
    Path(monitor_id): Path<String>,
    Json(payload): Json<DeleteMonitorRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state.manager.delete_monitor(&payload.email, &monitor_id).await?;
    Ok((StatusCode::OK, Json(json!({ "success": true }))))
}

/// Creates a paid monitor in response to a confirmed payment event.
pub async fn payment_completed(
    State(state): State<ApiState>,
    Json(event): Json<PaymentCompletedEvent>,
) -> Result<impl IntoResponse, ApiError> {
    let monitor = state.manager.create_paid_monitor(&event.email, &event.url).await?;
    Ok((StatusCode::CREATED, Json(json!({ "id": monitor.id }))))
}
