//! The scheduled sweep trigger.

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json},
};

use super::{error::ApiError, ApiState};

/// Header carrying the shared secret from the external scheduler.
const CRON_SECRET_HEADER: &str = "x-cron-secret";

/// Runs one sweep over the active monitors and returns the summary counters.
///
/// The external scheduler authenticates with a shared secret; a server with
/// no secret configured rejects every trigger.
pub async fn run_sweep(
    State(state): State<ApiState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let provided = headers.get(CRON_SECRET_HEADER).and_then(|value| value.to_str().ok());
    let expected = state.config.server.cron_secret.as_deref();

    if expected.is_none() || provided != expected {
        tracing::warn!("Sweep trigger rejected: invalid or missing cron secret.");
        return Err(ApiError::Unauthorized);
    }

    let summary = state
        .sweep
        .run()
        .await
        .map_err(|e| ApiError::InternalServerError(e.to_string()))?;

    Ok((StatusCode::OK, Json(summary)))
}
