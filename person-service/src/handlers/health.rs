use crate::config::{MONGODB_SERVICE_HOST, MONGODB_SERVICE_PORT};
use crate::startup::AppState;
use axum::extract::State;
use service_core::error::AppError;

pub const HEALTHZ_MESSAGE: &str = "hello from /healthz endpoint";

/// Configuration presence check.
///
/// Reads the store host and port from the environment on every call. Does
/// not contact the store.
pub async fn healthz(State(state): State<AppState>) -> Result<&'static str, AppError> {
    tracing::info!("/healthz called");

    let host = state.env.var(MONGODB_SERVICE_HOST);
    let port = state.env.var(MONGODB_SERVICE_PORT);
    tracing::info!(host = ?host, port = ?port, "mongo connection settings");

    if host.is_none() || port.is_none() {
        return Err(AppError::ConfigError(anyhow::anyhow!(
            "{} or {} is not set",
            MONGODB_SERVICE_HOST,
            MONGODB_SERVICE_PORT
        )));
    }

    Ok(HEALTHZ_MESSAGE)
}
