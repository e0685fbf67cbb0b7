//! Health check handlers

use axum::{extract::State, http::HeaderMap};

use super::error::{ApiError, ApiOperation};
use super::items::request_context;
use super::response::{ApiResponse, HealthStatus};
use crate::repository::ItemRepository;
use crate::state::AppState;

/// Liveness check
///
/// Always returns 200 OK if the service is running.
pub async fn health<R: ItemRepository>(State(state): State<AppState<R>>) -> ApiResponse<HealthStatus> {
    ApiResponse::success(HealthStatus::healthy(state.config().service.name.as_str()))
}

/// Storage connectivity check
///
/// Returns 200 when the backing table is reachable and 503 otherwise.
pub async fn health_db<R: ItemRepository>(
    State(state): State<AppState<R>>,
    headers: HeaderMap,
) -> Result<ApiResponse<HealthStatus>, ApiError> {
    let ctx = request_context(&state, &headers);
    let table = state.config().storage.table_name.clone();

    match state.repository().health_check(&ctx).await {
        Ok(()) => {
            let mut status = HealthStatus::healthy(state.config().service.name.as_str());
            status.table = Some(table);
            status.message = Some("Connected".to_string());
            Ok(ApiResponse::success(status))
        }
        Err(err) => Err(ApiError::service_unavailable("Storage health check failed")
            .with_details(format!("Table '{table}' is not reachable"))
            .with_operation(ApiOperation::HealthCheck)
            .with_cause(err.to_string())),
    }
}
