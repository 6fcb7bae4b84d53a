//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: All components healthy
/// - **503 Service Unavailable**: One or more components degraded
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "database": { "status": "ok", "message": "Connected" },
///     "task_queue": { "status": "ok", "message": "9998/10000 slots free" },
///     "cache": { "status": "ok", "message": "412/1024 entries" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let database = check_database(&state).await;
    let task_queue = check_task_queue(&state);
    let cache = check_cache(&state);

    let all_healthy = database.is_ok() && task_queue.is_ok() && cache.is_ok();

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            database,
            task_queue,
            cache,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

async fn check_database(state: &AppState) -> CheckStatus {
    match state.link_service.ping().await {
        Ok(()) => CheckStatus::ok("Connected"),
        Err(e) => CheckStatus::error(format!("Database error: {e}")),
    }
}

/// A closed queue means the worker is gone and no cache population or hit
/// counting happens any more.
fn check_task_queue(state: &AppState) -> CheckStatus {
    let tasks = state.link_service.tasks();
    if tasks.is_closed() {
        CheckStatus::error("Task queue is closed")
    } else {
        CheckStatus::ok(format!(
            "{}/{} slots free",
            tasks.available(),
            tasks.max_capacity()
        ))
    }
}

fn check_cache(state: &AppState) -> CheckStatus {
    let stats = state.link_service.cache_stats();
    CheckStatus::ok(format!("{}/{} entries", stats.entries, stats.capacity))
}
