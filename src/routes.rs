//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET    /health`        - Store ping, cache occupancy, task queue
//! - `POST   /`              - Create a link with a derived name (`?url=`)
//! - `GET    /{name}`        - Redirect
//! - `POST   /{name}`        - Create a link under this name (`?url=`)
//! - `PUT    /{name}`        - Change the destination (`?url=`)
//! - `PATCH  /{name}`        - Rename (`?name=`)
//! - `DELETE /{name}`        - Delete
//! - `GET    /{name}/stats`  - Stored record with hit metrics
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::middleware::tracing;
use crate::state::AppState;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<axum::Router> {
    let router = api::routes::routes()
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
