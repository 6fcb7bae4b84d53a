//! API route configuration.

use crate::api::handlers::{
    create_link_handler, create_named_link_handler, delete_link_handler, health_handler,
    redirect_handler, rename_link_handler, stats_handler, update_link_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// All public routes.
///
/// # Endpoints
///
/// - `GET    /health`
/// - `POST   /`              - create with derived name
/// - `GET    /{name}`        - redirect
/// - `POST   /{name}`        - create with explicit name
/// - `PUT    /{name}`        - update destination
/// - `PATCH  /{name}`        - rename
/// - `DELETE /{name}`        - delete
/// - `GET    /{name}/stats`  - stored record with metrics
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_handler))
        .route("/", post(create_link_handler))
        .route(
            "/{name}",
            get(redirect_handler)
                .post(create_named_link_handler)
                .put(update_link_handler)
                .patch(rename_link_handler)
                .delete(delete_link_handler),
        )
        .route("/{name}/stats", get(stats_handler))
}
