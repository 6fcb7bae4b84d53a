//! Handler for name resolution.

use axum::{
    extract::{Path, State},
    response::Redirect,
};
use serde_json::json;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a name to its destination URL.
///
/// # Endpoint
///
/// `GET /{name}`
///
/// The cache is consulted first; see
/// [`LinkService::resolve`](crate::application::services::LinkService::resolve).
/// Cache population and hit counting happen after the response is sent.
///
/// # Errors
///
/// Returns 404 Not Found if the name is unknown and 503 if the store is
/// unreachable on a cache miss.
pub async fn redirect_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Redirect, AppError> {
    match state.link_service.resolve(&name).await? {
        Some(url) => Ok(Redirect::temporary(&url)),
        None => Err(AppError::not_found(
            "Link not found",
            json!({ "name": name }),
        )),
    }
}
