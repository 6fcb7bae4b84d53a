//! Handler for link statistics.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::link::LinkResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the stored record for a name, including hit metrics.
///
/// # Endpoint
///
/// `GET /{name}/stats`
///
/// Always read from the store, so hits counted by the background worker
/// show up here even while the name is cached.
///
/// # Errors
///
/// Returns 404 Not Found if the name is unknown.
pub async fn stats_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<LinkResponse>, AppError> {
    let link = state.link_service.get_link(&name).await?;

    let short_url = state.short_url(&link.name);
    Ok(Json(LinkResponse::new(link, short_url)))
}
