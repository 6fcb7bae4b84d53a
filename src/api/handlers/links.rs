//! Handlers for link management endpoints (create, update, rename, delete).

use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::api::dto::link::{LinkResponse, RenameQuery, UrlQuery};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a link named after its row id.
///
/// # Endpoint
///
/// `POST /?url=https://example.com`
///
/// # Errors
///
/// Returns 400 Bad Request for a missing or unacceptable URL.
pub async fn create_link_handler(
    State(state): State<AppState>,
    Query(query): Query<UrlQuery>,
) -> Result<Json<LinkResponse>, AppError> {
    let url = query.into_url()?;
    let link = state.link_service.create_link(&url).await?;

    let short_url = state.short_url(&link.name);
    Ok(Json(LinkResponse::new(link, short_url)))
}

/// Creates a link under an explicit name.
///
/// # Endpoint
///
/// `POST /{name}?url=https://example.com`
///
/// # Errors
///
/// Returns 400 Bad Request for a bad name or URL and 409 Conflict if the
/// name is taken.
pub async fn create_named_link_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(query): Query<UrlQuery>,
) -> Result<Json<LinkResponse>, AppError> {
    let url = query.into_url()?;
    let link = state.link_service.create_named(&name, &url).await?;

    let short_url = state.short_url(&link.name);
    Ok(Json(LinkResponse::new(link, short_url)))
}

/// Points an existing name at a new URL.
///
/// # Endpoint
///
/// `PUT /{name}?url=https://example.com/new`
///
/// A resident cache entry is refreshed in place.
///
/// # Errors
///
/// Returns 404 Not Found if the name is unknown.
pub async fn update_link_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(query): Query<UrlQuery>,
) -> Result<Json<LinkResponse>, AppError> {
    let url = query.into_url()?;
    let link = state.link_service.update_url(&name, &url).await?;

    let short_url = state.short_url(&link.name);
    Ok(Json(LinkResponse::new(link, short_url)))
}

/// Renames a link.
///
/// # Endpoint
///
/// `PATCH /{name}?name=new-name`
///
/// The old name stops resolving immediately.
///
/// # Errors
///
/// Returns 404 Not Found if the name is unknown and 409 Conflict if the new
/// name is taken.
pub async fn rename_link_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(query): Query<RenameQuery>,
) -> Result<Json<LinkResponse>, AppError> {
    let new_name = query.into_name()?;
    let link = state.link_service.rename(&name, &new_name).await?;

    let short_url = state.short_url(&link.name);
    Ok(Json(LinkResponse::new(link, short_url)))
}

/// Deletes a link and returns the removed record.
///
/// # Endpoint
///
/// `DELETE /{name}`
///
/// # Errors
///
/// Returns 404 Not Found if the name is unknown.
pub async fn delete_link_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<LinkResponse>, AppError> {
    let link = state.link_service.delete(&name).await?;

    let short_url = state.short_url(&link.name);
    Ok(Json(LinkResponse::new(link, short_url)))
}
