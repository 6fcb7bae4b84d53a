//! DTOs for link endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use validator::Validate;

use crate::domain::entities::Link;
use crate::error::AppError;
use crate::utils::link_name::MAX_NAME_LENGTH;
use crate::utils::url_validator::MAX_URL_LENGTH;

// validator compares lengths as u64.
const URL_LENGTH_LIMIT: u64 = MAX_URL_LENGTH as u64;
const NAME_LENGTH_LIMIT: u64 = MAX_NAME_LENGTH as u64;

/// Query string for create and update: `?url=https://...`.
#[derive(Debug, Deserialize, Validate)]
pub struct UrlQuery {
    #[validate(
        required(message = "The url query parameter is required"),
        length(min = 1, max = URL_LENGTH_LIMIT)
    )]
    pub url: Option<String>,
}

impl UrlQuery {
    /// Validates and returns the destination URL.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `url` is missing or out of bounds.
    pub fn into_url(self) -> Result<String, AppError> {
        self.validate()?;
        self.url
            .ok_or_else(|| AppError::bad_request("Validation failed", json!({ "fields": ["url"] })))
    }
}

/// Query string for rename: `?name=new-name`.
#[derive(Debug, Deserialize, Validate)]
pub struct RenameQuery {
    #[validate(
        required(message = "The name query parameter is required"),
        length(min = 1, max = NAME_LENGTH_LIMIT)
    )]
    pub name: Option<String>,
}

impl RenameQuery {
    /// Validates and returns the new name.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `name` is missing or out of bounds.
    pub fn into_name(self) -> Result<String, AppError> {
        self.validate()?;
        self.name
            .ok_or_else(|| AppError::bad_request("Validation failed", json!({ "fields": ["name"] })))
    }
}

/// JSON representation of a stored link.
#[derive(Debug, Serialize)]
pub struct LinkResponse {
    pub id: i64,
    pub name: String,
    pub url: String,
    pub short_url: String,
    pub hits: i64,
    pub last_hit_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl LinkResponse {
    pub fn new(link: Link, short_url: String) -> Self {
        Self {
            id: link.id,
            name: link.name,
            url: link.url,
            short_url,
            hits: link.hits,
            last_hit_at: link.last_hit_at,
            created_at: link.created_at,
            modified_at: link.modified_at,
        }
    }
}
