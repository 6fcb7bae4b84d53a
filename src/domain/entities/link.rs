//! Link entity: the authoritative `name -> url` record.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A stored link with its usage metrics.
///
/// `name` is either derived from `id` with the base62 codec or chosen
/// explicitly at creation or rename time. Both `id` and `name` are unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Link {
    pub id: i64,
    pub name: String,
    pub url: String,
    pub hits: i64,
    pub last_hit_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl Link {
    /// Creates a link that has never been hit.
    pub fn new(id: i64, name: String, url: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name,
            url,
            hits: 0,
            last_hit_at: None,
            created_at,
            modified_at: created_at,
        }
    }

    /// Returns true if the link has been resolved at least once.
    pub fn was_hit(&self) -> bool {
        self.hits > 0
    }
}
