//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::Link;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::base62;

/// Ids consumed by one derived create before it gives up.
const MAX_DERIVE_ATTEMPTS: u32 = 8;

/// PostgreSQL repository for links.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

fn link_not_found(name: &str) -> AppError {
    AppError::not_found("Link not found", json!({ "name": name }))
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn find_by_name(&self, name: &str) -> Result<Option<Link>, AppError> {
        let link = sqlx::query_as::<_, Link>(
            r#"
            SELECT id, name, url, hits, last_hit_at, created_at, modified_at
            FROM links
            WHERE name = $1
            "#,
        )
        .bind(name)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(link)
    }

    async fn create_with_derived_name(&self, url: &str) -> Result<Link, AppError> {
        let mut tx = self.pool.begin().await?;

        for attempt in 1..=MAX_DERIVE_ATTEMPTS {
            // Name stays NULL until the id is known; the row is invisible to
            // other sessions until commit.
            let id =
                sqlx::query_scalar::<_, i64>("INSERT INTO links (url) VALUES ($1) RETURNING id")
                    .bind(url)
                    .fetch_one(&mut *tx)
                    .await?;

            let name = base62::encode(id)?;

            // Explicit names share the namespace, so the token may be taken.
            let link = sqlx::query_as::<_, Link>(
                r#"
                UPDATE links
                SET name = $2
                WHERE id = $1
                  AND NOT EXISTS (SELECT 1 FROM links WHERE name = $2)
                RETURNING id, name, url, hits, last_hit_at, created_at, modified_at
                "#,
            )
            .bind(id)
            .bind(&name)
            .fetch_optional(&mut *tx)
            .await?;

            if let Some(link) = link {
                tx.commit().await?;
                tracing::info!(id, name = %link.name, "Link created");
                return Ok(link);
            }

            tracing::warn!(id, %name, attempt, "Derived name already taken, retrying");
            sqlx::query("DELETE FROM links WHERE id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
        }

        Err(AppError::conflict(
            "Could not derive a free name",
            json!({ "attempts": MAX_DERIVE_ATTEMPTS }),
        ))
    }

    async fn create_named(&self, name: &str, url: &str) -> Result<Link, AppError> {
        let link = sqlx::query_as::<_, Link>(
            r#"
            INSERT INTO links (name, url)
            VALUES ($1, $2)
            RETURNING id, name, url, hits, last_hit_at, created_at, modified_at
            "#,
        )
        .bind(name)
        .bind(url)
        .fetch_one(self.pool.as_ref())
        .await?;

        tracing::info!(id = link.id, name = %link.name, "Named link created");
        Ok(link)
    }

    async fn update_url(&self, name: &str, url: &str) -> Result<Link, AppError> {
        sqlx::query_as::<_, Link>(
            r#"
            UPDATE links
            SET url = $2, modified_at = now()
            WHERE name = $1
            RETURNING id, name, url, hits, last_hit_at, created_at, modified_at
            "#,
        )
        .bind(name)
        .bind(url)
        .fetch_optional(self.pool.as_ref())
        .await?
        .ok_or_else(|| link_not_found(name))
    }

    async fn rename(&self, name: &str, new_name: &str) -> Result<Link, AppError> {
        sqlx::query_as::<_, Link>(
            r#"
            UPDATE links
            SET name = $2, modified_at = now()
            WHERE name = $1
            RETURNING id, name, url, hits, last_hit_at, created_at, modified_at
            "#,
        )
        .bind(name)
        .bind(new_name)
        .fetch_optional(self.pool.as_ref())
        .await?
        .ok_or_else(|| link_not_found(name))
    }

    async fn delete(&self, name: &str) -> Result<Link, AppError> {
        sqlx::query_as::<_, Link>(
            r#"
            DELETE FROM links
            WHERE name = $1
            RETURNING id, name, url, hits, last_hit_at, created_at, modified_at
            "#,
        )
        .bind(name)
        .fetch_optional(self.pool.as_ref())
        .await?
        .ok_or_else(|| link_not_found(name))
    }

    async fn bump_metrics(&self, name: &str) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"
            UPDATE links
            SET hits = hits + 1, last_hit_at = now()
            WHERE name = $1
            "#,
        )
        .bind(name)
        .execute(self.pool.as_ref())
        .await?;

        if result.rows_affected() == 0 {
            return Err(link_not_found(name));
        }

        Ok(())
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await
            .map_err(|e| {
                AppError::unavailable("Link store unavailable", json!({ "reason": e.to_string() }))
            })?;

        Ok(())
    }
}
