//! Link resolution and mutation service.
//!
//! This is where the cache and the store meet. Reads consult the cache first
//! and fall back to the store; cache population and hit counting are handed
//! to the background worker so a redirect never waits on either. Mutations
//! go to the store first and touch the cache only after the store confirmed.

use std::sync::Arc;

use serde_json::json;
use tracing::debug;

use crate::domain::background_task::BackgroundTask;
use crate::domain::entities::Link;
use crate::domain::repositories::LinkRepository;
use crate::domain::task_worker::TaskSender;
use crate::error::AppError;
use crate::infrastructure::cache::{CacheService, CacheStats};
use crate::utils::link_name::validate_name;
use crate::utils::url_validator::validate_target_url;

/// Resolves names to URLs and applies link mutations.
///
/// The cache is a best-effort accelerator. The store stays authoritative and
/// a store failure never results in a cache write.
pub struct LinkService<L: LinkRepository + ?Sized> {
    links: Arc<L>,
    cache: Arc<dyn CacheService>,
    tasks: TaskSender,
}

impl<L: LinkRepository + ?Sized> LinkService<L> {
    pub fn new(links: Arc<L>, cache: Arc<dyn CacheService>, tasks: TaskSender) -> Self {
        Self {
            links,
            cache,
            tasks,
        }
    }

    /// Resolves `name` to its destination URL.
    ///
    /// A cache hit returns at once. A miss reads the store and, when the link
    /// exists, schedules a cache populate. Either way a hit counter update is
    /// scheduled. Unknown names yield `Ok(None)` and leave the cache alone.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unavailable`] when the store cannot be reached on a
    /// cache miss.
    pub async fn resolve(&self, name: &str) -> Result<Option<String>, AppError> {
        if let Some(url) = self.cache.get_url(name).await {
            self.tasks.dispatch(BackgroundTask::BumpMetrics {
                name: name.to_string(),
            });
            return Ok(Some(url));
        }

        let Some(link) = self.links.find_by_name(name).await? else {
            debug!(name, "Name not found in store");
            return Ok(None);
        };

        self.tasks.dispatch(BackgroundTask::Populate {
            name: link.name.clone(),
            url: link.url.clone(),
        });
        self.tasks.dispatch(BackgroundTask::BumpMetrics { name: link.name });

        Ok(Some(link.url))
    }

    /// Writes `name -> url` into the cache unconditionally.
    pub async fn populate(&self, name: &str, url: &str) {
        self.cache.set_url(name, url).await;
    }

    /// Overwrites the cached URL for `name` if it is resident.
    pub async fn refresh(&self, name: &str, url: &str) -> bool {
        self.cache.refresh_url(name, url).await
    }

    /// Drops `name` from the cache.
    pub async fn invalidate(&self, name: &str) {
        self.cache.invalidate(name).await;
    }

    /// Creates a link named after the base62 encoding of its id.
    ///
    /// The cache is not touched; the first read warms it.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for an unacceptable URL and
    /// [`AppError::Conflict`] if the derived name is already taken.
    pub async fn create_link(&self, url: &str) -> Result<Link, AppError> {
        let url = validate_target_url(url)?;
        self.links.create_with_derived_name(&url).await
    }

    /// Creates a link under a caller-chosen name.
    ///
    /// A populate for a previously deleted link of the same name may still be
    /// resident, so the name is invalidated once the row exists.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for a bad name or URL and
    /// [`AppError::Conflict`] if the name is taken.
    pub async fn create_named(&self, name: &str, url: &str) -> Result<Link, AppError> {
        validate_name(name)?;
        let url = validate_target_url(url)?;

        let link = self.links.create_named(name, &url).await?;
        self.cache.invalidate(&link.name).await;

        Ok(link)
    }

    /// Points `name` at a new URL and refreshes the cached copy in place.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has that name.
    pub async fn update_url(&self, name: &str, url: &str) -> Result<Link, AppError> {
        let url = validate_target_url(url)?;

        let link = self.links.update_url(name, &url).await?;
        self.cache.refresh_url(&link.name, &link.url).await;

        Ok(link)
    }

    /// Renames a link and evicts the old name from the cache.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if `name` is unknown and
    /// [`AppError::Conflict`] if `new_name` is taken.
    pub async fn rename(&self, name: &str, new_name: &str) -> Result<Link, AppError> {
        validate_name(new_name)?;
        if name == new_name {
            return Err(AppError::bad_request(
                "New name must differ from the current one",
                json!({ "name": name }),
            ));
        }

        let link = self.links.rename(name, new_name).await?;
        self.cache.invalidate(name).await;
        // Same reason as in create_named
        self.cache.invalidate(&link.name).await;

        Ok(link)
    }

    /// Deletes a link and evicts it from the cache.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has that name.
    pub async fn delete(&self, name: &str) -> Result<Link, AppError> {
        let link = self.links.delete(name).await?;
        self.cache.invalidate(name).await;

        Ok(link)
    }

    /// Reads the full record from the store, bypassing the cache.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has that name.
    pub async fn get_link(&self, name: &str) -> Result<Link, AppError> {
        self.links
            .find_by_name(name)
            .await?
            .ok_or_else(|| AppError::not_found("Link not found", json!({ "name": name })))
    }

    /// Checks that the store answers.
    pub async fn ping(&self) -> Result<(), AppError> {
        self.links.ping().await
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn tasks(&self) -> &TaskSender {
        &self.tasks
    }
}
