//! Repository trait for link storage.

use crate::domain::entities::Link;
use crate::error::AppError;
use async_trait::async_trait;

/// Authoritative storage for links.
///
/// Every mutating method either commits fully or leaves the store unchanged.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Finds a link by its name.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unavailable`] when the store cannot be reached and
    /// [`AppError::Internal`] on other database errors.
    async fn find_by_name(&self, name: &str) -> Result<Option<Link>, AppError>;

    /// Creates a link whose name is the base62 encoding of its new id.
    ///
    /// Row insertion and name assignment happen in one transaction, so two
    /// concurrent creates can never be handed the same name.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the derived name is already taken by
    /// an explicitly named link.
    async fn create_with_derived_name(&self, url: &str) -> Result<Link, AppError>;

    /// Creates a link under an explicit name.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the name is taken.
    async fn create_named(&self, name: &str, url: &str) -> Result<Link, AppError>;

    /// Replaces the destination of the link called `name`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has that name.
    async fn update_url(&self, name: &str, url: &str) -> Result<Link, AppError>;

    /// Renames the link called `name` to `new_name`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has that name and
    /// [`AppError::Conflict`] if `new_name` is taken.
    async fn rename(&self, name: &str, new_name: &str) -> Result<Link, AppError>;

    /// Deletes the link called `name`, returning the removed record.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has that name.
    async fn delete(&self, name: &str) -> Result<Link, AppError>;

    /// Increments the hit counter and stamps `last_hit_at`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the link vanished in the meantime.
    async fn bump_metrics(&self, name: &str) -> Result<(), AppError>;

    /// Checks that the store answers queries.
    async fn ping(&self) -> Result<(), AppError>;
}
