//! Fire-and-forget work scheduled by the lookaside read path.

/// Deferred work that must never delay a redirect.
///
/// Tasks are queued by [`crate::application::services::LinkService`] and
/// executed by [`crate::domain::task_worker::run_task_worker`]. Tasks for the
/// same name carry no ordering guarantee relative to each other or to later
/// mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackgroundTask {
    /// Warm the cache with a mapping just fetched from the store.
    Populate { name: String, url: String },

    /// Count a resolution against the stored link.
    BumpMetrics { name: String },
}

impl BackgroundTask {
    /// Short label used in logs and metric labels.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Populate { .. } => "populate",
            Self::BumpMetrics { .. } => "bump_metrics",
        }
    }

    /// Name of the link this task concerns.
    pub fn name(&self) -> &str {
        match self {
            Self::Populate { name, .. } | Self::BumpMetrics { name } => name,
        }
    }
}
