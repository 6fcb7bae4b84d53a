//! Domain layer: entities, repository contracts and background work.
//!
//! - [`entities`] - core data structures
//! - [`repositories`] - storage trait definitions
//! - [`background_task`] - deferred cache population and metric updates
//! - [`task_worker`] - bounded queue and worker executing those tasks
//!
//! # Resolution Flow
//!
//! 1. A redirect handler asks the link service to resolve a name
//! 2. The service answers from the cache or the store
//! 3. [`background_task::BackgroundTask`]s are queued without waiting
//! 4. [`task_worker::run_task_worker`] applies them to the cache and store

pub mod background_task;
pub mod entities;
pub mod repositories;
pub mod task_worker;
