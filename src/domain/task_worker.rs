//! Bounded queue and worker for background tasks.

use std::sync::Arc;

use metrics::counter;
use tokio::sync::{Semaphore, mpsc, mpsc::error::TrySendError};
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

use crate::domain::background_task::BackgroundTask;
use crate::domain::repositories::LinkRepository;
use crate::infrastructure::cache::CacheService;

/// Producer half of the background task queue.
///
/// [`dispatch`](Self::dispatch) never waits: when the queue is full or the
/// worker is gone, the task is dropped and logged.
#[derive(Debug, Clone)]
pub struct TaskSender {
    tx: mpsc::Sender<BackgroundTask>,
}

impl TaskSender {
    pub fn new(tx: mpsc::Sender<BackgroundTask>) -> Self {
        Self { tx }
    }

    /// Creates a queue holding at most `capacity` pending tasks.
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<BackgroundTask>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self::new(tx), rx)
    }

    /// Queues `task` without blocking.
    pub fn dispatch(&self, task: BackgroundTask) {
        match self.tx.try_send(task) {
            Ok(()) => {}
            Err(TrySendError::Full(task)) => {
                warn!(task = task.kind(), name = task.name(), "Task queue full, dropping task");
                counter!("shortr_background_tasks_dropped_total", "task" => task.kind())
                    .increment(1);
            }
            Err(TrySendError::Closed(task)) => {
                warn!(task = task.kind(), name = task.name(), "Task queue closed, dropping task");
                counter!("shortr_background_tasks_dropped_total", "task" => task.kind())
                    .increment(1);
            }
        }
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }

    /// Free slots in the queue.
    pub fn available(&self) -> usize {
        self.tx.capacity()
    }

    pub fn max_capacity(&self) -> usize {
        self.tx.max_capacity()
    }
}

/// Drains the task queue until every sender is dropped.
///
/// At most `concurrency` tasks run at once. Failures are logged and counted,
/// never retried. In-flight tasks are awaited before the worker returns.
pub async fn run_task_worker<L>(
    mut rx: mpsc::Receiver<BackgroundTask>,
    links: Arc<L>,
    cache: Arc<dyn CacheService>,
    concurrency: usize,
) where
    L: LinkRepository + ?Sized + 'static,
{
    let limiter = Arc::new(Semaphore::new(concurrency.max(1)));
    let mut in_flight = JoinSet::new();

    while let Some(task) = rx.recv().await {
        let Ok(permit) = Arc::clone(&limiter).acquire_owned().await else {
            break;
        };

        let links = Arc::clone(&links);
        let cache = Arc::clone(&cache);
        in_flight.spawn(async move {
            execute(task, links.as_ref(), cache.as_ref()).await;
            drop(permit);
        });

        while let Some(joined) = in_flight.try_join_next() {
            report_panic(joined);
        }
    }

    while let Some(joined) = in_flight.join_next().await {
        report_panic(joined);
    }

    info!("Background task worker stopped");
}

async fn execute<L>(task: BackgroundTask, links: &L, cache: &dyn CacheService)
where
    L: LinkRepository + ?Sized,
{
    match task {
        BackgroundTask::Populate { name, url } => {
            cache.set_url(&name, &url).await;
        }
        BackgroundTask::BumpMetrics { name } => match links.bump_metrics(&name).await {
            Ok(()) => debug!(name, "Link metrics updated"),
            Err(e) => {
                warn!(error = %e, name, "Failed to update link metrics");
                counter!("shortr_background_tasks_failed_total", "task" => "bump_metrics")
                    .increment(1);
            }
        },
    }
}

fn report_panic(joined: Result<(), tokio::task::JoinError>) {
    if let Err(e) = joined {
        error!(error = %e, "Background task panicked");
        counter!("shortr_background_tasks_failed_total", "task" => "panicked").increment(1);
    }
}
