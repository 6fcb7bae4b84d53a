#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

use shortr::application::services::LinkService;
use shortr::domain::background_task::BackgroundTask;
use shortr::domain::entities::Link;
use shortr::domain::repositories::LinkRepository;
use shortr::domain::task_worker::TaskSender;
use shortr::error::AppError;
use shortr::infrastructure::cache::{CacheService, MemoryCache};
use shortr::state::AppState;
use shortr::utils::base62;

pub const BASE_URL: &str = "http://s.test";

/// Link store kept in memory, counting lookups so tests can tell cache hits
/// from store reads.
#[derive(Default)]
pub struct InMemoryLinkRepository {
    links: Mutex<HashMap<String, Link>>,
    next_id: AtomicUsize,
    lookups: AtomicUsize,
    unavailable: AtomicBool,
}

impl InMemoryLinkRepository {
    pub fn new() -> Self {
        Self {
            next_id: AtomicUsize::new(1),
            ..Default::default()
        }
    }

    /// Number of `find_by_name` calls so far.
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    /// Makes every call fail as if the database were down.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn get(&self, name: &str) -> Option<Link> {
        self.links.lock().unwrap().get(name).cloned()
    }

    fn check_available(&self) -> Result<(), AppError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(AppError::unavailable("Link store unavailable", json!({})));
        }
        Ok(())
    }

    fn insert(&self, name: String, url: &str) -> Result<Link, AppError> {
        let mut links = self.links.lock().unwrap();
        if links.contains_key(&name) {
            return Err(AppError::conflict("Name already in use", json!({})));
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst) as i64;
        let link = Link::new(id, name.clone(), url.to_string(), Utc::now());
        links.insert(name, link.clone());
        Ok(link)
    }
}

fn not_found(name: &str) -> AppError {
    AppError::not_found("Link not found", json!({ "name": name }))
}

#[async_trait]
impl LinkRepository for InMemoryLinkRepository {
    async fn find_by_name(&self, name: &str) -> Result<Option<Link>, AppError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        Ok(self.get(name))
    }

    async fn create_with_derived_name(&self, url: &str) -> Result<Link, AppError> {
        self.check_available()?;
        let mut links = self.links.lock().unwrap();
        loop {
            // Ids behind explicitly taken names are skipped
            let id = self.next_id.fetch_add(1, Ordering::SeqCst) as i64;
            let name = base62::encode(id)?;
            if !links.contains_key(&name) {
                let link = Link::new(id, name.clone(), url.to_string(), Utc::now());
                links.insert(name, link.clone());
                return Ok(link);
            }
        }
    }

    async fn create_named(&self, name: &str, url: &str) -> Result<Link, AppError> {
        self.check_available()?;
        self.insert(name.to_string(), url)
    }

    async fn update_url(&self, name: &str, url: &str) -> Result<Link, AppError> {
        self.check_available()?;
        let mut links = self.links.lock().unwrap();
        let link = links.get_mut(name).ok_or_else(|| not_found(name))?;
        link.url = url.to_string();
        link.modified_at = Utc::now();
        Ok(link.clone())
    }

    async fn rename(&self, name: &str, new_name: &str) -> Result<Link, AppError> {
        self.check_available()?;
        let mut links = self.links.lock().unwrap();
        if links.contains_key(new_name) {
            return Err(AppError::conflict("Name already in use", json!({})));
        }
        let mut link = links.remove(name).ok_or_else(|| not_found(name))?;
        link.name = new_name.to_string();
        link.modified_at = Utc::now();
        links.insert(new_name.to_string(), link.clone());
        Ok(link)
    }

    async fn delete(&self, name: &str) -> Result<Link, AppError> {
        self.check_available()?;
        self.links
            .lock()
            .unwrap()
            .remove(name)
            .ok_or_else(|| not_found(name))
    }

    async fn bump_metrics(&self, name: &str) -> Result<(), AppError> {
        self.check_available()?;
        let mut links = self.links.lock().unwrap();
        let link = links.get_mut(name).ok_or_else(|| not_found(name))?;
        link.hits += 1;
        link.last_hit_at = Some(Utc::now());
        Ok(())
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.check_available()
    }
}

/// Everything a handler test needs to drive and observe the service.
pub struct TestContext {
    pub state: AppState,
    pub repo: Arc<InMemoryLinkRepository>,
    pub cache: Arc<MemoryCache>,
    pub tasks: mpsc::Receiver<BackgroundTask>,
}

impl TestContext {
    /// Runs queued background tasks inline, in order.
    pub async fn run_pending_tasks(&mut self) -> usize {
        let mut ran = 0;
        while let Ok(task) = self.tasks.try_recv() {
            match task {
                BackgroundTask::Populate { name, url } => {
                    self.cache.set_url(&name, &url).await;
                }
                BackgroundTask::BumpMetrics { name } => {
                    let _ = self.repo.bump_metrics(&name).await;
                }
            }
            ran += 1;
        }
        ran
    }
}

pub fn create_test_context(cache_capacity: usize) -> TestContext {
    let repo = Arc::new(InMemoryLinkRepository::new());
    let cache = Arc::new(MemoryCache::new(cache_capacity));
    let (task_sender, tasks) = TaskSender::channel(100);

    let links: Arc<dyn LinkRepository> = repo.clone();
    let cache_service: Arc<dyn CacheService> = cache.clone();
    let link_service = Arc::new(LinkService::new(links, cache_service, task_sender));

    TestContext {
        state: AppState::new(link_service, BASE_URL),
        repo,
        cache,
        tasks,
    }
}
