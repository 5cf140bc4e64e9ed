//! Task service: the store plus a read-through cache of the task collection.
//!
//! - **Reads** of the collection check the cache first; on a miss they query
//!   the store and write the result back with a TTL.
//! - **Single-task reads** always go to the store.
//! - **Writes** go to the store, then delete the cached collection before
//!   returning.
//!
//! Cache failures never fail a request. A failed read falls through to the
//! store; a failed invalidation is logged and the stale entry lives until
//! its TTL runs out.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;

use taskstack_core::cache::{deserialize_tasks, serialize_tasks, tasks_key, Cache};
use taskstack_core::storage::{RepositoryError, Result, TaskRepository};
use taskstack_core::task::{NewTask, Task, TaskId};

/// Reachability of a backing service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentStatus {
    Connected,
    Disconnected,
}

impl ComponentStatus {
    fn from_ping<E>(result: std::result::Result<(), E>) -> Self {
        match result {
            Ok(()) => Self::Connected,
            Err(_) => Self::Disconnected,
        }
    }
}

/// Store and cache reachability, as reported by `/health`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HealthReport {
    pub store: ComponentStatus,
    pub cache: ComponentStatus,
}

/// Orchestrates the task store and the collection cache.
///
/// Both adapters are injected, so tests can swap in fakes.
pub struct TaskService {
    repository: Arc<dyn TaskRepository>,
    cache: Arc<dyn Cache>,
    ttl: Duration,
}

impl TaskService {
    /// Creates a new task service.
    ///
    /// # Arguments
    ///
    /// * `repository` - The durable task store
    /// * `cache` - The cache holding the serialized task collection
    /// * `ttl` - Time-to-live for the cached collection
    pub fn new(repository: Arc<dyn TaskRepository>, cache: Arc<dyn Cache>, ttl: Duration) -> Self {
        Self {
            repository,
            cache,
            ttl,
        }
    }

    /// Inserts a task and invalidates the cached collection.
    pub async fn create_task(&self, new: NewTask) -> Result<Task> {
        let task = self.repository.insert_task(&new).await?;
        self.invalidate_tasks().await;

        tracing::info!(task_id = task.id, title = %task.title, "Task created");
        Ok(task)
    }

    /// Reads one task straight from the store.
    pub async fn get_task(&self, id: TaskId) -> Result<Task> {
        self.repository
            .get_task(id)
            .await?
            .ok_or_else(|| RepositoryError::task_not_found(id))
    }

    /// Lists all tasks newest first, served from cache when possible.
    pub async fn list_tasks(&self) -> Result<Vec<Task>> {
        let key = tasks_key();

        match self.cache.get(key).await {
            Ok(Some(bytes)) => match deserialize_tasks(&bytes) {
                Ok(tasks) => {
                    tracing::trace!(count = tasks.len(), "Cache hit for task list");
                    return Ok(tasks);
                }
                // Undecodable payload - treat as cache miss
                Err(err) => tracing::warn!(error = %err, "Cached task list deserialization failed"),
            },
            Ok(None) => tracing::trace!("Cache miss for task list"),
            Err(err) => tracing::warn!(error = %err, "Failed to read task list from cache"),
        }

        let tasks = self.repository.list_tasks().await?;

        match serialize_tasks(&tasks) {
            Ok(bytes) => {
                if let Err(err) = self.cache.set(key, &bytes, Some(self.ttl)).await {
                    tracing::warn!(error = %err, "Failed to cache task list");
                }
            }
            Err(err) => tracing::warn!(error = %err, "Failed to serialize task list"),
        }

        Ok(tasks)
    }

    /// Replaces a task's writable fields and invalidates the cached collection.
    pub async fn update_task(&self, id: TaskId, changes: NewTask) -> Result<Task> {
        let task = self.repository.update_task(id, &changes).await?;
        self.invalidate_tasks().await;

        tracing::info!(task_id = id, completed = task.completed, "Task updated");
        Ok(task)
    }

    /// Deletes a task and invalidates the cached collection.
    pub async fn delete_task(&self, id: TaskId) -> Result<()> {
        self.repository.delete_task(id).await?;
        self.invalidate_tasks().await;

        tracing::info!(task_id = id, "Task deleted");
        Ok(())
    }

    /// Pings both backends. Never fails.
    pub async fn health(&self) -> HealthReport {
        let (store, cache) = tokio::join!(self.repository.ping(), self.cache.ping());
        HealthReport {
            store: ComponentStatus::from_ping(store),
            cache: ComponentStatus::from_ping(cache),
        }
    }

    async fn invalidate_tasks(&self) {
        if let Err(err) = self.cache.delete(tasks_key()).await {
            tracing::warn!(error = %err, "Failed to invalidate task list cache");
        } else {
            tracing::debug!("Task list cache invalidated");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;
    use taskstack_core::cache::{CacheError, Result as CacheResult};

    use crate::cache::MemoryCache;
    use crate::storage::InMemoryRepository;

    const TTL: Duration = Duration::from_secs(60);

    type Log = Arc<Mutex<Vec<String>>>;

    /// Repository wrapper that logs every call and counts list queries.
    struct RecordingRepository {
        inner: InMemoryRepository,
        log: Log,
        list_calls: AtomicUsize,
    }

    impl RecordingRepository {
        fn new(log: Log) -> Self {
            Self {
                inner: InMemoryRepository::new(),
                log,
                list_calls: AtomicUsize::new(0),
            }
        }

        fn record(&self, op: &str) {
            self.log.lock().unwrap().push(op.to_string());
        }

        fn list_calls(&self) -> usize {
            self.list_calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl TaskRepository for RecordingRepository {
        async fn insert_task(&self, new: &NewTask) -> Result<Task> {
            self.record("store:insert");
            self.inner.insert_task(new).await
        }

        async fn get_task(&self, id: TaskId) -> Result<Option<Task>> {
            self.record("store:get");
            self.inner.get_task(id).await
        }

        async fn list_tasks(&self) -> Result<Vec<Task>> {
            self.record("store:list");
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            self.inner.list_tasks().await
        }

        async fn update_task(&self, id: TaskId, changes: &NewTask) -> Result<Task> {
            self.record("store:update");
            self.inner.update_task(id, changes).await
        }

        async fn delete_task(&self, id: TaskId) -> Result<()> {
            self.record("store:delete");
            self.inner.delete_task(id).await
        }

        async fn ping(&self) -> Result<()> {
            self.inner.ping().await
        }
    }

    /// Cache wrapper that logs every call.
    struct RecordingCache {
        inner: MemoryCache,
        log: Log,
    }

    #[async_trait]
    impl Cache for RecordingCache {
        async fn get(&self, key: &str) -> CacheResult<Option<Vec<u8>>> {
            self.log.lock().unwrap().push(format!("cache:get {key}"));
            self.inner.get(key).await
        }

        async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> CacheResult<()> {
            self.log.lock().unwrap().push(format!("cache:set {key}"));
            self.inner.set(key, value, ttl).await
        }

        async fn delete(&self, key: &str) -> CacheResult<()> {
            self.log.lock().unwrap().push(format!("cache:delete {key}"));
            self.inner.delete(key).await
        }

        async fn ping(&self) -> CacheResult<()> {
            Ok(())
        }
    }

    /// Cache whose every operation fails as if Redis were down.
    struct UnreachableCache;

    #[async_trait]
    impl Cache for UnreachableCache {
        async fn get(&self, _key: &str) -> CacheResult<Option<Vec<u8>>> {
            Err(CacheError::ConnectionFailed("connection refused".to_string()))
        }

        async fn set(&self, _key: &str, _value: &[u8], _ttl: Option<Duration>) -> CacheResult<()> {
            Err(CacheError::ConnectionFailed("connection refused".to_string()))
        }

        async fn delete(&self, _key: &str) -> CacheResult<()> {
            Err(CacheError::ConnectionFailed("connection refused".to_string()))
        }

        async fn ping(&self) -> CacheResult<()> {
            Err(CacheError::ConnectionFailed("connection refused".to_string()))
        }
    }

    /// Store whose every operation fails as if PostgreSQL were down.
    struct UnreachableRepository;

    #[async_trait]
    impl TaskRepository for UnreachableRepository {
        async fn insert_task(&self, _new: &NewTask) -> Result<Task> {
            Err(RepositoryError::ConnectionFailed("refused".to_string()))
        }

        async fn get_task(&self, _id: TaskId) -> Result<Option<Task>> {
            Err(RepositoryError::ConnectionFailed("refused".to_string()))
        }

        async fn list_tasks(&self) -> Result<Vec<Task>> {
            Err(RepositoryError::ConnectionFailed("refused".to_string()))
        }

        async fn update_task(&self, _id: TaskId, _changes: &NewTask) -> Result<Task> {
            Err(RepositoryError::ConnectionFailed("refused".to_string()))
        }

        async fn delete_task(&self, _id: TaskId) -> Result<()> {
            Err(RepositoryError::ConnectionFailed("refused".to_string()))
        }

        async fn ping(&self) -> Result<()> {
            Err(RepositoryError::ConnectionFailed("refused".to_string()))
        }
    }

    struct Fixture {
        service: TaskService,
        repo: Arc<RecordingRepository>,
        cache: MemoryCache,
        log: Log,
    }

    fn fixture() -> Fixture {
        let log: Log = Arc::new(Mutex::new(Vec::new()));
        let repo = Arc::new(RecordingRepository::new(log.clone()));
        let cache = MemoryCache::new(16);
        let recording_cache = Arc::new(RecordingCache {
            inner: cache.clone(),
            log: log.clone(),
        });
        let service = TaskService::new(repo.clone(), recording_cache, TTL);
        Fixture {
            service,
            repo,
            cache,
            log,
        }
    }

    impl Fixture {
        fn take_log(&self) -> Vec<String> {
            std::mem::take(&mut *self.log.lock().unwrap())
        }
    }

    #[tokio::test]
    async fn test_create_returns_generated_fields() {
        let f = fixture();

        let task = f.service.create_task(NewTask::new("A")).await.unwrap();

        assert_eq!(task.id, 1);
        assert_eq!(task.title, "A");
        assert!(!task.completed);
        assert_eq!(task.description, None);
    }

    #[tokio::test]
    async fn test_writes_invalidate_after_store_commit() {
        let f = fixture();

        let task = f.service.create_task(NewTask::new("A")).await.unwrap();
        assert_eq!(f.take_log(), vec!["store:insert", "cache:delete tasks:all"]);

        f.service
            .update_task(task.id, NewTask::new("A").with_completed(true))
            .await
            .unwrap();
        assert_eq!(f.take_log(), vec!["store:update", "cache:delete tasks:all"]);

        f.service.delete_task(task.id).await.unwrap();
        assert_eq!(f.take_log(), vec!["store:delete", "cache:delete tasks:all"]);
    }

    #[tokio::test]
    async fn test_failed_write_leaves_cache_alone() {
        let f = fixture();
        f.service.create_task(NewTask::new("A")).await.unwrap();
        f.service.list_tasks().await.unwrap();
        f.take_log();

        let err = f
            .service
            .update_task(99, NewTask::new("ghost"))
            .await
            .unwrap_err();
        assert!(err.is_not_found());

        let err = f.service.delete_task(99).await.unwrap_err();
        assert!(err.is_not_found());

        assert_eq!(f.take_log(), vec!["store:update", "store:delete"]);
        assert!(f.cache.get(tasks_key()).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_get_task_bypasses_cache() {
        let f = fixture();
        let created = f.service.create_task(NewTask::new("A")).await.unwrap();
        f.take_log();

        let fetched = f.service.get_task(created.id).await.unwrap();

        assert_eq!(fetched, created);
        assert_eq!(f.take_log(), vec!["store:get"]);
    }

    #[tokio::test]
    async fn test_get_missing_task_is_not_found() {
        let f = fixture();

        let err = f.service.get_task(42).await.unwrap_err();

        assert_eq!(err, RepositoryError::task_not_found(42));
    }

    #[tokio::test]
    async fn test_second_list_is_served_from_cache() {
        let f = fixture();
        f.service.create_task(NewTask::new("A")).await.unwrap();
        f.service.create_task(NewTask::new("B")).await.unwrap();

        let first = f.service.list_tasks().await.unwrap();
        let second = f.service.list_tasks().await.unwrap();

        assert_eq!(first, second);
        assert_eq!(f.repo.list_calls(), 1);
    }

    #[tokio::test]
    async fn test_list_miss_populates_cache_with_serialized_list() {
        let f = fixture();
        f.service.create_task(NewTask::new("A")).await.unwrap();
        f.take_log();

        let tasks = f.service.list_tasks().await.unwrap();

        assert_eq!(
            f.take_log(),
            vec!["cache:get tasks:all", "store:list", "cache:set tasks:all"]
        );
        let cached = f.cache.get(tasks_key()).await.unwrap().unwrap();
        assert_eq!(cached, serialize_tasks(&tasks).unwrap());
    }

    #[tokio::test]
    async fn test_list_after_write_is_not_stale() {
        let f = fixture();
        let task = f.service.create_task(NewTask::new("A")).await.unwrap();
        f.service.list_tasks().await.unwrap();

        f.service
            .update_task(task.id, NewTask::new("A").with_completed(true))
            .await
            .unwrap();
        let listed = f.service.list_tasks().await.unwrap();

        assert!(listed[0].completed);
        assert_eq!(f.repo.list_calls(), 2);
    }

    #[tokio::test]
    async fn test_list_expired_entry_requeries_store() {
        let log: Log = Arc::new(Mutex::new(Vec::new()));
        let repo = Arc::new(RecordingRepository::new(log));
        let service = TaskService::new(
            repo.clone(),
            Arc::new(MemoryCache::new(16)),
            Duration::from_millis(30),
        );
        service.create_task(NewTask::new("A")).await.unwrap();

        service.list_tasks().await.unwrap();
        tokio::time::sleep(Duration::from_millis(60)).await;
        service.list_tasks().await.unwrap();

        assert_eq!(repo.list_calls(), 2);
    }

    #[tokio::test]
    async fn test_corrupt_cache_entry_treated_as_miss() {
        let f = fixture();
        f.service.create_task(NewTask::new("A")).await.unwrap();
        f.cache
            .set(tasks_key(), b"{not json", Some(TTL))
            .await
            .unwrap();

        let tasks = f.service.list_tasks().await.unwrap();

        assert_eq!(tasks.len(), 1);
        assert_eq!(f.repo.list_calls(), 1);
        // The bad payload was replaced
        let cached = f.cache.get(tasks_key()).await.unwrap().unwrap();
        assert_eq!(deserialize_tasks(&cached).unwrap(), tasks);
    }

    #[tokio::test]
    async fn test_list_orders_newest_first() {
        let f = fixture();
        for title in ["t1", "t2", "t3"] {
            f.service.create_task(NewTask::new(title)).await.unwrap();
        }

        let titles: Vec<String> = f
            .service
            .list_tasks()
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.title)
            .collect();

        assert_eq!(titles, vec!["t3", "t2", "t1"]);
    }

    #[tokio::test]
    async fn test_unreachable_cache_degrades_to_store() {
        let repo = Arc::new(InMemoryRepository::new());
        let service = TaskService::new(repo, Arc::new(UnreachableCache), TTL);

        let created = service.create_task(NewTask::new("A")).await.unwrap();
        let listed = service.list_tasks().await.unwrap();
        let updated = service
            .update_task(created.id, NewTask::new("A2"))
            .await
            .unwrap();
        service.delete_task(created.id).await.unwrap();

        assert_eq!(listed, vec![created]);
        assert_eq!(updated.title, "A2");
        assert!(service.list_tasks().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_store_failure_is_surfaced() {
        let service = TaskService::new(
            Arc::new(UnreachableRepository),
            Arc::new(MemoryCache::new(16)),
            TTL,
        );

        assert!(matches!(
            service.list_tasks().await,
            Err(RepositoryError::ConnectionFailed(_))
        ));
        assert!(matches!(
            service.create_task(NewTask::new("A")).await,
            Err(RepositoryError::ConnectionFailed(_))
        ));
        assert!(matches!(
            service.get_task(1).await,
            Err(RepositoryError::ConnectionFailed(_))
        ));
    }

    #[tokio::test]
    async fn test_health_reports_each_backend() {
        let f = fixture();
        assert_eq!(
            f.service.health().await,
            HealthReport {
                store: ComponentStatus::Connected,
                cache: ComponentStatus::Connected,
            }
        );

        let degraded = TaskService::new(
            Arc::new(UnreachableRepository),
            Arc::new(UnreachableCache),
            TTL,
        );
        assert_eq!(
            degraded.health().await,
            HealthReport {
                store: ComponentStatus::Disconnected,
                cache: ComponentStatus::Disconnected,
            }
        );
    }

    #[tokio::test]
    async fn test_compose_demo_scenario() {
        let f = fixture();

        let a = f.service.create_task(NewTask::new("A")).await.unwrap();
        assert_eq!(a.id, 1);
        assert!(!a.completed);

        let b = f.service.create_task(NewTask::new("B")).await.unwrap();
        assert_eq!(b.id, 2);
        assert!(b.created_at > a.created_at);

        let listed = f.service.list_tasks().await.unwrap();
        assert_eq!(listed, vec![b.clone(), a.clone()]);

        let a_done = f
            .service
            .update_task(1, NewTask::new("A").with_completed(true))
            .await
            .unwrap();
        assert_eq!(a_done.id, 1);
        assert_eq!(a_done.title, "A");
        assert!(a_done.completed);

        let listed = f.service.list_tasks().await.unwrap();
        assert_eq!(listed, vec![b, a_done]);

        f.service.delete_task(2).await.unwrap();
        assert!(f.service.get_task(2).await.unwrap_err().is_not_found());
    }
}
