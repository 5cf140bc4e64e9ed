//! Application state shared by all request handlers.
//!
//! The store and cache backends are chosen by feature flags:
//!
//! | Concern | Feature on         | Feature off           |
//! |---------|--------------------|-----------------------|
//! | Store   | `PostgresRepository` | `InMemoryRepository` |
//! | Cache   | `RedisCache`       | `MemoryCache`         |
//!
//! Both networked backends connect lazily, so the server starts while
//! PostgreSQL or Redis is still unreachable and `/health` reports it.

use std::sync::Arc;

use taskstack_core::cache::Cache;
use taskstack_core::storage::TaskRepository;

use crate::config::Config;
use crate::service::TaskService;

/// Shared application state.
///
/// Cheap to clone; handlers receive their own copy per request.
#[derive(Clone)]
pub struct AppState {
    pub tasks: Arc<TaskService>,
}

impl AppState {
    pub fn new(tasks: TaskService) -> Self {
        Self {
            tasks: Arc::new(tasks),
        }
    }

    /// Builds the state from configuration, wiring the backends enabled at
    /// compile time.
    pub async fn from_config(config: &Config) -> anyhow::Result<Self> {
        let repository = build_repository(config).await;
        let cache = build_cache(config)?;

        Ok(Self::new(TaskService::new(
            repository,
            cache,
            config.cache_ttl(),
        )))
    }

    /// State backed entirely by in-memory adapters.
    #[cfg(test)]
    pub fn in_memory() -> Self {
        Self::new(TaskService::new(
            Arc::new(crate::storage::InMemoryRepository::new()),
            Arc::new(crate::cache::MemoryCache::new(64)),
            std::time::Duration::from_secs(60),
        ))
    }
}

#[cfg(feature = "postgres")]
async fn build_repository(config: &Config) -> Arc<dyn TaskRepository> {
    use crate::storage::PostgresRepository;

    let repo = PostgresRepository::connect_lazy(
        config.pg_connect_options(),
        config.postgres_max_connections,
        config.postgres_acquire_timeout(),
    );

    match repo.init_schema().await {
        Ok(()) => tracing::info!(
            host = %config.postgres_host,
            database = %config.postgres_db,
            "PostgreSQL schema ready"
        ),
        Err(err) => tracing::warn!(
            host = %config.postgres_host,
            error = %err,
            "Could not create tasks table, continuing without it"
        ),
    }

    Arc::new(repo)
}

#[cfg(not(feature = "postgres"))]
async fn build_repository(_config: &Config) -> Arc<dyn TaskRepository> {
    tracing::info!("Using in-memory task store");
    Arc::new(crate::storage::InMemoryRepository::new())
}

#[cfg(feature = "redis")]
fn build_cache(config: &Config) -> anyhow::Result<Arc<dyn Cache>> {
    use crate::cache::RedisCache;

    let url = config.redis_url();
    let cache = RedisCache::new(&url, config.redis_timeout())?;
    tracing::info!(url = %url, "Redis cache configured");
    Ok(Arc::new(cache))
}

#[cfg(not(feature = "redis"))]
fn build_cache(config: &Config) -> anyhow::Result<Arc<dyn Cache>> {
    tracing::info!(max_entries = config.cache_max_entries, "Using in-memory cache");
    Ok(Arc::new(crate::cache::MemoryCache::new(
        config.cache_max_entries,
    )))
}
