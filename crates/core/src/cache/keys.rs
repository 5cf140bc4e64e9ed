/// Key under which the full, ordered task collection is cached.
pub const TASKS_ALL_KEY: &str = "tasks:all";

/// Default lifetime of the cached task collection, in seconds.
pub const TASKS_CACHE_TTL_SECS: u64 = 60;

/// Returns the cache key for the task collection.
///
/// Only the full collection is cached; there are no per-task keys.
pub fn tasks_key() -> &'static str {
    TASKS_ALL_KEY
}
