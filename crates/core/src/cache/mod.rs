mod error;
mod keys;
mod serialization;
mod traits;

pub use error::{CacheError, Result};
pub use keys::{tasks_key, TASKS_ALL_KEY, TASKS_CACHE_TTL_SECS};
pub use serialization::{deserialize_tasks, serialize_tasks, SerializationError};
pub use traits::Cache;
