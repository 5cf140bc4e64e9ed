//! Cache backend implementations.
//!
//! Concrete implementations of [`taskstack_core::cache::Cache`].
//!
//! # Feature Flags
//!
//! - `redis` (default): Redis cache using the redis crate
//!
//! The in-memory LRU cache is always compiled. It backs the service when the
//! `redis` feature is disabled and is the cache used by the test suite.

pub mod memory;

#[cfg(feature = "redis")]
pub mod redis_impl;

pub use memory::MemoryCache;

#[cfg(feature = "redis")]
pub use redis_impl::RedisCache;
