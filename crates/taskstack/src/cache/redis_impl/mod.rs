//! Redis cache backend implementation.
//!
//! The connection manager is created on first use, so the service starts
//! even when Redis is not reachable yet.

mod cache;
mod error;

pub use cache::RedisCache;
