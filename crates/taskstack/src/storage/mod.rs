//! Storage backend implementations.
//!
//! Concrete implementations of [`taskstack_core::storage::TaskRepository`].
//!
//! # Feature Flags
//!
//! - `postgres` (default): PostgreSQL storage backend using `sqlx`
//!
//! The in-memory repository is always compiled. It backs the service when
//! the `postgres` feature is disabled and is the store used by the test
//! suite.
//!
//! # Examples
//!
//! Build with PostgreSQL (default):
//! ```bash
//! cargo build -p taskstack
//! ```
//!
//! Build fully in-memory:
//! ```bash
//! cargo build -p taskstack --no-default-features
//! ```

pub mod inmemory;

#[cfg(feature = "postgres")]
pub mod postgres;

pub use inmemory::InMemoryRepository;

#[cfg(feature = "postgres")]
pub use postgres::PostgresRepository;
