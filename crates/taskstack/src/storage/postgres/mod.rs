//! PostgreSQL storage backend implementation.
//!
//! Implements `TaskRepository` on a lazily connected `sqlx::PgPool`. Each
//! call checks a connection out of the pool and returns it when done.

mod conversions;
mod error;
mod repository;
mod schema;

pub use repository::PostgresRepository;
