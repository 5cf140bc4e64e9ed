//! In-memory storage backend.
//!
//! Used by the test suite and by builds without the `postgres` feature.
//! Data lives only as long as the repository.

mod repository;

pub use repository::InMemoryRepository;
