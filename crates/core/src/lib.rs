//! Core domain for the taskstack service.
//!
//! Pure types and adapter traits with no I/O of their own. Concrete
//! storage and cache backends live in the `taskstack` binary crate.

pub mod cache;
pub mod storage;
pub mod task;
