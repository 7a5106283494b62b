//! Document store abstractions
//!
//! The scorer depends only on the [`DocumentStore`] trait. [`InMemoryStore`]
//! is a simple implementation backed by a vector of shared documents, able to
//! load JSON snapshots exported from a notes application.

pub mod errors;
pub mod memory;
pub mod traits;

pub use errors::{StoreError, StoreResult};
pub use memory::InMemoryStore;
pub use traits::DocumentStore;
