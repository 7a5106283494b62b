//! # Kindred
//!
//! Related-page scoring for collections of path-addressed notes that carry
//! key/value metadata, such as a Markdown vault with front matter.
//!
//! Given a reference document, kindred ranks every other document by how
//! closely it relates to the reference: documents that share folder
//! placement or metadata values (a `subject`, a `type`, a `domain`) score
//! higher. Scores are normalized into a confidence percentage, filtered by a
//! minimum threshold and truncated to a result limit.
//!
//! ## Quick Start
//!
//! ```rust
//! use kindred::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let mut store = InMemoryStore::new();
//!     store.insert(
//!         Document::builder("Projects/kindred/overview.md")
//!             .field("type", "hub")
//!             .field("subject", "PKM")
//!             .build(),
//!     )?;
//!     store.insert(
//!         Document::builder("Projects/kindred/notes.md")
//!             .field("type", "hub")
//!             .build(),
//!     )?;
//!     store.set_current("Projects/kindred/overview.md")?;
//!
//!     for related in find_related(&store, RelatedOptions::default())? {
//!         println!("{} ({:.0}%)", related.path(), related.confidence);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - **models**: documents and their metadata values
//! - **store**: the read-only document store contract and an in-memory store
//! - **related**: criteria resolution, path proximity, scoring and ranking
//! - **config** / **logging**: layered configuration and `tracing` setup

pub mod config;
pub mod logging;
pub mod models;
pub mod related;
pub mod store;

/// The prelude re-exports commonly used types for convenience
pub mod prelude {
    pub use crate::config::{ConfigBuilder, ConfigLoader, KindredConfig, LogLevel, LoggingConfig};
    pub use crate::models::{Document, DocumentBuilder, FieldValue};
    pub use crate::related::{
        CriterionValue, IncludePath, RelatedOptions, RelatedResult, RelevanceScorer,
        ScoreObserver, TraceRecorder,
    };
    pub use crate::store::{DocumentStore, InMemoryStore, StoreError};
    pub use crate::{KindredError, Result, find_related};
}

use related::{RelatedOptions, RelatedResult, RelevanceScorer};
use store::DocumentStore;

/// Current library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Error type for kindred operations
#[derive(Debug, thiserror::Error)]
pub enum KindredError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Error reading from the document store
    #[error("Store error: {0}")]
    Store(String),

    /// Logging error
    #[error("Logging error: {0}")]
    Logging(#[from] crate::logging::LogError),

    /// The store has no current document to use as the reference
    #[error(
        "No current document. Select one with InMemoryStore::set_current or pass a reference to RelevanceScorer::compute_related"
    )]
    NoCurrentDocument,

    /// Other unclassified errors
    #[error("{0}")]
    Other(String),
}

impl From<crate::config::ConfigError> for KindredError {
    fn from(err: crate::config::ConfigError) -> Self {
        KindredError::Configuration(err.to_string())
    }
}

impl From<crate::store::StoreError> for KindredError {
    fn from(err: crate::store::StoreError) -> Self {
        KindredError::Store(err.to_string())
    }
}

/// Result type for kindred operations
pub type Result<T> = std::result::Result<T, KindredError>;

/// Find documents related to the store's current document
///
/// # Errors
/// Returns [`KindredError::Configuration`] when `options` are invalid and
/// [`KindredError::NoCurrentDocument`] when the store has no current document.
pub fn find_related<S>(store: &S, options: RelatedOptions) -> Result<Vec<RelatedResult>>
where
    S: DocumentStore + ?Sized,
{
    let scorer = RelevanceScorer::new(options)?;
    let reference = store
        .current_document()
        .ok_or(KindredError::NoCurrentDocument)?;

    Ok(scorer.compute_related(&reference, store))
}

/// Initialize logging from a loaded configuration
///
/// Ignored when a global subscriber is already installed.
pub fn init_logging(config: &config::KindredConfig) -> Result<()> {
    logging::init(&config.logging)?;
    Ok(())
}
