//! Related-page scoring
//!
//! This module ranks the documents of a [`DocumentStore`](crate::store::DocumentStore)
//! by how closely they relate to a reference document.
//!
//! # Overview
//!
//! Two signals contribute points to each candidate:
//! - Path proximity: 2 points for a document in the reference's folder,
//!   1 point for a document anywhere below it
//! - Field matches: for every configured metadata field, each target value the
//!   candidate shares earns `score_multiplier` points
//!
//! The sum is normalized against the highest score the configuration allows to
//! give a confidence percentage, which is then filtered and ranked.
//!
//! # Example
//!
//! ```no_run
//! use kindred::models::Document;
//! use kindred::related::{RelatedOptions, RelevanceScorer};
//! use kindred::store::InMemoryStore;
//!
//! let reference = Document::builder("Projects/kindred/overview.md")
//!     .field("type", "hub")
//!     .field("subject", "PKM")
//!     .build();
//! let store = InMemoryStore::from_documents(vec![reference.clone()]).unwrap();
//!
//! let scorer = RelevanceScorer::new(RelatedOptions::default()).unwrap();
//! for result in scorer.compute_related(&reference, &store) {
//!     println!("{} {:.0}%", result.path(), result.confidence);
//! }
//! ```

pub mod criteria;
pub mod observer;
pub mod options;
pub mod path;
pub mod result;
pub mod scorer;

pub use criteria::{
    CriterionMode, CriterionValue, MatchCriterion, ResolvedCriteria, ResolvedCriterion,
};
pub use observer::{
    NoopObserver, RankedEntry, ScoreObserver, TraceEvent, TraceRecorder, TracingObserver,
};
pub use options::{IncludePath, RelatedOptions};
pub use path::PathRelation;
pub use result::{RelatedResult, ScoreAccumulator};
pub use scorer::RelevanceScorer;
