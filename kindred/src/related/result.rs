//! Per-candidate score accumulation and the ranked output record

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::models::Document;

/// Points collected by one candidate during a single scoring call
///
/// Path points are kept apart from field points so that a metadata field
/// literally named `path` cannot be mistaken for path proximity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreAccumulator {
    path: f64,
    fields: BTreeMap<String, f64>,
}

impl ScoreAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_path(&mut self, points: f64) {
        self.path += points;
    }

    /// Add points under the score source `field`
    pub fn add_field(&mut self, field: &str, points: f64) {
        *self.fields.entry(field.to_string()).or_insert(0.0) += points;
    }

    pub fn path_score(&self) -> f64 {
        self.path
    }

    pub fn field_scores(&self) -> &BTreeMap<String, f64> {
        &self.fields
    }

    /// Path points plus every field source
    pub fn total(&self) -> f64 {
        self.path + self.fields.values().sum::<f64>()
    }

    /// Normalize against the highest score the configuration allows
    ///
    /// Returns 0.0 when `max_possible` is not positive.
    pub fn confidence(&self, max_possible: f64) -> f64 {
        if max_possible > 0.0 {
            self.total() / max_possible * 100.0
        } else {
            0.0
        }
    }

    pub fn into_field_scores(self) -> BTreeMap<String, f64> {
        self.fields
    }
}

/// A document related to the reference, with its confidence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelatedResult {
    /// The matched document, shared with the store
    pub document: Arc<Document>,

    /// Confidence percentage (0.0 - 100.0)
    pub confidence: f64,

    /// Whether the document received path proximity points
    pub in_same_path: bool,

    /// Raw points before normalization
    pub score: f64,

    /// Path proximity points
    pub path_score: f64,

    /// Points per matched field
    pub field_scores: BTreeMap<String, f64>,
}

impl RelatedResult {
    pub fn path(&self) -> &str {
        &self.document.path
    }
}
