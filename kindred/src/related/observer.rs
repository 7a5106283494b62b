//! Observers for scoring checkpoints
//!
//! A [`ScoreObserver`] is told what the scorer did at each stage: criteria
//! resolution, path scoring, each field match and the final ranking. Observers
//! are purely informational; they cannot change the outcome.
//!
//! # Examples
//!
//! ```no_run
//! use kindred::related::{ScoreObserver, RelatedResult};
//!
//! #[derive(Debug)]
//! struct CountingObserver;
//!
//! impl ScoreObserver for CountingObserver {
//!     fn on_ranked(&self, results: &[RelatedResult]) {
//!         println!("{} related documents", results.len());
//!     }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::sync::Mutex;

use super::criteria::{ResolvedCriteria, ResolvedCriterion};
use super::options::{IncludePath, RelatedOptions};
use super::result::RelatedResult;

/// Trait for scoring checkpoint observers
///
/// Every method has a default implementation that does nothing.
pub trait ScoreObserver: Send + Sync + std::fmt::Debug {
    /// Called once criteria have been resolved against the reference
    fn on_criteria_resolved(&self, criteria: &ResolvedCriteria, options: &RelatedOptions) {
        let _ = (criteria, options);
    }

    /// Called after path proximity points were assigned
    ///
    /// Not called when path scoring is disabled.
    fn on_path_scored(&self, exact_folder: usize, subfolder: usize) {
        let _ = (exact_folder, subfolder);
    }

    /// Called after one criterion was matched against the store
    fn on_field_scored(&self, field: &str, targets: &[String], matched: usize) {
        let _ = (field, targets, matched);
    }

    /// Called with the final, filtered and truncated ranking
    fn on_ranked(&self, results: &[RelatedResult]) {
        let _ = results;
    }

    /// A descriptive name for this observer
    fn name(&self) -> &str {
        "anonymous_observer"
    }
}

/// Observer that ignores every checkpoint
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl ScoreObserver for NoopObserver {
    fn name(&self) -> &str {
        "noop"
    }
}

/// Observer that emits `tracing` debug events at each checkpoint
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl ScoreObserver for TracingObserver {
    fn on_criteria_resolved(&self, criteria: &ResolvedCriteria, options: &RelatedOptions) {
        tracing::debug!(
            criteria = ?criteria.criteria,
            ignored = ?criteria.ignored,
            unresolved = ?criteria.unresolved,
            prefilter_fields = ?criteria.prefilter_fields,
            include_path = %options.include_path,
            strict_path = options.effective_strict_path(),
            min_score = options.min_score,
            max_results = options.max_results,
            score_multiplier = options.score_multiplier,
            "Resolved match criteria"
        );
    }

    fn on_path_scored(&self, exact_folder: usize, subfolder: usize) {
        tracing::debug!(exact_folder, subfolder, "Scored path proximity");
    }

    fn on_field_scored(&self, field: &str, targets: &[String], matched: usize) {
        tracing::debug!(field, ?targets, matched, "Scored field matches");
    }

    fn on_ranked(&self, results: &[RelatedResult]) {
        tracing::debug!(
            results = results.len(),
            top = results.first().map(|r| r.path()),
            "Ranked related documents"
        );
    }

    fn name(&self) -> &str {
        "tracing"
    }
}

/// A recorded checkpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TraceEvent {
    CriteriaResolved {
        criteria: Vec<ResolvedCriterion>,
        ignored: Vec<String>,
        unresolved: Vec<String>,
        prefilter_fields: Vec<String>,
        include_path: IncludePath,
        strict_path: bool,
        min_score: f64,
        max_results: usize,
        score_multiplier: f64,
    },
    PathScored {
        exact_folder: usize,
        subfolder: usize,
    },
    FieldScored {
        field: String,
        targets: Vec<String>,
        matched: usize,
    },
    Ranked {
        results: Vec<RankedEntry>,
    },
}

/// Condensed view of one ranked result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedEntry {
    pub path: String,
    pub confidence: f64,
    pub in_same_path: bool,
}

/// Observer that keeps every checkpoint for later inspection
#[derive(Debug, Default)]
pub struct TraceRecorder {
    events: Mutex<Vec<TraceEvent>>,
}

impl TraceRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&self, event: TraceEvent) {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(event);
    }

    /// Snapshot of the events recorded so far
    pub fn events(&self) -> Vec<TraceEvent> {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Remove and return every recorded event
    pub fn take(&self) -> Vec<TraceEvent> {
        std::mem::take(
            &mut *self
                .events
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner()),
        )
    }
}

impl ScoreObserver for TraceRecorder {
    fn on_criteria_resolved(&self, criteria: &ResolvedCriteria, options: &RelatedOptions) {
        self.record(TraceEvent::CriteriaResolved {
            criteria: criteria.criteria.clone(),
            ignored: criteria.ignored.clone(),
            unresolved: criteria.unresolved.clone(),
            prefilter_fields: criteria.prefilter_fields.clone(),
            include_path: options.include_path,
            strict_path: options.effective_strict_path(),
            min_score: options.min_score,
            max_results: options.max_results,
            score_multiplier: options.score_multiplier,
        });
    }

    fn on_path_scored(&self, exact_folder: usize, subfolder: usize) {
        self.record(TraceEvent::PathScored {
            exact_folder,
            subfolder,
        });
    }

    fn on_field_scored(&self, field: &str, targets: &[String], matched: usize) {
        self.record(TraceEvent::FieldScored {
            field: field.to_string(),
            targets: targets.to_vec(),
            matched,
        });
    }

    fn on_ranked(&self, results: &[RelatedResult]) {
        self.record(TraceEvent::Ranked {
            results: results
                .iter()
                .map(|r| RankedEntry {
                    path: r.path().to_string(),
                    confidence: r.confidence,
                    in_same_path: r.in_same_path,
                })
                .collect(),
        });
    }

    fn name(&self) -> &str {
        "recorder"
    }
}
