//! The relevance scorer
//!
//! Scoring runs in five steps: resolve criteria against the reference, award
//! path proximity points, award field match points, normalize into a
//! confidence percentage, then filter, rank and truncate.

use std::collections::BTreeMap;
use std::sync::Arc;

use super::criteria::ResolvedCriteria;
use super::observer::{ScoreObserver, TracingObserver};
use super::options::RelatedOptions;
use super::path::{MAX_PATH_POINTS, PathRelation, ReferenceFolder};
use super::result::{RelatedResult, ScoreAccumulator};
use crate::config::ConfigError;
use crate::models::Document;
use crate::store::DocumentStore;

struct Candidate {
    document: Arc<Document>,
    scores: ScoreAccumulator,
}

/// Ranks documents by similarity to a reference document
///
/// A scorer holds validated [`RelatedOptions`] and is a pure function of the
/// reference and the store contents: calling [`RelevanceScorer::compute_related`]
/// twice over an unchanged store returns the same ordered list.
#[derive(Debug, Clone)]
pub struct RelevanceScorer {
    options: RelatedOptions,
    observer: Arc<dyn ScoreObserver>,
}

impl RelevanceScorer {
    /// Create a scorer, rejecting invalid options
    pub fn new(options: RelatedOptions) -> Result<Self, ConfigError> {
        options.validate().map_err(ConfigError::ValidationError)?;

        if options.strict_path && !options.include_path.is_enabled() {
            tracing::warn!(
                "strict_path is set while include_path is false; every candidate will be dropped"
            );
        }

        Ok(Self {
            options,
            observer: Arc::new(TracingObserver),
        })
    }

    /// Replace the checkpoint observer
    pub fn with_observer(mut self, observer: Arc<dyn ScoreObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn options(&self) -> &RelatedOptions {
        &self.options
    }

    /// Highest score any candidate can reach under these criteria
    ///
    /// This depends only on the configuration and the resolved targets, never
    /// on an individual candidate.
    pub fn max_possible_score(&self, criteria: &ResolvedCriteria) -> f64 {
        let path = if self.options.include_path.is_enabled() {
            MAX_PATH_POINTS
        } else {
            0.0
        };
        path + criteria
            .iter()
            .map(|c| c.targets.len() as f64 * self.options.score_multiplier)
            .sum::<f64>()
    }

    /// Documents related to `reference`, best first
    ///
    /// Missing fields, an empty store or empty criteria yield fewer (or no)
    /// results, never an error. The reference itself is never returned.
    pub fn compute_related<S>(&self, reference: &Document, store: &S) -> Vec<RelatedResult>
    where
        S: DocumentStore + ?Sized,
    {
        let _span = tracing::debug_span!("compute_related", reference = %reference.path).entered();

        let criteria = ResolvedCriteria::resolve(&self.options.match_criteria, reference, store);
        self.observer.on_criteria_resolved(&criteria, &self.options);

        let mut candidates: BTreeMap<String, Candidate> = BTreeMap::new();

        if self.options.include_path.is_enabled() {
            self.score_paths(reference, store, &mut candidates);
        }

        self.score_fields(reference, store, &criteria, &mut candidates);

        let max_possible = self.max_possible_score(&criteria);
        let results = self.rank(candidates, max_possible);

        self.observer.on_ranked(&results);
        results
    }

    fn score_paths<S>(
        &self,
        reference: &Document,
        store: &S,
        candidates: &mut BTreeMap<String, Candidate>,
    ) where
        S: DocumentStore + ?Sized,
    {
        let folder = ReferenceFolder::of(reference);
        let (mut exact_folder, mut subfolder) = (0usize, 0usize);

        for document in store.all_documents() {
            let relation = folder.relation(&document);
            match relation {
                PathRelation::ExactFolder => exact_folder += 1,
                PathRelation::Subfolder => subfolder += 1,
                PathRelation::Unrelated => continue,
            }

            candidate_entry(candidates, document)
                .scores
                .add_path(relation.points());
        }

        self.observer.on_path_scored(exact_folder, subfolder);
    }

    fn score_fields<S>(
        &self,
        reference: &Document,
        store: &S,
        criteria: &ResolvedCriteria,
        candidates: &mut BTreeMap<String, Candidate>,
    ) where
        S: DocumentStore + ?Sized,
    {
        for criterion in criteria.iter() {
            let mut matched = 0usize;

            for document in store.documents_by_field(&criterion.field, &criterion.targets) {
                if document.path == reference.path {
                    continue;
                }

                let match_count = match store.field_value(&document, &criterion.field) {
                    Some(value) => criterion
                        .targets
                        .iter()
                        .filter(|target| value.contains(target))
                        .count(),
                    None => 0,
                };
                if match_count == 0 {
                    continue;
                }

                matched += 1;
                let points = match_count as f64 * self.options.score_multiplier;
                candidate_entry(candidates, document)
                    .scores
                    .add_field(&criterion.field, points);
            }

            self.observer
                .on_field_scored(&criterion.field, &criterion.targets, matched);
        }
    }

    fn rank(
        &self,
        candidates: BTreeMap<String, Candidate>,
        max_possible: f64,
    ) -> Vec<RelatedResult> {
        let strict_path = self.options.effective_strict_path();
        let threshold = self.options.min_score * 100.0;

        let mut results: Vec<RelatedResult> = candidates
            .into_values()
            .map(|candidate| {
                let confidence = candidate.scores.confidence(max_possible);
                let score = candidate.scores.total();
                let path_score = candidate.scores.path_score();
                RelatedResult {
                    document: candidate.document,
                    confidence,
                    in_same_path: path_score > 0.0,
                    score,
                    path_score,
                    field_scores: candidate.scores.into_field_scores(),
                }
            })
            .filter(|result| !strict_path || result.in_same_path)
            .collect();

        // Candidates arrive in path order; the stable sort keeps that as the tie-break.
        results.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));

        results.retain(|result| result.confidence >= threshold);
        results.truncate(self.options.max_results);
        results
    }
}

fn candidate_entry(
    candidates: &mut BTreeMap<String, Candidate>,
    document: Arc<Document>,
) -> &mut Candidate {
    candidates
        .entry(document.path.clone())
        .or_insert_with(|| Candidate {
            document,
            scores: ScoreAccumulator::new(),
        })
}
