//! Integration tests for related-page scoring
//!
//! These tests run the scorer end to end over in-memory vaults and check the
//! ranking guarantees callers rely on: confidence bounds, ordering, limits,
//! strict path filtering and the path depth rule.

use kindred::prelude::*;
use kindred::related::TraceEvent;
use std::collections::BTreeMap;
use std::sync::Arc;

fn approx(actual: f64, expected: f64) -> bool {
    (actual - expected).abs() < 1e-9
}

fn confidence_of(results: &[RelatedResult], path: &str) -> Option<f64> {
    results.iter().find(|r| r.path() == path).map(|r| r.confidence)
}

/// A small vault around `A/B/ref.md`
fn create_vault() -> InMemoryStore {
    let mut store = InMemoryStore::from_documents(vec![
        Document::builder("A/B/ref.md")
            .field("type", "hub")
            .field("subject", "PKM")
            .build(),
        Document::builder("A/B/other.md").field("type", "hub").build(),
        Document::builder("A/B/C/other.md")
            .field("subject", "PKM")
            .build(),
        Document::builder("A/other.md")
            .field("type", "hub")
            .field("subject", "PKM")
            .build(),
        Document::builder("Z/far.md").field("domain", "work").build(),
    ])
    .expect("Should build vault");
    store.set_current("A/B/ref.md").expect("Reference exists");
    store
}

fn reference(store: &InMemoryStore) -> Arc<Document> {
    store.current_document().expect("Vault has a current document")
}

#[test]
fn test_default_options_rank_vault() {
    let store = create_vault();
    let scorer = RelevanceScorer::new(RelatedOptions::default()).unwrap();

    let results = scorer.compute_related(&reference(&store), &store);

    // Max score is 2 (path) + 1.5 (type) + 1.5 (subject); domain is absent on the reference.
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].path(), "A/B/other.md");
    assert!(approx(results[0].confidence, 70.0));
    assert!(results[0].in_same_path);
    assert!(approx(results[0].score, 3.5));
}

#[test]
fn test_ranking_without_threshold() {
    let store = create_vault();
    let options = RelatedOptions {
        min_score: 0.0,
        ..Default::default()
    };
    let scorer = RelevanceScorer::new(options).unwrap();

    let results = scorer.compute_related(&reference(&store), &store);
    let paths: Vec<&str> = results.iter().map(|r| r.path()).collect();

    assert_eq!(paths, vec!["A/B/other.md", "A/other.md", "A/B/C/other.md"]);
    assert!(approx(results[1].confidence, 60.0));
    assert!(approx(results[2].confidence, 50.0));
    assert!(!results[1].in_same_path);
    assert!(results[2].in_same_path);
}

#[test]
fn test_reference_is_never_returned() {
    let store = create_vault();
    let options = RelatedOptions {
        min_score: 0.0,
        ..Default::default()
    };
    let results = RelevanceScorer::new(options)
        .unwrap()
        .compute_related(&reference(&store), &store);

    assert!(results.iter().all(|r| r.path() != "A/B/ref.md"));
}

#[test]
fn test_path_depth_rule() {
    let store = create_vault();
    let options = RelatedOptions {
        match_criteria: BTreeMap::new(),
        min_score: 0.0,
        ..Default::default()
    };
    let results = RelevanceScorer::new(options)
        .unwrap()
        .compute_related(&reference(&store), &store);

    // Exact folder earns 2 of 2 points, any deeper folder 1 of 2, a parent folder nothing.
    assert!(approx(confidence_of(&results, "A/B/other.md").unwrap(), 100.0));
    assert!(approx(confidence_of(&results, "A/B/C/other.md").unwrap(), 50.0));
    assert_eq!(confidence_of(&results, "A/other.md"), None);
    assert_eq!(results.len(), 2);
}

#[test]
fn test_strict_path_keeps_only_same_path() {
    let store = create_vault();
    let options = RelatedOptions {
        strict_path: true,
        min_score: 0.0,
        ..Default::default()
    };
    let results = RelevanceScorer::new(options)
        .unwrap()
        .compute_related(&reference(&store), &store);

    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| r.in_same_path));

    let options = RelatedOptions {
        include_path: IncludePath::Strict,
        min_score: 0.0,
        ..Default::default()
    };
    let strict_mode = RelevanceScorer::new(options)
        .unwrap()
        .compute_related(&reference(&store), &store);
    assert_eq!(strict_mode, results);
}

#[test]
fn test_result_invariants() {
    let store = create_vault();

    for max_results in [1, 2, 10] {
        let options = RelatedOptions {
            min_score: 0.0,
            max_results,
            ..Default::default()
        };
        let results = RelevanceScorer::new(options)
            .unwrap()
            .compute_related(&reference(&store), &store);

        assert!(results.len() <= max_results);
        assert!(
            results
                .iter()
                .all(|r| (0.0..=100.0).contains(&r.confidence))
        );
        assert!(
            results
                .windows(2)
                .all(|pair| pair[0].confidence >= pair[1].confidence)
        );
    }
}

#[test]
fn test_scoring_is_idempotent() {
    let store = create_vault();
    let scorer = RelevanceScorer::new(RelatedOptions {
        min_score: 0.0,
        ..Default::default()
    })
    .unwrap();
    let reference = reference(&store);

    let first = scorer.compute_related(&reference, &store);
    let second = scorer.compute_related(&reference, &store);
    assert_eq!(first, second);
}

#[test]
fn test_type_and_subject_scenario() {
    let reference = Document::builder("R.md")
        .field("type", "hub")
        .field("subject", "PKM")
        .build();
    let store = InMemoryStore::from_documents(vec![
        reference.clone(),
        Document::builder("x/X.md")
            .field("type", "hub")
            .field("subject", "PKM")
            .build(),
        Document::builder("y/Y.md").field("type", "hub").build(),
    ])
    .unwrap();

    let options = RelatedOptions {
        match_criteria: BTreeMap::new(),
        include_path: IncludePath::Off,
        min_score: 0.0,
        score_multiplier: 1.5,
        ..Default::default()
    }
    .with_criterion("type", CriterionValue::Flag(true))
    .with_criterion("subject", CriterionValue::Flag(true));

    let results = RelevanceScorer::new(options)
        .unwrap()
        .compute_related(&reference, &store);

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].path(), "x/X.md");
    assert!(approx(results[0].confidence, 100.0));
    assert!(approx(results[0].score, 3.0));
    assert_eq!(results[1].path(), "y/Y.md");
    assert!(approx(results[1].confidence, 50.0));
}

#[test]
fn test_multi_value_target_ceiling() {
    let reference = Document::new("ref.md");
    let store = InMemoryStore::from_documents(vec![
        reference.clone(),
        Document::builder("notes/a.md").field("subject", "A").build(),
        Document::builder("notes/ab.md")
            .list("subject", vec!["A", "B"])
            .build(),
    ])
    .unwrap();

    let options = RelatedOptions {
        match_criteria: BTreeMap::new(),
        include_path: IncludePath::Off,
        min_score: 0.0,
        ..Default::default()
    }
    .with_criterion("subject", CriterionValue::from(vec!["A", "B"]));

    let results = RelevanceScorer::new(options)
        .unwrap()
        .compute_related(&reference, &store);

    assert!(approx(confidence_of(&results, "notes/a.md").unwrap(), 50.0));
    assert!(approx(confidence_of(&results, "notes/ab.md").unwrap(), 100.0));
}

#[test]
fn test_empty_inputs_yield_no_results() {
    let reference = Document::builder("A/ref.md").field("type", "hub").build();

    let empty = InMemoryStore::new();
    let results = RelevanceScorer::new(RelatedOptions::default())
        .unwrap()
        .compute_related(&reference, &empty);
    assert!(results.is_empty());

    let store = InMemoryStore::from_documents(vec![
        reference.clone(),
        Document::builder("A/sibling.md").field("type", "hub").build(),
    ])
    .unwrap();
    let options = RelatedOptions {
        match_criteria: BTreeMap::new(),
        include_path: IncludePath::Off,
        min_score: 0.0,
        ..Default::default()
    };
    let results = RelevanceScorer::new(options)
        .unwrap()
        .compute_related(&reference, &store);
    assert!(results.is_empty());
}

#[test]
fn test_find_related_uses_current_document() {
    let store = InMemoryStore::from_json_str(
        r#"{
            "current": "Projects/kindred/overview.md",
            "documents": [
                {"path": "Projects/kindred/overview.md", "fields": {"type": "hub", "subject": "PKM"}},
                {"path": "Projects/kindred/roadmap.md", "fields": {"type": "hub", "subject": ["PKM", "Rust"]}},
                {"path": "Journal/2024-01-01.md", "fields": {"type": "daily"}}
            ]
        }"#,
    )
    .unwrap();

    let results = find_related(&store, RelatedOptions::default()).unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].path(), "Projects/kindred/roadmap.md");
    assert!(approx(results[0].confidence, 100.0));
}

#[test]
fn test_find_related_errors() {
    let store = create_vault();
    let options = RelatedOptions {
        score_multiplier: -1.0,
        ..Default::default()
    };
    assert!(matches!(
        find_related(&store, options),
        Err(KindredError::Configuration(_))
    ));

    let no_current = InMemoryStore::from_documents(vec![Document::new("a.md")]).unwrap();
    assert!(matches!(
        find_related(&no_current, RelatedOptions::default()),
        Err(KindredError::NoCurrentDocument)
    ));
}

#[test]
fn test_trace_recorder_captures_checkpoints() {
    let store = create_vault();
    let recorder = Arc::new(TraceRecorder::new());
    let scorer = RelevanceScorer::new(RelatedOptions::default())
        .unwrap()
        .with_observer(recorder.clone());

    let results = scorer.compute_related(&reference(&store), &store);
    let events = recorder.take();

    match &events[0] {
        TraceEvent::CriteriaResolved { unresolved, .. } => {
            assert_eq!(unresolved, &vec!["domain".to_string()]);
        }
        other => panic!("Unexpected first event: {:?}", other),
    }
    match events.last() {
        Some(TraceEvent::Ranked { results: ranked }) => {
            assert_eq!(ranked.len(), results.len());
            assert_eq!(ranked[0].path, "A/B/other.md");
        }
        other => panic!("Unexpected last event: {:?}", other),
    }

    let json = serde_json::to_value(&events).expect("Trace should serialize");
    assert_eq!(json[0]["event"], "criteria_resolved");
    assert!(recorder.events().is_empty());
}
