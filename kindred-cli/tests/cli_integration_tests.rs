//! Integration tests for the kindred CLI
//!
//! These tests drive the CLI library end to end:
//! - Loading store snapshots and configuration files from disk
//! - Related-document JSON output, with and without explanations
//! - Command-line criterion overrides
//! - Error handling for missing stores and documents

use kindred::KindredError;
use kindred::config::KindredConfig;
use kindred::store::InMemoryStore;
use kindred_cli::args::RelatedArgs;
use kindred_cli::context::KindredCliContext;
use kindred_cli::handlers::compute_related_json;
use kindred_cli::{error_to_json, resolve_document};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const VAULT: &str = r#"{
    "current": "Projects/kindred/overview.md",
    "documents": [
        {"path": "Projects/kindred/overview.md", "fields": {"type": "hub", "subject": "PKM", "status": "active"}},
        {"path": "Projects/kindred/roadmap.md", "fields": {"type": "hub", "subject": ["PKM", "Rust"]}},
        {"path": "Projects/kindred/design/scoring.md", "fields": {"type": "note", "status": "active"}},
        {"path": "Areas/reading.md", "fields": {"type": "hub", "subject": "PKM"}},
        {"path": "Journal/2024-01-01.md", "fields": {"type": "daily", "rating": 4}}
    ]
}"#;

/// Helper to write the test vault into an isolated directory
fn create_test_vault() -> (PathBuf, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let store_path = temp_dir.path().join("vault.json");
    fs::write(&store_path, VAULT).expect("Failed to write vault");
    (store_path, temp_dir)
}

fn result_paths(output: &serde_json::Value) -> Vec<String> {
    output["results"]
        .as_array()
        .expect("results should be an array")
        .iter()
        .map(|r| r["path"].as_str().unwrap_or_default().to_string())
        .collect()
}

#[test]
fn test_related_uses_current_document() {
    let (store_path, _temp_dir) = create_test_vault();
    let ctx = KindredCliContext::new(Some(store_path), None).expect("Context should load");

    let output = compute_related_json(&RelatedArgs::default(), &ctx).unwrap();

    assert_eq!(output["reference"], "Projects/kindred/overview.md");
    assert_eq!(result_paths(&output), vec!["Projects/kindred/roadmap.md"]);
    assert_eq!(output["results"][0]["confidence"], 100.0);
    assert_eq!(output["results"][0]["in_same_path"], true);
    assert!(output.get("trace").is_none());
}

#[test]
fn test_related_with_overrides() {
    let (store_path, _temp_dir) = create_test_vault();
    let ctx = KindredCliContext::new(Some(store_path), None).unwrap();

    let args = RelatedArgs {
        min_score: Some(0.0),
        max_results: Some(10),
        ..Default::default()
    };
    let output = compute_related_json(&args, &ctx).unwrap();
    let paths = result_paths(&output);

    assert_eq!(paths.len(), 3);
    assert_eq!(paths[0], "Projects/kindred/roadmap.md");
    assert!(paths.contains(&"Areas/reading.md".to_string()));
    assert!(!paths.contains(&"Journal/2024-01-01.md".to_string()));

    let confidences: Vec<f64> = output["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["confidence"].as_f64().unwrap())
        .collect();
    assert!(confidences.windows(2).all(|pair| pair[0] >= pair[1]));
}

#[test]
fn test_related_with_explicit_criteria() {
    let (store_path, _temp_dir) = create_test_vault();
    let ctx = KindredCliContext::new(Some(store_path), None).unwrap();

    let args = RelatedArgs {
        path: Some("roadmap.md".to_string()),
        criteria: vec!["status=active".to_string()],
        only_criteria: true,
        include_path: Some(kindred::related::IncludePath::Off),
        min_score: Some(0.0),
        explain: true,
        ..Default::default()
    };
    let output = compute_related_json(&args, &ctx).unwrap();

    assert_eq!(output["reference"], "Projects/kindred/roadmap.md");
    assert_eq!(
        result_paths(&output),
        vec![
            "Projects/kindred/design/scoring.md",
            "Projects/kindred/overview.md"
        ]
    );

    let trace = output["trace"].as_array().expect("explain adds a trace");
    assert_eq!(trace[0]["event"], "criteria_resolved");
    assert_eq!(trace.last().unwrap()["event"], "ranked");
}

#[test]
fn test_config_file_overrides_defaults() {
    let (store_path, temp_dir) = create_test_vault();
    let config_path = temp_dir.path().join("kindred.toml");
    fs::write(
        &config_path,
        r#"
[related]
include_path = "strict"
min_score = 0.0

[related.match_criteria]
type = true
"#,
    )
    .unwrap();

    let ctx = KindredCliContext::new(Some(store_path), Some(config_path.as_path())).unwrap();
    assert_eq!(ctx.config.related.match_criteria.len(), 1);
    assert!(ctx.config.related.effective_strict_path());

    let output = compute_related_json(&RelatedArgs::default(), &ctx).unwrap();
    let paths = result_paths(&output);

    // Strict path mode drops every document outside Projects/kindred
    assert_eq!(paths.len(), 2);
    assert!(paths.iter().all(|p| p.starts_with("Projects/kindred/")));
}

#[test]
fn test_missing_store_is_reported() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("missing.json");

    let err = KindredCliContext::new(Some(missing), None)
        .err()
        .expect("Missing store should fail");
    assert!(matches!(err, KindredError::Store(_)));
    assert_eq!(error_to_json(&err)["code"], "STORE_ERROR");
}

#[test]
fn test_store_required_for_related() {
    let ctx = KindredCliContext::with_store(KindredConfig::default(), InMemoryStore::new());
    let args = RelatedArgs::default();

    let err = compute_related_json(&args, &ctx).unwrap_err();
    assert!(matches!(err, KindredError::NoCurrentDocument));
}

#[test]
fn test_unknown_document_is_reported() {
    let (store_path, _temp_dir) = create_test_vault();
    let ctx = KindredCliContext::new(Some(store_path), None).unwrap();
    let store = ctx.store().unwrap();

    assert!(resolve_document(store, Some("nowhere.md")).is_err());
    let document = resolve_document(store, Some("2024-01-01.md")).unwrap();
    assert_eq!(document.path, "Journal/2024-01-01.md");
    assert_eq!(
        document.field("rating").map(|v| v.to_string()),
        Some("4".to_string())
    );
}
