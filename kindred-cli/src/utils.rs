use crate::args::RelatedArgs;
use kindred::KindredError;
use kindred::models::Document;
use kindred::related::{CriterionValue, IncludePath, RelatedOptions};
use kindred::store::{DocumentStore, InMemoryStore};
use std::sync::Arc;

/// Parse a `FIELD=VALUE` criterion
///
/// `true` and `false` become flags, `null` or an empty value unsets the field,
/// and a comma-separated value becomes a list of targets.
pub fn parse_criterion(input: &str) -> kindred::Result<(String, CriterionValue)> {
    let (field, value) = input.split_once('=').ok_or_else(|| {
        KindredError::Other(format!(
            "Invalid criterion '{}': expected FIELD=VALUE",
            input
        ))
    })?;

    let field = field.trim();
    if field.is_empty() {
        return Err(KindredError::Other(format!(
            "Invalid criterion '{}': field name cannot be empty",
            input
        )));
    }

    let value = value.trim();
    let criterion = match value {
        "true" => CriterionValue::Flag(true),
        "false" => CriterionValue::Flag(false),
        "" | "null" => CriterionValue::Unset,
        _ if value.contains(',') => CriterionValue::Values(
            value
                .split(',')
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
                .collect(),
        ),
        _ => CriterionValue::Value(value.to_string()),
    };

    Ok((field.to_string(), criterion))
}

/// Apply command-line overrides on top of the configured options
pub fn build_related_options(
    base: &RelatedOptions,
    args: &RelatedArgs,
) -> kindred::Result<RelatedOptions> {
    let mut options = base.clone();

    if args.only_criteria {
        options.match_criteria.clear();
    }
    for raw in &args.criteria {
        let (field, value) = parse_criterion(raw)?;
        options.match_criteria.insert(field, value);
    }

    if let Some(include_path) = args.include_path {
        options.include_path = include_path;
    }
    if args.strict_path {
        options.strict_path = true;
        if options.include_path == IncludePath::Off {
            options.include_path = IncludePath::On;
        }
    }
    if let Some(min_score) = args.min_score {
        options.min_score = min_score;
    }
    if let Some(max_results) = args.max_results {
        options.max_results = max_results;
    }
    if let Some(multiplier) = args.multiplier {
        options.score_multiplier = multiplier;
    }

    options.validate().map_err(KindredError::Configuration)?;
    Ok(options)
}

/// Find a document by exact path, falling back to a unique file name
///
/// Without a path, the store's current document is used.
pub fn resolve_document(
    store: &InMemoryStore,
    path: Option<&str>,
) -> kindred::Result<Arc<Document>> {
    let Some(path) = path else {
        return store.current_document().ok_or(KindredError::NoCurrentDocument);
    };

    if let Some(document) = store.get(path) {
        return Ok(document);
    }

    let matches: Vec<Arc<Document>> = store
        .all_documents()
        .into_iter()
        .filter(|d| d.name() == path || d.path.ends_with(&format!("/{}", path)))
        .collect();

    match matches.len() {
        0 => Err(KindredError::Other(format!(
            "No document found at '{}'",
            path
        ))),
        1 => Ok(Arc::clone(&matches[0])),
        _ => {
            let suggestions: Vec<String> = matches
                .iter()
                .take(5)
                .map(|d| format!("  - {}", d.path))
                .collect();
            Err(KindredError::Other(format!(
                "Ambiguous document '{}': {} matches found.\nSuggestions:\n{}",
                path,
                matches.len(),
                suggestions.join("\n")
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_criterion_forms() {
        assert_eq!(
            parse_criterion("subject=true").unwrap(),
            ("subject".to_string(), CriterionValue::Flag(true))
        );
        assert_eq!(
            parse_criterion("type=false").unwrap().1,
            CriterionValue::Flag(false)
        );
        assert_eq!(
            parse_criterion(" domain = work ").unwrap(),
            ("domain".to_string(), CriterionValue::Value("work".to_string()))
        );
        assert_eq!(
            parse_criterion("tags=a, b,,c").unwrap().1,
            CriterionValue::Values(vec!["a".to_string(), "b".to_string(), "c".to_string()])
        );
        assert_eq!(parse_criterion("status=").unwrap().1, CriterionValue::Unset);

        assert!(parse_criterion("subject").is_err());
        assert!(parse_criterion("=true").is_err());
    }

    #[test]
    fn test_build_related_options_overrides() {
        let args = RelatedArgs {
            criteria: vec!["status=active".to_string(), "type=false".to_string()],
            min_score: Some(0.25),
            max_results: Some(3),
            ..Default::default()
        };
        let options = build_related_options(&RelatedOptions::default(), &args).unwrap();

        assert_eq!(options.min_score, 0.25);
        assert_eq!(options.max_results, 3);
        assert_eq!(
            options.match_criteria.get("status"),
            Some(&CriterionValue::Value("active".to_string()))
        );
        assert_eq!(
            options.match_criteria.get("type"),
            Some(&CriterionValue::Flag(false))
        );
        assert!(options.match_criteria.contains_key("subject"));

        let only = RelatedArgs {
            criteria: vec!["status=active".to_string()],
            only_criteria: true,
            ..Default::default()
        };
        let options = build_related_options(&RelatedOptions::default(), &only).unwrap();
        assert_eq!(options.match_criteria.len(), 1);

        let invalid = RelatedArgs {
            min_score: Some(1.5),
            ..Default::default()
        };
        assert!(matches!(
            build_related_options(&RelatedOptions::default(), &invalid),
            Err(KindredError::Configuration(_))
        ));
    }

    #[test]
    fn test_strict_path_enables_path_scoring() {
        let args = RelatedArgs {
            strict_path: true,
            ..Default::default()
        };
        let options = build_related_options(&RelatedOptions::metadata_only(), &args).unwrap();
        assert!(options.include_path.is_enabled());
        assert!(options.effective_strict_path());
    }

    #[test]
    fn test_resolve_document_by_name() {
        let mut store = InMemoryStore::from_documents(vec![
            Document::new("Projects/a/overview.md"),
            Document::new("Projects/b/overview.md"),
            Document::new("Projects/b/roadmap.md"),
        ])
        .unwrap();

        assert_eq!(
            resolve_document(&store, Some("roadmap.md")).unwrap().path,
            "Projects/b/roadmap.md"
        );
        assert_eq!(
            resolve_document(&store, Some("b/overview.md")).unwrap().path,
            "Projects/b/overview.md"
        );
        assert!(resolve_document(&store, Some("overview.md")).is_err());
        assert!(resolve_document(&store, Some("missing.md")).is_err());
        assert!(matches!(
            resolve_document(&store, None),
            Err(KindredError::NoCurrentDocument)
        ));

        store.set_current("Projects/a/overview.md").unwrap();
        assert_eq!(
            resolve_document(&store, None).unwrap().path,
            "Projects/a/overview.md"
        );
    }
}
