//! Related-pages command handler

use crate::args::RelatedArgs;
use crate::context::KindredCliContext;
use crate::output::*;
use crate::utils::{build_related_options, resolve_document};
use kindred::related::{RelevanceScorer, TraceRecorder};
use std::sync::Arc;

/// Run the scorer for `args` and render the results
pub fn handle_related_command(
    args: &RelatedArgs,
    ctx: &KindredCliContext,
    output_format: &str,
) -> kindred::Result<()> {
    if output_format == "json" {
        let output = compute_related_json(args, ctx)?;
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_else(|_| "{}".to_string())
        );
        return Ok(());
    }

    let run = run_related(args, ctx)?;
    print_related_list(&run.reference, &run.results);

    if args.explain {
        println!();
        print_score_breakdown(&run.results);
        print_trace(&run.trace);
    }

    Ok(())
}

/// Run the scorer and return the JSON rendering of its results
pub fn compute_related_json(
    args: &RelatedArgs,
    ctx: &KindredCliContext,
) -> kindred::Result<serde_json::Value> {
    let run = run_related(args, ctx)?;
    let trace = args.explain.then_some(run.trace.as_slice());
    Ok(related_to_json(&run.reference, &run.results, trace))
}

struct RelatedRun {
    reference: Arc<kindred::models::Document>,
    results: Vec<kindred::related::RelatedResult>,
    trace: Vec<kindred::related::TraceEvent>,
}

fn run_related(args: &RelatedArgs, ctx: &KindredCliContext) -> kindred::Result<RelatedRun> {
    let store = ctx.store()?;
    let options = build_related_options(&ctx.config.related, args)?;
    let reference = resolve_document(store, args.path.as_deref())?;

    let recorder = Arc::new(TraceRecorder::new());
    let mut scorer = RelevanceScorer::new(options)?;
    if args.explain {
        scorer = scorer.with_observer(recorder.clone());
    }

    let results = scorer.compute_related(&reference, store);
    tracing::debug!(
        reference = %reference.path,
        results = results.len(),
        "Computed related documents"
    );

    Ok(RelatedRun {
        reference,
        results,
        trace: recorder.take(),
    })
}
