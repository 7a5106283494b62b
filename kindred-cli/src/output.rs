use colored::*;
use kindred::KindredError;
use kindred::config::KindredConfig;
use kindred::models::Document;
use kindred::related::{RelatedResult, TraceEvent};
use serde_json::json;

pub struct CliColors;

impl CliColors {
    pub fn success() -> Color {
        Color::TrueColor {
            r: 34,
            g: 197,
            b: 94,
        }
    }

    pub fn error() -> Color {
        Color::TrueColor {
            r: 239,
            g: 68,
            b: 68,
        }
    }

    pub fn warning() -> Color {
        Color::TrueColor {
            r: 245,
            g: 158,
            b: 11,
        }
    }

    pub fn info() -> Color {
        Color::TrueColor {
            r: 59,
            g: 130,
            b: 246,
        }
    }

    pub fn field() -> Color {
        Color::TrueColor {
            r: 168,
            g: 85,
            b: 247,
        }
    }

    pub fn muted() -> Color {
        Color::TrueColor {
            r: 148,
            g: 163,
            b: 184,
        }
    }

    pub fn primary() -> Color {
        Color::White
    }

    pub fn accent() -> Color {
        Color::TrueColor {
            r: 59,
            g: 130,
            b: 246,
        }
    }
}

/// Structured form of a KindredError
pub fn error_to_json(error: &KindredError) -> serde_json::Value {
    let (code, message, details) = match error {
        KindredError::Configuration(msg) => ("CONFIGURATION_ERROR", msg.clone(), None),
        KindredError::Store(msg) => ("STORE_ERROR", msg.clone(), None),
        KindredError::Logging(e) => ("LOGGING_ERROR", e.to_string(), None),
        KindredError::NoCurrentDocument => (
            "NO_CURRENT_DOCUMENT",
            error.to_string(),
            Some(json!({
                "hint": "Pass a document path to `related` or add \"current\" to the store snapshot"
            })),
        ),
        KindredError::Other(msg) => ("OTHER_ERROR", msg.clone(), None),
    };

    let mut error_response = json!({
        "error": true,
        "code": code,
        "message": message,
        "timestamp": chrono::Utc::now().to_rfc3339()
    });

    if let Some(details) = details {
        error_response["details"] = details;
    }

    error_response
}

/// Output a KindredError in structured JSON format
pub fn output_error_json(error: &KindredError, output_format: &str) {
    if output_format == "json" {
        eprintln!(
            "{}",
            serde_json::to_string_pretty(&error_to_json(error)).unwrap_or_else(|_| "{}".to_string())
        );
    } else {
        eprintln!("{}", format_error(&error.to_string()));
    }
}

pub fn format_error(msg: &str) -> String {
    format!(
        "{} {}",
        "✗".color(CliColors::error()).bold(),
        msg.color(CliColors::error())
    )
}

pub fn format_warning(msg: &str) -> String {
    format!(
        "{} {}",
        "⚠".color(CliColors::warning()).bold(),
        msg.color(CliColors::warning())
    )
}

pub fn format_info(msg: &str) -> String {
    format!(
        "{} {}",
        "ℹ".color(CliColors::info()).bold(),
        msg.color(CliColors::info())
    )
}

pub fn format_confidence(confidence: f64) -> ColoredString {
    let text = format!("{:>5.1}%", confidence);
    if confidence >= 80.0 {
        text.color(CliColors::success()).bold()
    } else if confidence >= 50.0 {
        text.color(CliColors::warning())
    } else {
        text.color(CliColors::muted())
    }
}

pub fn print_document(document: &Document) {
    println!(
        "{}",
        "━━━ Document ━━━".color(CliColors::accent()).bold()
    );
    println!(
        "{}: {}",
        "Path".color(CliColors::muted()),
        document.path.color(CliColors::accent()).bold()
    );
    if document.fields.is_empty() {
        println!("{}", "No metadata".color(CliColors::muted()).dimmed());
        return;
    }
    for (name, value) in &document.fields {
        println!(
            "{}: {}",
            name.color(CliColors::field()),
            value.to_string().color(CliColors::primary())
        );
    }
}

pub fn print_related_list(reference: &Document, results: &[RelatedResult]) {
    if results.is_empty() {
        println!(
            "{}",
            format_info(&format!("No documents related to {}.", reference.path))
        );
        return;
    }

    println!(
        "{}",
        format_info(&format!(
            "Found {} documents related to {}:",
            results.len(),
            reference.path
        ))
    );
    println!();

    println!(
        "{:<8} {:<6} {}",
        "Score".color(CliColors::muted()).bold(),
        "Path".color(CliColors::muted()).bold(),
        "Document".color(CliColors::muted()).bold()
    );
    println!("{}", "─".repeat(80).color(CliColors::muted()));

    for result in results {
        let marker = if result.in_same_path {
            "●".color(CliColors::success())
        } else {
            "○".color(CliColors::muted())
        };
        println!(
            "{:<8} {:<6} {}",
            format_confidence(result.confidence),
            marker,
            result.path().color(CliColors::primary())
        );
    }
}

/// Print the per-source breakdown of each result
pub fn print_score_breakdown(results: &[RelatedResult]) {
    for result in results {
        println!("{}", result.path().color(CliColors::accent()).bold());
        if result.path_score > 0.0 {
            println!(
                "  {:<16} {:.1}",
                "path".color(CliColors::muted()),
                result.path_score
            );
        }
        for (field, points) in &result.field_scores {
            println!("  {:<16} {:.1}", field.color(CliColors::field()), points);
        }
        println!(
            "  {:<16} {:.1} ({:.1}%)",
            "total".color(CliColors::muted()),
            result.score,
            result.confidence
        );
    }
}

pub fn print_trace(events: &[TraceEvent]) {
    println!();
    println!("{}", "━━━ Explanation ━━━".color(CliColors::accent()).bold());

    for event in events {
        match event {
            TraceEvent::CriteriaResolved {
                criteria,
                ignored,
                unresolved,
                include_path,
                strict_path,
                min_score,
                score_multiplier,
                ..
            } => {
                for criterion in criteria {
                    let source = if criterion.from_reference {
                        "from reference"
                    } else {
                        "configured"
                    };
                    println!(
                        "{} {} = [{}] ({})",
                        "criterion".color(CliColors::muted()),
                        criterion.field.color(CliColors::field()),
                        criterion.targets.join(", "),
                        source
                    );
                }
                if !ignored.is_empty() {
                    println!(
                        "{} {}",
                        "ignored".color(CliColors::muted()),
                        ignored.join(", ")
                    );
                }
                if !unresolved.is_empty() {
                    println!(
                        "{}",
                        format_warning(&format!(
                            "No values to match for: {}",
                            unresolved.join(", ")
                        ))
                    );
                }
                println!(
                    "{} include_path={} strict_path={} min_score={} multiplier={}",
                    "options".color(CliColors::muted()),
                    include_path,
                    strict_path,
                    min_score,
                    score_multiplier
                );
            }
            TraceEvent::PathScored {
                exact_folder,
                subfolder,
            } => {
                println!(
                    "{} {} in folder, {} below",
                    "path".color(CliColors::muted()),
                    exact_folder,
                    subfolder
                );
            }
            TraceEvent::FieldScored {
                field, matched, ..
            } => {
                println!(
                    "{} {} matched {} documents",
                    "field".color(CliColors::muted()),
                    field.color(CliColors::field()),
                    matched
                );
            }
            TraceEvent::Ranked { results } => {
                println!(
                    "{} {} results after filtering",
                    "ranked".color(CliColors::muted()),
                    results.len()
                );
            }
        }
    }
}

pub fn print_config(config: &KindredConfig) {
    let related = &config.related;

    println!("{}", "━━━ Related ━━━".color(CliColors::accent()).bold());
    for (field, value) in &related.match_criteria {
        println!(
            "{}: {}",
            field.color(CliColors::field()),
            serde_json::to_string(value).unwrap_or_else(|_| "?".to_string())
        );
    }
    println!(
        "{}: {}",
        "include_path".color(CliColors::muted()),
        related.include_path
    );
    println!(
        "{}: {}",
        "strict_path".color(CliColors::muted()),
        related.strict_path
    );
    println!(
        "{}: {}",
        "min_score".color(CliColors::muted()),
        related.min_score
    );
    println!(
        "{}: {}",
        "max_results".color(CliColors::muted()),
        related.max_results
    );
    println!(
        "{}: {}",
        "score_multiplier".color(CliColors::muted()),
        related.score_multiplier
    );

    println!("{}", "━━━ Logging ━━━".color(CliColors::accent()).bold());
    println!(
        "{}: {}",
        "level".color(CliColors::muted()),
        config.logging.level
    );
    println!(
        "{}: {:?}",
        "format".color(CliColors::muted()),
        config.logging.format
    );
    if let Some(file) = &config.logging.file {
        println!("{}: {}", "file".color(CliColors::muted()), file.display());
    }
}

/// JSON document for a related-pages run
pub fn related_to_json(
    reference: &Document,
    results: &[RelatedResult],
    trace: Option<&[TraceEvent]>,
) -> serde_json::Value {
    let entries: Vec<serde_json::Value> = results
        .iter()
        .map(|r| {
            json!({
                "path": r.path(),
                "confidence": r.confidence,
                "in_same_path": r.in_same_path,
                "score": r.score,
                "path_score": r.path_score,
                "field_scores": r.field_scores,
            })
        })
        .collect();

    let mut output = json!({
        "reference": reference.path,
        "count": results.len(),
        "results": entries,
    });

    if let Some(events) = trace {
        output["trace"] = serde_json::to_value(events).unwrap_or_default();
    }

    output
}
