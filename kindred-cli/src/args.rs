//! Command argument structures
//!
//! This module contains the CLI argument structs for each command.

use clap::Args;
use kindred::related::IncludePath;

#[derive(Args, Debug, Clone, Default)]
pub struct RelatedArgs {
    /// Reference document path or unique file name (defaults to the store's current document)
    pub path: Option<String>,

    /// Match criterion as FIELD=VALUE (repeatable).
    /// VALUE is `true` (use the reference's value), `false` (ignore the field)
    /// or one or more comma-separated values to match
    #[arg(long = "criterion", short = 'c', value_name = "FIELD=VALUE")]
    pub criteria: Vec<String>,

    /// Use only the --criterion values, discarding configured criteria
    #[arg(long)]
    pub only_criteria: bool,

    /// Path proximity scoring (true, false, strict)
    #[arg(long, value_name = "MODE")]
    pub include_path: Option<IncludePath>,

    /// Keep only documents in or below the reference's folder
    #[arg(long)]
    pub strict_path: bool,

    /// Minimum confidence as a fraction (0.0 to 1.0)
    #[arg(long)]
    pub min_score: Option<f64>,

    /// Maximum number of results
    #[arg(long, short = 'n')]
    pub max_results: Option<usize>,

    /// Points awarded per matched field value
    #[arg(long)]
    pub multiplier: Option<f64>,

    /// Show how each score was reached
    #[arg(long)]
    pub explain: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ShowArgs {
    /// Document path or unique file name
    pub path: String,
}

#[derive(Args, Debug, Clone)]
pub struct CompletionsArgs {
    /// Shell type
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
