//! Command enum definitions
//!
//! This module contains the CLI command enum that defines the command structure.

use crate::args::*;
use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Find documents related to a reference document
    #[command(
        alias = "rel",
        long_about = r#"
Rank the documents in the store by how closely they relate to a reference
document. The reference is the PATH argument, or the store's current document
when PATH is omitted.

HOW SCORING WORKS:
  • Path proximity - 2 points for documents in the reference's folder,
    1 point for documents anywhere below it
  • Field matches - for each criterion, every target value a document shares
    earns the score multiplier (1.5 by default)

The total is divided by the highest score the criteria allow, giving a
confidence percentage. Documents below --min-score are dropped and at most
--max-results are shown, best first.

CRITERIA:
  • subject=true        Match the reference's own subject values
  • type=false          Ignore the type field
  • domain=work,home    Match documents whose domain is work or home

EXAMPLES:
  kindred-cli --store vault.json related
  kindred-cli --store vault.json related Projects/kindred/overview.md --min-score 0.3
  kindred-cli --store vault.json related overview.md -c type=false -c status=active --explain
"#
    )]
    Related(RelatedArgs),

    /// Show a document and its metadata
    Show(ShowArgs),

    /// Print the effective configuration
    Config,

    /// Generate shell completion scripts
    Completions(CompletionsArgs),

    /// Display version information
    Version,
}
