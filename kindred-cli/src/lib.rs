pub mod args;
pub mod commands;
pub mod context;
pub mod handlers;
pub mod output;
pub mod utils;

pub use context::{KindredCliContext, cli_logging_config, init_cli_logging, load_config};
pub use output::{
    CliColors, error_to_json, format_confidence, format_error, format_info, format_warning,
    output_error_json, print_config, print_document, print_related_list, print_score_breakdown,
    print_trace, related_to_json,
};
pub use utils::{build_related_options, parse_criterion, resolve_document};
