use clap::{CommandFactory, Parser};
use kindred_cli::args::CompletionsArgs;
use kindred_cli::commands::Commands;
use kindred::config::KindredConfig;
use kindred_cli::context::{KindredCliContext, init_cli_logging, load_config};
use kindred_cli::handlers::*;
use kindred_cli::output::output_error_json;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "kindred-cli")]
#[command(about = "Find related notes by folder and metadata", long_about = None)]
#[command(version = kindred::VERSION)]
struct Cli {
    /// JSON snapshot of the document store
    #[arg(long, short, global = true)]
    store: Option<PathBuf>,

    /// Configuration file (toml, yaml or json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format (table, json) - use json for tool integration
    #[arg(long, short, default_value = "table", global = true)]
    output: String,

    /// Use machine-readable output (alias for --output json)
    #[arg(long, global = true)]
    machine: bool,

    /// Verbose output (debug level logging)
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Quiet mode (suppress all logging output)
    #[arg(long, short, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> ExitCode {
    let cli_args = Cli::parse();

    // Determine output format - priority: machine flag > env var > cli arg > default
    let output_format = if cli_args.machine {
        "json".to_string()
    } else if let Ok(env_output) = std::env::var("KINDRED_OUTPUT") {
        env_output
    } else {
        cli_args.output.clone()
    };

    let is_quiet = cli_args.quiet
        || std::env::var("KINDRED_QUIET")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

    match run(cli_args, &output_format, is_quiet) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output_error_json(&e, &output_format);
            ExitCode::FAILURE
        }
    }
}

/// Load configuration and install logging from it
///
/// Machine mode implies quiet so JSON output stays clean.
fn setup(cli_args: &Cli, is_quiet: bool) -> kindred::Result<KindredConfig> {
    let config = load_config(cli_args.config.as_deref())?;
    init_cli_logging(
        &config.logging,
        is_quiet || cli_args.machine,
        cli_args.verbose,
    )?;
    Ok(config)
}

fn run(cli_args: Cli, output_format: &str, is_quiet: bool) -> kindred::Result<()> {
    let config = setup(&cli_args, is_quiet)?;
    let Cli { store, command, .. } = cli_args;

    match command {
        Commands::Version => {
            if output_format == "json" {
                println!(
                    "{}",
                    serde_json::json!({ "name": "kindred-cli", "version": kindred::VERSION })
                );
            } else {
                println!("Kindred CLI v{}", kindred::VERSION);
            }
            Ok(())
        }

        Commands::Completions(CompletionsArgs { shell }) => {
            let mut command = Cli::command();
            clap_complete::generate(shell, &mut command, "kindred-cli", &mut std::io::stdout());
            Ok(())
        }

        Commands::Config => {
            let ctx = KindredCliContext::load(config, store)?;
            handle_config_command(&ctx, output_format)
        }

        Commands::Show(args) => {
            let ctx = KindredCliContext::load(config, store)?;
            handle_show_command(&args, &ctx, output_format)
        }

        Commands::Related(args) => {
            let ctx = KindredCliContext::load(config, store)?;
            handle_related_command(&args, &ctx, output_format)
        }
    }
}
