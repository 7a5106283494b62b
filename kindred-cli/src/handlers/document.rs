//! Document command handlers

use crate::args::ShowArgs;
use crate::context::KindredCliContext;
use crate::output::print_document;
use crate::utils::resolve_document;

pub fn handle_show_command(
    args: &ShowArgs,
    ctx: &KindredCliContext,
    output_format: &str,
) -> kindred::Result<()> {
    let document = resolve_document(ctx.store()?, Some(args.path.as_str()))?;

    if output_format == "json" {
        println!(
            "{}",
            serde_json::to_string_pretty(&*document).unwrap_or_else(|_| "{}".to_string())
        );
    } else {
        print_document(&document);
    }

    Ok(())
}
