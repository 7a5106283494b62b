//! Configuration command handler

use crate::context::KindredCliContext;
use crate::output::{format_info, print_config};

pub fn handle_config_command(ctx: &KindredCliContext, output_format: &str) -> kindred::Result<()> {
    if output_format == "json" {
        println!(
            "{}",
            serde_json::to_string_pretty(&ctx.config).unwrap_or_else(|_| "{}".to_string())
        );
        return Ok(());
    }

    print_config(&ctx.config);
    if let Some(path) = ctx.store_path() {
        println!();
        println!("{}", format_info(&format!("Store: {}", path.display())));
    }

    Ok(())
}
