use clap::ArgMatches;
use colored::*;

use crate::cli_context::CliContext;
use crate::error::LinearResult;
use crate::logging::get_log_file_path;

pub fn status_text(configured: bool) -> &'static str {
    if configured {
        "Linear: Connected"
    } else {
        "Linear: Not configured"
    }
}

pub async fn handle_status(_matches: &ArgMatches) -> LinearResult<()> {
    let context = CliContext::load()?;
    let configured = context.has_api_key();

    if configured {
        println!("{}", status_text(true).green());
    } else {
        println!("{}", status_text(false).yellow());
    }
    println!(
        "Debug mode: {}",
        if context.config().debug_mode { "on" } else { "off" }
    );
    if let Some(path) = get_log_file_path() {
        println!("Log file: {}", path.display());
    }
    Ok(())
}
