use clap::ArgMatches;
use colored::*;

use crate::cli_context::CliContext;
use crate::client::{IssueSource, PageRequest};
use crate::constants::DEBUG_ISSUE_LIMIT;
use crate::error::{ErrorContext, LinearResult};
use crate::logging::{log_error, log_info};

/// List recent issue identifiers, to check what the key can see.
pub async fn handle_debug_issues(matches: &ArgMatches) -> LinearResult<()> {
    let limit = matches
        .get_one::<String>("limit")
        .and_then(|s| s.parse::<u32>().ok())
        .unwrap_or(DEBUG_ISSUE_LIMIT);

    let mut context = CliContext::load()?;
    let client = context.verified_client()?;

    let page = match client.issues(PageRequest::first(limit), None).await {
        Ok(page) => page,
        Err(e) => {
            log_error(&format!("Error fetching issues: {}", e));
            return Err(e);
        }
    };
    log_info(&format!("Debug listing retrieved {} issues", page.nodes.len()));

    println!("{}", "Available issue identifiers:".bold());
    for (index, issue) in page.nodes.iter().enumerate() {
        println!("{:>3}. {} - \"{}\"", index + 1, issue.identifier.blue(), issue.title);
    }
    println!("Found {} issues.", page.nodes.len());
    Ok(())
}

pub async fn handle_debug_mode(matches: &ArgMatches) -> LinearResult<()> {
    let state = matches
        .get_one::<String>("state")
        .context("Expected 'on' or 'off'")?;
    let enabled = state == "on";

    let mut context = CliContext::load()?;
    context.set_debug_mode(enabled)?;
    crate::logging::set_debug_mode(enabled);

    println!("Debug mode {}", if enabled { "enabled" } else { "disabled" });
    Ok(())
}
