use std::sync::Arc;

use clap::ArgMatches;
use colored::*;

use crate::cli_context::CliContext;
use crate::error::LinearResult;
use crate::identifier::IssueIdentifier;
use crate::linear_error;
use crate::resolver::IssueResolver;

pub async fn handle_resolve(matches: &ArgMatches) -> LinearResult<()> {
    let identifier: IssueIdentifier = matches
        .get_one::<String>("identifier")
        .ok_or_else(|| linear_error!(InvalidInput, "Issue identifier is required"))?
        .parse()?;

    let mut context = CliContext::load()?;
    let client = context.verified_client()?;
    let resolver = IssueResolver::new(Arc::clone(&client));

    match resolver.resolve(&identifier).await? {
        Some(issue) => println!("{}", serde_json::to_string_pretty(&issue)?),
        None => println!("{}", format!("Issue {} not found", identifier).yellow()),
    }
    Ok(())
}
