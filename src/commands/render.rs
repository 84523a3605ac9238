use std::sync::Arc;
use std::time::Duration;

use clap::ArgMatches;
use colored::*;

use super::read_input;
use crate::cli_context::CliContext;
use crate::client::IssueSource;
use crate::embed::{extract_embed_blocks, parse_embed_source, EmbedOptions, EmbedOutcome, EmbedProcessor};
use crate::error::{LinearError, LinearResult};
use crate::formatting::print_outcome;
use crate::logging::log_warn;
use crate::resolver::IssueResolver;

/// Render every embed block of a document, resolving them concurrently.
pub async fn handle_render(matches: &ArgMatches) -> LinearResult<()> {
    let document = read_input(matches)?;
    let blocks = extract_embed_blocks(&document);
    if blocks.is_empty() {
        return Err(LinearError::InvalidInput("No embed blocks found".to_string()));
    }

    let mut context = CliContext::load()?;
    let client = context.client()?;
    let processor = Arc::new(EmbedProcessor::new(IssueResolver::new(client)));

    let tasks: Vec<_> = blocks
        .iter()
        .cloned()
        .map(|block| {
            let processor = Arc::clone(&processor);
            tokio::spawn(async move { processor.process(&block).await })
        })
        .collect();

    for task in tasks {
        match task.await {
            Ok(outcome) => print_outcome(&outcome),
            Err(e) => log_warn(&format!("Embed task failed: {}", e)),
        }
        println!();
    }

    if let Some(seconds) = matches.get_one::<String>("watch").and_then(|s| s.parse::<u64>().ok()) {
        watch(&processor, &blocks, Duration::from_secs(seconds.max(1))).await;
    }
    Ok(())
}

/// Re-fetch and re-render on an interval, bypassing the cache.
async fn watch<S: IssueSource + ?Sized>(processor: &EmbedProcessor<S>, blocks: &[String], interval: Duration) {
    let parsed: Vec<_> = blocks.iter().filter_map(|block| parse_embed_source(block)).collect();

    loop {
        tokio::time::sleep(interval).await;
        println!("{}", "─ refreshed ─".dimmed());

        for embed in &parsed {
            let options = EmbedOptions::from_overrides(&embed.options);
            let outcome = match processor.refresh_issue(&embed.identifier).await {
                Ok(Some(issue)) => EmbedOutcome::Ready { issue, options },
                Ok(None) => EmbedOutcome::NotFound {
                    identifier: embed.identifier.clone(),
                },
                Err(LinearError::NotConfigured) => EmbedOutcome::NotConfigured,
                Err(e) => EmbedOutcome::Failed {
                    identifier: embed.identifier.clone(),
                    message: e.to_string(),
                },
            };

            print_outcome(&outcome);
            println!();
        }
    }
}
