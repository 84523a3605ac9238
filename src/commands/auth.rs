use clap::ArgMatches;
use colored::*;

use crate::cli_context::CliContext;
use crate::client::IssueSource;
use crate::error::LinearResult;

pub async fn handle_auth(matches: &ArgMatches) -> LinearResult<()> {
    let mut context = CliContext::load()?;

    if let Some(api_key) = matches.get_one::<String>("api-key") {
        context.set_api_key(api_key.clone())?;
        println!("API key saved successfully!");

        let client = context.verified_client()?;
        match client.viewer().await {
            Ok(user) => println!(
                "{} Connected as: {}{}",
                "✓".green(),
                user.name,
                user.email.map(|email| format!(" ({})", email)).unwrap_or_default()
            ),
            Err(e) => println!("{} Connection failed: {}", "✗".red(), e),
        }
    } else if matches.get_flag("show") {
        match context.config().api_key.as_deref() {
            Some(key) if key.chars().count() > 12 => {
                let chars: Vec<char> = key.chars().collect();
                let head: String = chars[..8].iter().collect();
                let tail: String = chars[chars.len() - 4..].iter().collect();
                println!("API Key: {}...{}", head, tail);
            }
            Some(_) => println!("API Key: (set)"),
            None => println!("No API key configured"),
        }
    } else {
        println!("Usage: linear-embed auth --api-key <KEY> or linear-embed auth --show");
    }
    Ok(())
}
