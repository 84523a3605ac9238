use clap::ArgMatches;
use serde_json::json;

use super::read_input;
use crate::embed::{parse_embed_source, EmbedOptions};
use crate::error::LinearResult;
use crate::linear_error;

/// Show how an embed body is understood, without touching the network.
pub async fn handle_parse(matches: &ArgMatches) -> LinearResult<()> {
    let source = read_input(matches)?;
    let parsed = parse_embed_source(&source)
        .ok_or_else(|| linear_error!(InvalidInput, "Invalid Linear issue embed syntax"))?;

    let merged = EmbedOptions::from_overrides(&parsed.options);
    let output = json!({
        "identifier": parsed.identifier,
        "options": parsed.options,
        "merged": merged,
        "effective": merged.effective(),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
