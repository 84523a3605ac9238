pub mod cache;
pub mod options;
pub mod parser;
pub mod processor;

pub use cache::IssueCache;
pub use options::{EmbedFormat, EmbedOptions, EmbedOverrides, UnknownFormat};
pub use parser::{parse_embed_source, parse_option, ParsedEmbed};
pub use processor::{EmbedOutcome, EmbedProcessor};

use crate::constants::EMBED_BLOCK_LANGUAGE;

/// A ready-to-edit embed block for the given format.
pub fn embed_template(format: EmbedFormat) -> String {
    format!("```{}\nABC-123:{}\n```", EMBED_BLOCK_LANGUAGE, format)
}

/// Bodies of every embed code block in a markdown document. A document
/// without any fenced embed is treated as a single bare block body.
pub fn extract_embed_blocks(document: &str) -> Vec<String> {
    let opening = format!("```{}", EMBED_BLOCK_LANGUAGE);
    let mut blocks = Vec::new();
    let mut current: Option<Vec<&str>> = None;
    let mut saw_fence = false;

    for line in document.lines() {
        let trimmed = line.trim();
        current = match current.take() {
            Some(body) if trimmed.starts_with("```") => {
                blocks.push(body.join("\n"));
                None
            }
            Some(mut body) => {
                body.push(line);
                Some(body)
            }
            None if trimmed == opening => {
                saw_fence = true;
                Some(Vec::new())
            }
            None => None,
        };
    }

    // An unterminated block runs to the end of the document.
    if let Some(body) = current {
        blocks.push(body.join("\n"));
    }

    if !saw_fence && !document.trim().is_empty() {
        blocks.push(document.to_string());
    }
    blocks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_embed_blocks() {
        let document = "# Notes\n\n```linear-issue\nENG-1:card\nshowDates=true\n```\n\ntext\n```rust\nfn main() {}\n```\n```linear-issue\nENG-2\n```\n";
        assert_eq!(
            extract_embed_blocks(document),
            vec!["ENG-1:card\nshowDates=true".to_string(), "ENG-2".to_string()]
        );
    }

    #[test]
    fn test_extract_bare_body() {
        assert_eq!(extract_embed_blocks("ENG-3:badge\n"), vec!["ENG-3:badge\n".to_string()]);
        assert!(extract_embed_blocks("  \n").is_empty());
        assert_eq!(extract_embed_blocks("```linear-issue\nENG-4"), vec!["ENG-4".to_string()]);
    }

    #[test]
    fn test_template_round_trips_through_parser() {
        let template = embed_template(EmbedFormat::Compact);
        assert_eq!(template, "```linear-issue\nABC-123:compact\n```");

        let body: Vec<&str> = template.lines().filter(|l| !l.starts_with("```")).collect();
        let parsed = parse_embed_source(&body.join("\n")).unwrap();
        assert_eq!(parsed.options.format, Some(EmbedFormat::Compact));
    }
}
