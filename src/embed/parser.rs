use serde::Serialize;

use super::options::{EmbedFormat, EmbedOverrides};
use crate::identifier::IssueIdentifier;
use crate::logging::{log_debug, log_warn};

/// A successfully parsed embed block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedEmbed {
    pub identifier: IssueIdentifier,
    pub options: EmbedOverrides,
}

/// Parse the body of an embed code block.
///
/// Accepted shapes:
///
/// ```text
/// ABC-123
/// ABC-123:card
/// ABC-123:card:showDates=true
/// ABC-123 format=detailed showAssignee=false
/// ```
///
/// Any later non-empty line is another `key=value` option. Unknown keys and
/// bad values are dropped; only an empty body or an invalid identifier makes
/// the whole parse fail.
pub fn parse_embed_source(source: &str) -> Option<ParsedEmbed> {
    let lines: Vec<&str> = source
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let (header, option_lines) = match lines.split_first() {
        Some(split) => split,
        None => {
            log_debug("Embed source is empty");
            return None;
        }
    };

    let mut options = EmbedOverrides::default();
    let candidate = if header.contains(':') {
        let mut parts = header.split(':');
        let candidate = parts.next().unwrap_or_default();

        // Position 1 is the format slot only; options start at position 2.
        if let Some(raw_format) = parts.next() {
            let raw_format = raw_format.trim();
            if !raw_format.is_empty() {
                match raw_format.parse::<EmbedFormat>() {
                    Ok(format) => options.format = Some(format),
                    Err(e) => log_warn(&format!("{} (in '{}')", e, header)),
                }
            }
        }

        for part in parts {
            if let Some(option) = parse_option(part) {
                options.merge(option);
            }
        }
        candidate
    } else {
        let mut parts = header.split_whitespace();
        let candidate = parts.next().unwrap_or_default();
        for part in parts {
            if let Some(option) = parse_option(part) {
                options.merge(option);
            }
        }
        candidate
    };

    for line in option_lines {
        if let Some(option) = parse_option(line) {
            options.merge(option);
        }
    }

    match IssueIdentifier::parse(candidate) {
        Some(identifier) => {
            log_debug(&format!("Parsed embed {} with options {:?}", identifier, options));
            Some(ParsedEmbed { identifier, options })
        }
        None => {
            log_debug(&format!("Invalid issue identifier in embed: '{}'", candidate));
            None
        }
    }
}

/// Parse a single `key=value` option.
///
/// The value is the text between the first `=` and the next one, trimmed.
/// Toggles are true only for the exact string `true`.
pub fn parse_option(option: &str) -> Option<EmbedOverrides> {
    let mut pieces = option.split('=');
    let key = pieces.next()?.trim();
    let value = pieces.next()?.trim();

    let mut parsed = EmbedOverrides::default();
    match key {
        "format" => parsed.format = Some(value.parse().ok()?),
        "maxDescriptionLength" => parsed.max_description_length = Some(parse_positive_length(value)?),
        _ => *parsed.flag_mut(key)? = Some(value == "true"),
    }
    Some(parsed)
}

/// Lenient integer parse: an optional sign and a leading run of digits,
/// anything after the digits ignored. Only values above zero are accepted.
fn parse_positive_length(value: &str) -> Option<usize> {
    let (negative, rest) = match value.as_bytes().first() {
        Some(b'-') => (true, &value[1..]),
        Some(b'+') => (false, &value[1..]),
        _ => (false, value),
    };
    let digits_end = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
    let length: usize = rest[..digits_end].parse().ok()?;

    if negative || length == 0 {
        None
    } else {
        Some(length)
    }
}
