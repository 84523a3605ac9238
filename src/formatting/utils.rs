use colored::*;
use chrono::{DateTime, NaiveDate, Utc};

/// Linear priorities: 0 none, 1 urgent, 2 high, 3 medium, 4 low.
pub fn format_priority(priority: u8) -> ColoredString {
    match priority {
        1 => "Urgent".red().bold(),
        2 => "High".red(),
        3 => "Medium".yellow(),
        4 => "Low".normal(),
        _ => "None".dimmed(),
    }
}

pub fn format_relative_time(timestamp: &str) -> String {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(timestamp) {
        let now = Utc::now();
        let duration = now.signed_duration_since(parsed);

        if duration.num_days() > 365 {
            format!("{}y ago", duration.num_days() / 365)
        } else if duration.num_days() > 30 {
            format!("{}mo ago", duration.num_days() / 30)
        } else if duration.num_days() > 0 {
            format!("{}d ago", duration.num_days())
        } else if duration.num_hours() > 0 {
            format!("{}h ago", duration.num_hours())
        } else if duration.num_minutes() > 0 {
            format!("{}m ago", duration.num_minutes())
        } else {
            "just now".to_string()
        }
    } else {
        "unknown".to_string()
    }
}

/// Calendar date of an RFC 3339 timestamp or a bare `YYYY-MM-DD` date.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.date_naive())
        .ok()
        .or_else(|| NaiveDate::parse_from_str(value, "%Y-%m-%d").ok())
}

pub fn format_date(value: &str) -> String {
    parse_date(value)
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| value.to_string())
}

/// Keep the first `max_chars` characters, appending `...` when cut.
pub fn truncate(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((byte_index, _)) => format!("{}...", &s[..byte_index]),
        None => s.to_string(),
    }
}

/// Rough completion derived from the workflow state type.
pub fn progress_percentage(state_type: &str) -> u8 {
    match state_type {
        "unstarted" => 0,
        "started" => 50,
        "completed" => 100,
        "canceled" => 0,
        _ => 25,
    }
}

pub fn progress_bar(percentage: u8, width: usize) -> String {
    let filled = width * percentage.min(100) as usize / 100;
    format!("[{}{}]", "█".repeat(filled), "░".repeat(width - filled))
}

/// `#rrggbb` to an RGB triple.
pub fn parse_hex_color(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Strip inline markdown markers for plain terminal display.
pub fn strip_inline_markdown(text: &str) -> String {
    text.replace("**", "").replace('`', "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_counts_characters() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("exactly10!", 10), "exactly10!");
        assert_eq!(truncate("a longer description", 8), "a longer...");
        assert_eq!(truncate("héllo wörld", 5), "héllo...");
    }

    #[test]
    fn test_progress_percentage() {
        assert_eq!(progress_percentage("unstarted"), 0);
        assert_eq!(progress_percentage("started"), 50);
        assert_eq!(progress_percentage("completed"), 100);
        assert_eq!(progress_percentage("canceled"), 0);
        assert_eq!(progress_percentage("triage"), 25);
    }

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(50, 4), "[██░░]");
        assert_eq!(progress_bar(100, 2), "[██]");
        assert_eq!(progress_bar(0, 2), "[░░]");
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#ff8000"), Some((255, 128, 0)));
        assert_eq!(parse_hex_color("00ff00"), Some((0, 255, 0)));
        assert_eq!(parse_hex_color("#fff"), None);
        assert_eq!(parse_hex_color("#zzzzzz"), None);
    }

    #[test]
    fn test_dates() {
        assert_eq!(format_date("2024-03-01T10:00:00.000Z"), "2024-03-01");
        assert_eq!(format_date("2024-03-05"), "2024-03-05");
        assert_eq!(format_date("soon"), "soon");
        assert_eq!(format_relative_time("not a date"), "unknown");
    }
}
