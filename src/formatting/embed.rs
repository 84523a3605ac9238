use std::fmt::Write;

use chrono::Local;
use colored::*;

use super::utils::*;
use crate::embed::{EmbedFormat, EmbedOptions, EmbedOutcome};
use crate::models::Issue;

pub fn format_state(issue: &Issue) -> ColoredString {
    let name = issue.state_name();
    match issue.state_type() {
        "started" => name.yellow(),
        "completed" => name.green(),
        "canceled" => name.red().dimmed(),
        "backlog" => name.dimmed(),
        _ => name.normal(),
    }
}

pub fn get_state_icon(state_type: &str) -> &'static str {
    match state_type {
        "started" => "◐",
        "completed" => "✓",
        "canceled" => "✗",
        "unstarted" => "○",
        _ => "•",
    }
}

/// Render an issue as terminal text in the format the options select.
pub fn render_embed(issue: &Issue, options: &EmbedOptions) -> String {
    let options = options.effective();
    let mut out = String::new();

    match options.format {
        EmbedFormat::Compact => render_compact(&mut out, issue),
        EmbedFormat::Badge => render_badge(&mut out, issue),
        EmbedFormat::Detailed => {
            render_card(&mut out, issue, &options);
            render_detail_extras(&mut out, issue);
        }
        EmbedFormat::Progress => {
            render_card(&mut out, issue, &options);
            render_progress(&mut out, issue);
        }
        EmbedFormat::Card | EmbedFormat::Developer | EmbedFormat::Executive => {
            render_card(&mut out, issue, &options)
        }
    }

    if options.interactive {
        let _ = writeln!(out, "{} {}", "↗".dimmed(), issue.url.dimmed().underline());
    }

    out
}

fn render_compact(out: &mut String, issue: &Issue) {
    let _ = writeln!(
        out,
        "{}  {}  {}",
        issue.identifier.blue().bold(),
        issue.title,
        format_state(issue)
    );
}

fn render_badge(out: &mut String, issue: &Issue) {
    let _ = writeln!(out, "[{} · {}]", issue.identifier.blue().bold(), format_state(issue));
}

fn render_card(out: &mut String, issue: &Issue, options: &EmbedOptions) {
    let _ = writeln!(out, "{}", "─".repeat(60).dimmed());

    let mut header = format!("{} {}", get_state_icon(issue.state_type()), issue.identifier.blue().bold());
    if options.show_priority && issue.priority > 0 {
        let _ = write!(header, "  P{} {}", issue.priority, format_priority(issue.priority));
    }
    let _ = writeln!(out, "{}", header);
    let _ = writeln!(out, "{}", issue.title.bold());

    let mut meta: Vec<String> = Vec::new();
    if options.show_team {
        if let Some(team) = &issue.team {
            meta.push(team.name.cyan().to_string());
        }
    }
    meta.push(format_state(issue).to_string());
    if options.show_assignee {
        if let Some(assignee) = &issue.assignee {
            meta.push(assignee.name.green().to_string());
        }
    }
    if options.show_creator {
        if let Some(creator) = &issue.creator {
            meta.push(format!("Created by {}", creator.name));
        }
    }
    if options.show_project {
        if let Some(project) = &issue.project {
            meta.push(project.name.magenta().to_string());
        }
    }
    if options.show_cycle {
        if let Some(cycle) = &issue.cycle {
            meta.push(cycle.display_name());
        }
    }
    if options.show_estimate {
        if let Some(estimate) = issue.estimate {
            meta.push(format!("{} pts", estimate));
        }
    }
    let _ = writeln!(out, "{}", meta.join(&" · ".dimmed().to_string()));

    if options.show_description {
        if let Some(description) = &issue.description {
            let _ = writeln!(out, "{}", truncate(description, options.max_description_length).dimmed());
        }
    }

    if options.show_labels && !issue.labels.is_empty() {
        let labels: Vec<String> = issue
            .labels
            .iter()
            .map(|label| match parse_hex_color(&label.color) {
                Some((r, g, b)) => format!("[{}]", label.name.truecolor(r, g, b)),
                None => format!("[{}]", label.name),
            })
            .collect();
        let _ = writeln!(out, "{}", labels.join(" "));
    }

    if options.show_progress {
        let percentage = progress_percentage(issue.state_type());
        let _ = writeln!(out, "Progress: {}%", percentage);
    }

    if options.show_due_date {
        if let Some(due_date) = &issue.due_date {
            let overdue = parse_date(due_date)
                .map(|date| date < Local::now().date_naive())
                .unwrap_or(false);
            let text = format!("Due: {}", format_date(due_date));
            let _ = writeln!(out, "{}", if overdue { text.red() } else { text.normal() });
        }
    }

    if options.show_branch {
        if let Some(branch) = &issue.branch_name {
            let _ = writeln!(out, "Branch: {}", branch.yellow());
        }
    }

    let mut counts: Vec<String> = Vec::new();
    if options.show_comment_count {
        counts.push(format!("💬 {}", issue.comments.len()));
    }
    if options.show_attachment_count {
        counts.push(format!("📎 {}", issue.attachments.len()));
    }
    if !counts.is_empty() {
        let _ = writeln!(out, "{}", counts.join("  "));
    }

    if options.show_url {
        let _ = writeln!(out, "{}", issue.url.blue().underline());
    }

    if options.show_dates {
        let mut dates = format!("Created: {}", format_date(&issue.created_at));
        if issue.updated_at != issue.created_at {
            let _ = write!(dates, "  Updated: {} ({})", format_date(&issue.updated_at), format_relative_time(&issue.updated_at));
        }
        let _ = writeln!(out, "{}", dates.dimmed());
    }
}

fn render_detail_extras(out: &mut String, issue: &Issue) {
    if let Some(description) = &issue.description {
        let _ = writeln!(out);
        for line in description.lines() {
            let _ = writeln!(out, "  {}", strip_inline_markdown(line));
        }
    }
    if let Some(project) = &issue.project {
        let _ = writeln!(out, "Project: {}", project.name.magenta());
    }
}

fn render_progress(out: &mut String, issue: &Issue) {
    let percentage = progress_percentage(issue.state_type());
    let _ = writeln!(out, "{} {}% Complete", progress_bar(percentage, 20), percentage);
}

pub fn print_embed(issue: &Issue, options: &EmbedOptions) {
    print!("{}", render_embed(issue, options));
}

/// Print the rendered embed, or the message that stands in for it.
pub fn print_outcome(outcome: &EmbedOutcome) {
    match outcome {
        EmbedOutcome::Ready { issue, options } => print_embed(issue, options),
        other => {
            if let Some(message) = other.message() {
                println!("{}", message.red());
            }
        }
    }
}
