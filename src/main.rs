use std::process;

use clap::{Arg, ArgAction, ArgMatches, Command};
use colored::*;

use linear_embed::commands::{auth, debug, parse, render, resolve, status, template};
use linear_embed::config::load_config;
use linear_embed::embed::EmbedFormat;
use linear_embed::error::LinearResult;
use linear_embed::logging::{init_logging, log_error};

fn file_arg() -> Arg {
    Arg::new("file")
        .value_name("FILE")
        .help("Markdown file to read, or '-' for stdin")
        .required(false)
}

fn build_cli() -> Command {
    Command::new("linear-embed")
        .about("Render Linear issues from linear-issue embed blocks")
        .version("1.0.0")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("debug")
                .long("debug")
                .help("Write debug lines to the log file")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .subcommand(
            Command::new("render")
                .about("Render every linear-issue block of a document")
                .arg(file_arg())
                .arg(
                    Arg::new("watch")
                        .long("watch")
                        .value_name("SECONDS")
                        .help("Re-fetch and re-render on an interval"),
                ),
        )
        .subcommand(
            Command::new("parse")
                .about("Show how an embed body is parsed, without fetching")
                .arg(file_arg()),
        )
        .subcommand(
            Command::new("resolve")
                .about("Resolve an issue identifier and print it as JSON")
                .arg(Arg::new("identifier").value_name("ID").required(true)),
        )
        .subcommand(
            Command::new("template")
                .about("Print embed block templates")
                .arg(
                    Arg::new("format")
                        .long("format")
                        .value_name("FORMAT")
                        .value_parser(EmbedFormat::ALL.map(|f| f.as_str())),
                ),
        )
        .subcommand(
            Command::new("debug-issues")
                .about("List issue identifiers visible to the API key")
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .value_name("N")
                        .help("Number of issues to list (default 50)"),
                ),
        )
        .subcommand(
            Command::new("auth")
                .about("Authenticate with Linear")
                .arg(
                    Arg::new("api-key")
                        .long("api-key")
                        .value_name("KEY")
                        .help("Set your Linear API key")
                        .required(false),
                )
                .arg(
                    Arg::new("show")
                        .long("show")
                        .help("Show current API key")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(Command::new("status").about("Show connection status"))
        .subcommand(
            Command::new("debug")
                .about("Turn persistent debug logging on or off")
                .arg(
                    Arg::new("state")
                        .value_parser(["on", "off"])
                        .required(true),
                ),
        )
}

async fn dispatch(matches: &ArgMatches) -> LinearResult<()> {
    match matches.subcommand() {
        Some(("render", sub_matches)) => render::handle_render(sub_matches).await,
        Some(("parse", sub_matches)) => parse::handle_parse(sub_matches).await,
        Some(("resolve", sub_matches)) => resolve::handle_resolve(sub_matches).await,
        Some(("template", sub_matches)) => template::handle_template(sub_matches).await,
        Some(("debug-issues", sub_matches)) => debug::handle_debug_issues(sub_matches).await,
        Some(("auth", sub_matches)) => auth::handle_auth(sub_matches).await,
        Some(("status", sub_matches)) => status::handle_status(sub_matches).await,
        Some(("debug", sub_matches)) => debug::handle_debug_mode(sub_matches).await,
        _ => {
            eprintln!("Unknown command. Use 'linear-embed --help' for available commands.");
            process::exit(1);
        }
    }
}

#[tokio::main]
async fn main() {
    let matches = build_cli().get_matches();

    let debug_mode = load_config().debug_mode || matches.get_flag("debug");
    if let Err(e) = init_logging(debug_mode) {
        eprintln!("Warning: could not initialize logging: {}", e);
    }

    if let Err(e) = dispatch(&matches).await {
        log_error(&e.to_string());
        eprintln!("{} {}", "Error:".red().bold(), e);
        process::exit(1);
    }
}
