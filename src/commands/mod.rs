pub mod auth;
pub mod debug;
pub mod parse;
pub mod render;
pub mod resolve;
pub mod status;
pub mod template;

use std::fs;
use std::io::{self, Read};

use clap::ArgMatches;

use crate::error::{ErrorContext, LinearResult};

/// Read the `file` argument, or stdin when it is absent or `-`.
pub fn read_input(matches: &ArgMatches) -> LinearResult<String> {
    match matches.get_one::<String>("file").map(|s| s.as_str()) {
        Some(path) if path != "-" => {
            fs::read_to_string(path).with_context(|| format!("Failed to read {}", path))
        }
        _ => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .context("Failed to read embed source from stdin")?;
            Ok(input)
        }
    }
}
