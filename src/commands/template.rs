use clap::ArgMatches;

use crate::embed::{embed_template, EmbedFormat};
use crate::error::{LinearError, LinearResult};

pub async fn handle_template(matches: &ArgMatches) -> LinearResult<()> {
    match matches.get_one::<String>("format") {
        Some(format) => {
            let format: EmbedFormat = format
                .parse()
                .map_err(|e| LinearError::InvalidInput(format!("{}", e)))?;
            println!("{}", embed_template(format));
        }
        None => {
            for format in EmbedFormat::ALL {
                println!("{}\n", embed_template(format));
            }
        }
    }
    println!("Replace ABC-123 with your issue identifier.");
    Ok(())
}
