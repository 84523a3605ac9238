// Module declarations
pub mod cli_context;
pub mod client;
pub mod commands;
pub mod config;
pub mod constants;
pub mod embed;
pub mod error;
pub mod formatting;
pub mod identifier;
pub mod logging;
pub mod models;
pub mod resolver;

// Re-export commonly used items
pub use client::{IssueSource, LinearClient, PageRequest};
pub use config::{get_api_key, load_config, save_config, Config};
pub use embed::{EmbedFormat, EmbedOptions, EmbedOutcome, EmbedProcessor, IssueCache};
pub use error::{LinearError, LinearResult};
pub use identifier::IssueIdentifier;
pub use models::*;
pub use resolver::IssueResolver;
