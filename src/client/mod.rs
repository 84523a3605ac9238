pub mod linear_client;
pub mod source;

pub use linear_client::LinearClient;
pub use source::{IssueSource, PageRequest};
