pub mod comment;
pub mod graphql;
pub mod issue;
pub mod project;
pub mod user;

// Re-export commonly used types
pub use comment::{Attachment, Comment};
pub use graphql::{GraphQLError, GraphQLResponse};
pub use issue::{Issue, IssueNode, Label, WorkflowState};
pub use project::{Cycle, Project};
pub use user::{Team, User, UserRef};

// Connection type used by GraphQL pagination
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection<T> {
    pub nodes: Vec<T>,
    #[serde(default)]
    pub page_info: PageInfo,
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub has_next_page: bool,
    pub end_cursor: Option<String>,
}

impl<T> Connection<T> {
    /// Cursor for the following page, if the remote reports one.
    pub fn next_cursor(&self) -> Option<&str> {
        if self.page_info.has_next_page {
            self.page_info.end_cursor.as_deref()
        } else {
            None
        }
    }
}
