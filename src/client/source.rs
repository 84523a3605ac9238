use async_trait::async_trait;

use crate::error::LinearResult;
use crate::models::{Attachment, Comment, Connection, Cycle, IssueNode, Label, Project, Team, User, WorkflowState};

/// Cursor-based page selection: `first` items after the opaque `after` cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub first: u32,
    pub after: Option<String>,
}

impl PageRequest {
    pub fn first(first: u32) -> Self {
        Self { first, after: None }
    }

    pub fn after(first: u32, cursor: impl Into<String>) -> Self {
        Self {
            first,
            after: Some(cursor.into()),
        }
    }
}

/// The remote capability the resolver needs from an issue tracker.
///
/// Relation accessors are keyed by the issue's opaque id and are resolved
/// lazily, one call per relation.
#[async_trait]
pub trait IssueSource: Send + Sync {
    /// Whether credentials are present. Must not touch the network.
    fn is_configured(&self) -> bool;

    async fn viewer(&self) -> LinearResult<User>;

    async fn issue(&self, identifier: &str) -> LinearResult<IssueNode>;

    async fn teams(&self, page: PageRequest) -> LinearResult<Connection<Team>>;

    async fn issues(&self, page: PageRequest, team_id: Option<&str>) -> LinearResult<Connection<IssueNode>>;

    async fn assignee(&self, issue_id: &str) -> LinearResult<Option<User>>;
    async fn creator(&self, issue_id: &str) -> LinearResult<Option<User>>;
    async fn team(&self, issue_id: &str) -> LinearResult<Option<Team>>;
    async fn state(&self, issue_id: &str) -> LinearResult<Option<WorkflowState>>;
    async fn project(&self, issue_id: &str) -> LinearResult<Option<Project>>;
    async fn cycle(&self, issue_id: &str) -> LinearResult<Option<Cycle>>;
    async fn labels(&self, issue_id: &str) -> LinearResult<Vec<Label>>;
    async fn comments(&self, issue_id: &str) -> LinearResult<Vec<Comment>>;
    async fn attachments(&self, issue_id: &str) -> LinearResult<Vec<Attachment>>;
}
