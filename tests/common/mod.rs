#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use linear_embed::client::{IssueSource, PageRequest};
use linear_embed::error::{LinearError, LinearResult};
use linear_embed::models::*;

/// Every remote call the fake received, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Direct(String),
    Teams(PageRequest),
    Issues { page: PageRequest, team_id: Option<String> },
    Relation(&'static str, String),
}

/// In-memory issue source with cursor pagination and a call ledger.
///
/// Page `n` is served for cursor `cursor-n`. With `endless` set, pages past
/// the configured ones are empty but still report a next page.
pub struct FakeSource {
    pub configured: bool,
    pub direct: Option<IssueNode>,
    pub fatal_direct: bool,
    pub team_pages: Vec<Vec<Team>>,
    pub team_issue_pages: Vec<Vec<IssueNode>>,
    pub workspace_pages: Vec<Vec<IssueNode>>,
    pub endless: bool,
    pub fail_teams: bool,
    pub fail_workspace: bool,
    pub assignee: Option<User>,
    pub state: Option<WorkflowState>,
    pub labels: Vec<Label>,
    pub failing_relations: HashSet<&'static str>,
    calls: Mutex<Vec<Call>>,
}

impl FakeSource {
    pub fn new() -> Self {
        Self {
            configured: true,
            direct: None,
            fatal_direct: false,
            team_pages: Vec::new(),
            team_issue_pages: Vec::new(),
            workspace_pages: Vec::new(),
            endless: false,
            fail_teams: false,
            fail_workspace: false,
            assignee: None,
            state: None,
            labels: Vec::new(),
            failing_relations: HashSet::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn unconfigured() -> Self {
        Self {
            configured: false,
            ..Self::new()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    pub fn direct_calls(&self) -> usize {
        self.calls().iter().filter(|c| matches!(c, Call::Direct(_))).count()
    }

    pub fn team_calls(&self) -> Vec<PageRequest> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Teams(page) => Some(page),
                _ => None,
            })
            .collect()
    }

    pub fn team_issue_calls(&self) -> Vec<PageRequest> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Issues { page, team_id: Some(_) } => Some(page),
                _ => None,
            })
            .collect()
    }

    pub fn workspace_calls(&self) -> Vec<PageRequest> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Issues { page, team_id: None } => Some(page),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn page<T: Clone>(&self, pages: &[Vec<T>], request: &PageRequest) -> Connection<T> {
        let index = request
            .after
            .as_deref()
            .and_then(|cursor| cursor.strip_prefix("cursor-"))
            .and_then(|n| n.parse::<usize>().ok())
            .unwrap_or(0);

        Connection {
            nodes: pages.get(index).cloned().unwrap_or_default(),
            page_info: PageInfo {
                has_next_page: self.endless || index + 1 < pages.len(),
                end_cursor: Some(format!("cursor-{}", index + 1)),
            },
        }
    }

    fn relation<T>(&self, field: &'static str, issue_id: &str, value: T) -> LinearResult<T> {
        self.record(Call::Relation(field, issue_id.to_string()));
        if self.failing_relations.contains(field) {
            return Err(LinearError::ApiError(format!("{} unavailable", field)));
        }
        Ok(value)
    }
}

#[async_trait]
impl IssueSource for FakeSource {
    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn viewer(&self) -> LinearResult<User> {
        Ok(user("viewer", "Viewer"))
    }

    async fn issue(&self, identifier: &str) -> LinearResult<IssueNode> {
        self.record(Call::Direct(identifier.to_string()));
        if self.fatal_direct {
            return Err(LinearError::NotConfigured);
        }
        match &self.direct {
            Some(node) if node.identifier == identifier => Ok(node.clone()),
            _ => Err(LinearError::GraphQLError("Entity not found: Issue".to_string())),
        }
    }

    async fn teams(&self, page: PageRequest) -> LinearResult<Connection<Team>> {
        self.record(Call::Teams(page.clone()));
        if self.fail_teams {
            return Err(LinearError::ApiError("teams unavailable".to_string()));
        }
        Ok(self.page(&self.team_pages, &page))
    }

    async fn issues(&self, page: PageRequest, team_id: Option<&str>) -> LinearResult<Connection<IssueNode>> {
        self.record(Call::Issues {
            page: page.clone(),
            team_id: team_id.map(str::to_string),
        });
        match team_id {
            Some(_) => Ok(self.page(&self.team_issue_pages, &page)),
            None if self.fail_workspace => Err(LinearError::ApiError("HTTP error: 502 Bad Gateway".to_string())),
            None => Ok(self.page(&self.workspace_pages, &page)),
        }
    }

    async fn assignee(&self, issue_id: &str) -> LinearResult<Option<User>> {
        self.relation("assignee", issue_id, self.assignee.clone())
    }

    async fn creator(&self, issue_id: &str) -> LinearResult<Option<User>> {
        self.relation("creator", issue_id, None)
    }

    async fn team(&self, issue_id: &str) -> LinearResult<Option<Team>> {
        self.relation("team", issue_id, None)
    }

    async fn state(&self, issue_id: &str) -> LinearResult<Option<WorkflowState>> {
        self.relation("state", issue_id, self.state.clone())
    }

    async fn project(&self, issue_id: &str) -> LinearResult<Option<Project>> {
        self.relation("project", issue_id, None)
    }

    async fn cycle(&self, issue_id: &str) -> LinearResult<Option<Cycle>> {
        self.relation("cycle", issue_id, None)
    }

    async fn labels(&self, issue_id: &str) -> LinearResult<Vec<Label>> {
        self.relation("labels", issue_id, self.labels.clone())
    }

    async fn comments(&self, issue_id: &str) -> LinearResult<Vec<Comment>> {
        self.relation("comments", issue_id, Vec::new())
    }

    async fn attachments(&self, issue_id: &str) -> LinearResult<Vec<Attachment>> {
        self.relation("attachments", issue_id, Vec::new())
    }
}

pub fn node(identifier: &str) -> IssueNode {
    IssueNode {
        id: format!("uuid-{}", identifier.to_lowercase()),
        identifier: identifier.to_string(),
        title: format!("Issue {}", identifier),
        description: Some("Something to do".to_string()),
        priority: 2,
        created_at: "2024-03-01T10:00:00.000Z".to_string(),
        updated_at: "2024-03-02T10:00:00.000Z".to_string(),
        completed_at: None,
        due_date: None,
        estimate: Some(3.0),
        url: None,
        branch_name: Some(format!("{}-branch", identifier.to_lowercase())),
    }
}

pub fn team(key: &str) -> Team {
    Team {
        id: format!("team-{}", key.to_lowercase()),
        name: format!("Team {}", key),
        key: key.to_string(),
        description: None,
    }
}

pub fn user(id: &str, name: &str) -> User {
    User {
        id: id.to_string(),
        name: name.to_string(),
        display_name: Some(name.to_lowercase()),
        email: None,
    }
}

pub fn started_state() -> WorkflowState {
    WorkflowState {
        id: "state-started".to_string(),
        name: "In Progress".to_string(),
        state_type: "started".to_string(),
    }
}
