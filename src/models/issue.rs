use serde::{Deserialize, Serialize};

use super::{Attachment, Comment, Cycle, Project, Team, User};
use crate::constants::LINEAR_ISSUE_URL;

/// Scalar issue fields, as returned by a direct lookup or an issue listing.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueNode {
    pub id: String,
    pub identifier: String,
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub priority: u8,
    pub created_at: String,
    pub updated_at: String,
    #[serde(default)]
    pub completed_at: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub estimate: Option<f64>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub branch_name: Option<String>,
}

/// A fully hydrated issue. Relations that could not be fetched are absent.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub id: String,
    pub identifier: String,
    pub title: String,
    pub description: Option<String>,
    pub priority: u8,
    pub created_at: String,
    pub updated_at: String,
    pub completed_at: Option<String>,
    pub due_date: Option<String>,
    pub estimate: Option<f64>,
    pub url: String,
    pub branch_name: Option<String>,
    pub assignee: Option<User>,
    pub creator: Option<User>,
    pub team: Option<Team>,
    pub state: Option<WorkflowState>,
    pub project: Option<Project>,
    pub cycle: Option<Cycle>,
    pub labels: Vec<Label>,
    pub comments: Vec<Comment>,
    pub attachments: Vec<Attachment>,
}

impl Issue {
    /// Start from the scalar fields with every relation absent.
    pub fn from_node(node: IssueNode) -> Self {
        let url = node
            .url
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| format!("{}/{}", LINEAR_ISSUE_URL, node.identifier));
        let description = node.description.filter(|d| !d.is_empty());

        Issue {
            id: node.id,
            identifier: node.identifier,
            title: node.title,
            description,
            priority: node.priority,
            created_at: node.created_at,
            updated_at: node.updated_at,
            completed_at: node.completed_at,
            due_date: node.due_date,
            estimate: node.estimate.filter(|e| *e > 0.0),
            url,
            branch_name: node.branch_name.filter(|b| !b.is_empty()),
            assignee: None,
            creator: None,
            team: None,
            state: None,
            project: None,
            cycle: None,
            labels: Vec::new(),
            comments: Vec::new(),
            attachments: Vec::new(),
        }
    }

    pub fn state_type(&self) -> &str {
        self.state.as_ref().map(|s| s.state_type.as_str()).unwrap_or("unknown")
    }

    pub fn state_name(&self) -> &str {
        self.state.as_ref().map(|s| s.name.as_str()).unwrap_or("Unknown")
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct WorkflowState {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub state_type: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Label {
    pub id: String,
    pub name: String,
    pub color: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(url: Option<&str>) -> IssueNode {
        IssueNode {
            id: "uuid-1".to_string(),
            identifier: "ENG-42".to_string(),
            title: "Fix login".to_string(),
            description: Some(String::new()),
            priority: 2,
            created_at: "2024-01-01T00:00:00.000Z".to_string(),
            updated_at: "2024-01-02T00:00:00.000Z".to_string(),
            completed_at: None,
            due_date: None,
            estimate: Some(0.0),
            url: url.map(str::to_string),
            branch_name: None,
        }
    }

    #[test]
    fn test_from_node_fills_default_url() {
        let issue = Issue::from_node(node(None));
        assert_eq!(issue.url, "https://linear.app/issue/ENG-42");
        assert_eq!(issue.description, None);
        assert_eq!(issue.estimate, None);
        assert!(issue.assignee.is_none());
        assert!(issue.labels.is_empty());
    }

    #[test]
    fn test_from_node_keeps_remote_url() {
        let issue = Issue::from_node(node(Some("https://linear.app/acme/issue/ENG-42/fix-login")));
        assert_eq!(issue.url, "https://linear.app/acme/issue/ENG-42/fix-login");
        assert_eq!(issue.state_name(), "Unknown");
    }

    #[test]
    fn test_node_deserializes_from_api_shape() {
        let json = r#"{
            "id": "uuid-1",
            "identifier": "ENG-42",
            "title": "Fix login",
            "description": null,
            "priority": 3,
            "createdAt": "2024-01-01T00:00:00.000Z",
            "updatedAt": "2024-01-02T00:00:00.000Z",
            "branchName": "eng-42-fix-login"
        }"#;
        let node: IssueNode = serde_json::from_str(json).unwrap();
        assert_eq!(node.priority, 3);
        assert_eq!(node.branch_name.as_deref(), Some("eng-42-fix-login"));
        assert!(node.due_date.is_none());
    }
}
