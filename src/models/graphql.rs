use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub struct GraphQLResponse<T> {
    pub data: Option<T>,
    pub errors: Option<Vec<GraphQLError>>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQLError {
    pub message: String,
}

// Viewer data structures
#[derive(Debug, Deserialize)]
pub struct ViewerData {
    pub viewer: super::User,
}

// Issue data structures
#[derive(Debug, Deserialize)]
pub struct IssueData {
    pub issue: super::IssueNode,
}

#[derive(Debug, Deserialize)]
pub struct IssuesData {
    pub issues: super::Connection<super::IssueNode>,
}

/// An issue with a single related field selected; the field is read by name.
#[derive(Debug, Deserialize)]
pub struct IssueRelationData {
    pub issue: Option<serde_json::Map<String, Value>>,
}

// Team data structures
#[derive(Debug, Deserialize)]
pub struct TeamsData {
    pub teams: super::Connection<super::Team>,
}

/// `{ nodes: [...] }` wrapper for to-many relations.
#[derive(Debug, Deserialize)]
pub struct Nodes<T> {
    pub nodes: Vec<T>,
}
