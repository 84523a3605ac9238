use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use super::source::{IssueSource, PageRequest};
use crate::constants::{
    ATTACHMENT_FIELDS, COMMENT_FIELDS, CYCLE_FIELDS, ISSUE_NODE_FIELDS, LABEL_FIELDS, LINEAR_API_URL,
    PROJECT_FIELDS, REQUEST_TIMEOUT, STATE_FIELDS, TEAM_FIELDS, USER_FIELDS,
};
use crate::error::{LinearError, LinearResult};
use crate::logging::log_debug;
use crate::models::graphql::{IssueData, IssueRelationData, IssuesData, Nodes, TeamsData, ViewerData};
use crate::models::*;

/// GraphQL client for the Linear API.
///
/// A client built from an empty key is "not configured": every remote call
/// fails with [`LinearError::NotConfigured`] before touching the network.
pub struct LinearClient {
    client: reqwest::Client,
    api_url: String,
    configured: bool,
}

impl LinearClient {
    pub fn new(api_key: impl Into<String>) -> LinearResult<Self> {
        Self::with_url(api_key, LINEAR_API_URL)
    }

    pub fn with_url(api_key: impl Into<String>, api_url: &str) -> LinearResult<Self> {
        let api_key = api_key.into();
        let configured = !api_key.trim().is_empty();

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if configured {
            let value = HeaderValue::from_str(api_key.trim())
                .map_err(|_| LinearError::ConfigError("Invalid API key format".to_string()))?;
            headers.insert(AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            api_url: api_url.to_string(),
            configured,
        })
    }

    async fn execute_query<T: DeserializeOwned>(&self, query: &str, variables: Option<Value>) -> LinearResult<T> {
        if !self.configured {
            return Err(LinearError::NotConfigured);
        }

        let body = match variables {
            Some(vars) => json!({ "query": query, "variables": vars }),
            None => json!({ "query": query }),
        };

        let response = self.client.post(&self.api_url).json(&body).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            return Err(LinearError::ApiError(format!(
                "API request failed with status {}: {}",
                status, error_text
            )));
        }

        let graphql_response: GraphQLResponse<T> = response.json().await?;

        if let Some(errors) = graphql_response.errors {
            let error_messages: Vec<String> = errors.iter().map(|e| e.message.clone()).collect();
            return Err(LinearError::GraphQLError(error_messages.join(", ")));
        }

        graphql_response
            .data
            .ok_or_else(|| LinearError::GraphQLError("No data returned from GraphQL query".to_string()))
    }

    /// Fetch one related field of an issue. A null relation yields `None`.
    async fn fetch_relation<T: DeserializeOwned>(
        &self,
        issue_id: &str,
        field: &str,
        selection: &str,
    ) -> LinearResult<Option<T>> {
        let query = format!(
            r#"
            query($id: String!) {{
                issue(id: $id) {{
                    {} {{{}}}
                }}
            }}
        "#,
            field, selection
        );

        log_debug(&format!("Fetching {} for issue {}", field, issue_id));

        let data: IssueRelationData = self.execute_query(&query, Some(json!({ "id": issue_id }))).await?;
        let value = data
            .issue
            .and_then(|mut issue| issue.remove(field))
            .unwrap_or(Value::Null);

        if value.is_null() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_value(value)?))
    }

    async fn fetch_nodes<T: DeserializeOwned>(&self, issue_id: &str, field: &str, selection: &str) -> LinearResult<Vec<T>> {
        let nodes: Option<Nodes<T>> = self.fetch_relation(issue_id, field, selection).await?;
        Ok(nodes.map(|n| n.nodes).unwrap_or_default())
    }
}

#[async_trait]
impl IssueSource for LinearClient {
    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn viewer(&self) -> LinearResult<User> {
        let query = format!(
            r#"
            query {{
                viewer {{{}}}
            }}
        "#,
            USER_FIELDS
        );

        let data: ViewerData = self.execute_query(&query, None).await?;
        Ok(data.viewer)
    }

    async fn issue(&self, identifier: &str) -> LinearResult<IssueNode> {
        let query = format!(
            r#"
            query($identifier: String!) {{
                issue(id: $identifier) {{{}}}
            }}
        "#,
            ISSUE_NODE_FIELDS
        );

        let variables = json!({ "identifier": identifier });

        let data: IssueData = self.execute_query(&query, Some(variables)).await?;
        Ok(data.issue)
    }

    async fn teams(&self, page: PageRequest) -> LinearResult<Connection<Team>> {
        let query = format!(
            r#"
            query($first: Int, $after: String) {{
                teams(first: $first, after: $after) {{
                    nodes {{{}}}
                    pageInfo {{
                        hasNextPage
                        endCursor
                    }}
                }}
            }}
        "#,
            TEAM_FIELDS
        );

        let variables = json!({
            "first": page.first,
            "after": page.after,
        });

        let data: TeamsData = self.execute_query(&query, Some(variables)).await?;
        Ok(data.teams)
    }

    async fn issues(&self, page: PageRequest, team_id: Option<&str>) -> LinearResult<Connection<IssueNode>> {
        let query = format!(
            r#"
            query($filter: IssueFilter, $first: Int, $after: String) {{
                issues(filter: $filter, first: $first, after: $after) {{
                    nodes {{{}}}
                    pageInfo {{
                        hasNextPage
                        endCursor
                    }}
                }}
            }}
        "#,
            ISSUE_NODE_FIELDS
        );

        let filter = team_id.map(|id| json!({ "team": { "id": { "eq": id } } }));
        let variables = json!({
            "filter": filter,
            "first": page.first,
            "after": page.after,
        });

        let data: IssuesData = self.execute_query(&query, Some(variables)).await?;
        Ok(data.issues)
    }

    async fn assignee(&self, issue_id: &str) -> LinearResult<Option<User>> {
        self.fetch_relation(issue_id, "assignee", USER_FIELDS).await
    }

    async fn creator(&self, issue_id: &str) -> LinearResult<Option<User>> {
        self.fetch_relation(issue_id, "creator", USER_FIELDS).await
    }

    async fn team(&self, issue_id: &str) -> LinearResult<Option<Team>> {
        self.fetch_relation(issue_id, "team", TEAM_FIELDS).await
    }

    async fn state(&self, issue_id: &str) -> LinearResult<Option<WorkflowState>> {
        self.fetch_relation(issue_id, "state", STATE_FIELDS).await
    }

    async fn project(&self, issue_id: &str) -> LinearResult<Option<Project>> {
        self.fetch_relation(issue_id, "project", PROJECT_FIELDS).await
    }

    async fn cycle(&self, issue_id: &str) -> LinearResult<Option<Cycle>> {
        self.fetch_relation(issue_id, "cycle", CYCLE_FIELDS).await
    }

    async fn labels(&self, issue_id: &str) -> LinearResult<Vec<Label>> {
        self.fetch_nodes(issue_id, "labels", LABEL_FIELDS).await
    }

    async fn comments(&self, issue_id: &str) -> LinearResult<Vec<Comment>> {
        self.fetch_nodes(issue_id, "comments", COMMENT_FIELDS).await
    }

    async fn attachments(&self, issue_id: &str) -> LinearResult<Vec<Attachment>> {
        self.fetch_nodes(issue_id, "attachments", ATTACHMENT_FIELDS).await
    }
}
