use std::time::Duration;

pub const LINEAR_API_URL: &str = "https://api.linear.app/graphql";
pub const LINEAR_ISSUE_URL: &str = "https://linear.app/issue";
pub const CONFIG_FILE: &str = ".linear-embed-config.json";

/// Code-block language the embeds are written in.
pub const EMBED_BLOCK_LANGUAGE: &str = "linear-issue";

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
pub const ISSUE_CACHE_TTL: Duration = Duration::from_secs(5 * 60);

// Page caps bound worst-case API usage per resolution.
pub const TEAM_PAGE_SIZE: u32 = 200;
pub const MAX_TEAM_PAGES: u32 = 20;
pub const TEAM_ISSUE_PAGE_SIZE: u32 = 200;
pub const MAX_TEAM_ISSUE_PAGES: u32 = 20;
pub const WORKSPACE_PAGE_SIZE: u32 = 100;
pub const MAX_WORKSPACE_PAGES: u32 = 50;

pub const DEBUG_ISSUE_LIMIT: u32 = 50;

// Scalar fields returned by direct lookups and issue listings. Related
// entities are fetched separately, one accessor per relation.
pub const ISSUE_NODE_FIELDS: &str = r#"
    id
    identifier
    title
    description
    priority
    createdAt
    updatedAt
    completedAt
    dueDate
    estimate
    url
    branchName
"#;

pub const TEAM_FIELDS: &str = r#"
    id
    name
    key
    description
"#;

pub const USER_FIELDS: &str = r#"
    id
    name
    displayName
    email
"#;

pub const STATE_FIELDS: &str = r#"
    id
    name
    type
"#;

pub const PROJECT_FIELDS: &str = r#"
    id
    name
    description
    state
    progress
"#;

pub const CYCLE_FIELDS: &str = r#"
    id
    name
    number
    completedAt
"#;

pub const LABEL_FIELDS: &str = r#"
    nodes {
        id
        name
        color
    }
"#;

pub const COMMENT_FIELDS: &str = r#"
    nodes {
        id
        body
        createdAt
        user {
            id
            name
        }
    }
"#;

pub const ATTACHMENT_FIELDS: &str = r#"
    nodes {
        id
        title
        url
        subtitle
    }
"#;
