use std::fmt;
use std::sync::Arc;

use crate::client::{IssueSource, PageRequest};
use crate::constants::{
    MAX_TEAM_ISSUE_PAGES, MAX_TEAM_PAGES, MAX_WORKSPACE_PAGES, TEAM_ISSUE_PAGE_SIZE, TEAM_PAGE_SIZE,
    WORKSPACE_PAGE_SIZE,
};
use crate::error::{LinearError, LinearResult};
use crate::identifier::IssueIdentifier;
use crate::logging::{log_debug, log_info, log_warn};
use crate::models::{Issue, IssueNode, Team};

/// One bounded way of locating an issue, tried in [`Strategy::ORDER`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// A single lookup by identifier.
    Direct,
    /// Find the owning team by key, then scan that team's issues.
    TeamScoped,
    /// Page through every issue in the workspace.
    WorkspaceScan,
}

impl Strategy {
    pub const ORDER: [Strategy; 3] = [Strategy::Direct, Strategy::TeamScoped, Strategy::WorkspaceScan];

    /// Fallback strategies turn errors into misses; the last one reports them.
    fn swallows_errors(&self) -> bool {
        !matches!(self, Strategy::WorkspaceScan)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Direct => write!(f, "direct lookup"),
            Strategy::TeamScoped => write!(f, "team-scoped search"),
            Strategy::WorkspaceScan => write!(f, "workspace scan"),
        }
    }
}

/// Outcome of a single strategy.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup {
    Found(IssueNode),
    Miss,
}

/// Resolves issue identifiers against an [`IssueSource`].
///
/// The remote API gives no guarantee that a lookup by identifier succeeds,
/// so the resolver falls back to progressively more expensive searches,
/// each capped by a fixed number of pages.
pub struct IssueResolver<S: IssueSource + ?Sized> {
    source: Arc<S>,
}

impl<S: IssueSource + ?Sized> Clone for IssueResolver<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
        }
    }
}

impl<S: IssueSource + ?Sized> IssueResolver<S> {
    pub fn new(source: Arc<S>) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &Arc<S> {
        &self.source
    }

    pub fn is_configured(&self) -> bool {
        self.source.is_configured()
    }

    /// Resolve an identifier to a fully hydrated issue.
    ///
    /// `Ok(None)` means every strategy ran without finding the issue.
    pub async fn resolve(&self, identifier: &IssueIdentifier) -> LinearResult<Option<Issue>> {
        if !self.source.is_configured() {
            return Err(LinearError::NotConfigured);
        }

        for strategy in Strategy::ORDER {
            log_debug(&format!("Trying {} for {}", strategy, identifier));

            match self.attempt(strategy, identifier).await {
                Ok(Lookup::Found(node)) => {
                    log_info(&format!("Found {} via {}", identifier, strategy));
                    return Ok(Some(self.hydrate(node).await));
                }
                Ok(Lookup::Miss) => {
                    log_debug(&format!("{} missed {}", strategy, identifier));
                }
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) if strategy.swallows_errors() => {
                    log_debug(&format!("{} failed for {}: {}", strategy, identifier, e));
                }
                Err(e) => {
                    log_warn(&format!("{} failed for {}: {}", strategy, identifier, e));
                    return Err(LinearError::ApiError(format!(
                        "Failed to fetch issue {}: {}",
                        identifier, e
                    )));
                }
            }
        }

        log_warn(&format!("Issue not found after all search strategies: {}", identifier));
        Ok(None)
    }

    pub async fn attempt(&self, strategy: Strategy, identifier: &IssueIdentifier) -> LinearResult<Lookup> {
        match strategy {
            Strategy::Direct => {
                let node = self.source.issue(identifier.as_str()).await?;
                Ok(Lookup::Found(node))
            }
            Strategy::TeamScoped => self.team_scoped(identifier).await,
            Strategy::WorkspaceScan => self.workspace_scan(identifier).await,
        }
    }

    async fn team_scoped(&self, identifier: &IssueIdentifier) -> LinearResult<Lookup> {
        let team_key = identifier.team_key();
        let team = match self.find_team_by_key(team_key).await? {
            Some(team) => team,
            None => {
                log_debug(&format!("Team not found for key: {}", team_key));
                return Ok(Lookup::Miss);
            }
        };

        let issues = self.team_issues(&team.id).await?;
        match issues.into_iter().find(|issue| issue.identifier == identifier.as_str()) {
            Some(node) => Ok(Lookup::Found(node)),
            None => {
                log_debug(&format!("Issue {} not in team {} issues", identifier, team.name));
                Ok(Lookup::Miss)
            }
        }
    }

    /// Find a team by key, paging through at most `MAX_TEAM_PAGES` pages.
    pub async fn find_team_by_key(&self, team_key: &str) -> LinearResult<Option<Team>> {
        let mut page = self.source.teams(PageRequest::first(TEAM_PAGE_SIZE)).await?;
        let mut pages_fetched = 1;

        loop {
            let cursor = page.next_cursor().map(str::to_string);

            if let Some(team) = page.nodes.into_iter().find(|team| team.key == team_key) {
                log_debug(&format!("Found team {} ({}) on page {}", team.name, team.key, pages_fetched));
                return Ok(Some(team));
            }

            let cursor = match cursor {
                Some(cursor) => cursor,
                None => return Ok(None),
            };

            if pages_fetched >= MAX_TEAM_PAGES {
                log_warn(&format!(
                    "Reached maximum team page limit ({}), search may be incomplete",
                    MAX_TEAM_PAGES
                ));
                return Ok(None);
            }

            page = self.source.teams(PageRequest::after(TEAM_PAGE_SIZE, cursor)).await?;
            pages_fetched += 1;
        }
    }

    /// Every issue of a team, up to `MAX_TEAM_ISSUE_PAGES` pages.
    pub async fn team_issues(&self, team_id: &str) -> LinearResult<Vec<IssueNode>> {
        let mut all_issues = Vec::new();
        let mut request = PageRequest::first(TEAM_ISSUE_PAGE_SIZE);

        for page_number in 1..=MAX_TEAM_ISSUE_PAGES {
            let page = self.source.issues(request, Some(team_id)).await?;
            let cursor = page.next_cursor().map(str::to_string);
            all_issues.extend(page.nodes);

            match cursor {
                Some(cursor) => request = PageRequest::after(TEAM_ISSUE_PAGE_SIZE, cursor),
                None => {
                    log_debug(&format!(
                        "Retrieved {} issues for team {} in {} pages",
                        all_issues.len(),
                        team_id,
                        page_number
                    ));
                    return Ok(all_issues);
                }
            }
        }

        log_warn(&format!(
            "Reached maximum team issue page limit ({}), search may be incomplete",
            MAX_TEAM_ISSUE_PAGES
        ));
        Ok(all_issues)
    }

    async fn workspace_scan(&self, identifier: &IssueIdentifier) -> LinearResult<Lookup> {
        let mut request = PageRequest::first(WORKSPACE_PAGE_SIZE);

        for page_number in 1..=MAX_WORKSPACE_PAGES {
            let page = self.source.issues(request, None).await?;
            let cursor = page.next_cursor().map(str::to_string);

            if let Some(node) = page.nodes.into_iter().find(|issue| issue.identifier == identifier.as_str()) {
                log_debug(&format!("Found {} on workspace page {}", identifier, page_number));
                return Ok(Lookup::Found(node));
            }

            match cursor {
                Some(cursor) => request = PageRequest::after(WORKSPACE_PAGE_SIZE, cursor),
                None => return Ok(Lookup::Miss),
            }
        }

        log_warn(&format!(
            "Reached maximum workspace page limit ({}), search incomplete",
            MAX_WORKSPACE_PAGES
        ));
        Ok(Lookup::Miss)
    }

    /// Fetch every relation of an issue. A relation that fails to load is
    /// left absent; hydration itself never fails.
    pub async fn hydrate(&self, node: IssueNode) -> Issue {
        let id = node.id.clone();
        let source = &self.source;

        let (assignee, creator, team, state, project, cycle, labels, comments, attachments) = tokio::join!(
            source.assignee(&id),
            source.creator(&id),
            source.team(&id),
            source.state(&id),
            source.project(&id),
            source.cycle(&id),
            source.labels(&id),
            source.comments(&id),
            source.attachments(&id),
        );

        let mut issue = Issue::from_node(node);
        let identifier = issue.identifier.clone();

        issue.assignee = relation(&identifier, "assignee", assignee).flatten();
        issue.creator = relation(&identifier, "creator", creator).flatten();
        issue.team = relation(&identifier, "team", team).flatten();
        issue.state = relation(&identifier, "state", state).flatten();
        issue.project = relation(&identifier, "project", project).flatten();
        issue.cycle = relation(&identifier, "cycle", cycle).flatten();
        issue.labels = relation(&identifier, "labels", labels).unwrap_or_default();
        issue.comments = relation(&identifier, "comments", comments).unwrap_or_default();
        issue.attachments = relation(&identifier, "attachments", attachments).unwrap_or_default();

        issue
    }
}

fn relation<T>(identifier: &str, field: &str, result: LinearResult<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            log_debug(&format!("Could not load {} for {}: {}", field, identifier, e));
            None
        }
    }
}
