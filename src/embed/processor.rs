use std::sync::Arc;

use super::cache::IssueCache;
use super::options::EmbedOptions;
use super::parser::parse_embed_source;
use crate::client::IssueSource;
use crate::error::{LinearError, LinearResult};
use crate::identifier::IssueIdentifier;
use crate::logging::{log_debug, log_error, log_info};
use crate::models::Issue;
use crate::resolver::IssueResolver;

/// What a renderer should show for one embed block.
#[derive(Debug, Clone, PartialEq)]
pub enum EmbedOutcome {
    InvalidSyntax,
    NotConfigured,
    NotFound { identifier: IssueIdentifier },
    Failed { identifier: IssueIdentifier, message: String },
    Ready { issue: Issue, options: EmbedOptions },
}

impl EmbedOutcome {
    /// The text shown in place of an embed that could not be rendered.
    pub fn message(&self) -> Option<String> {
        match self {
            EmbedOutcome::InvalidSyntax => Some("Invalid Linear issue embed syntax".to_string()),
            EmbedOutcome::NotConfigured => Some("Linear API not configured".to_string()),
            EmbedOutcome::NotFound { identifier } => Some(format!("Issue {} not found", identifier)),
            EmbedOutcome::Failed { identifier, message } => {
                Some(format!("Failed to load issue {}: {}", identifier, message))
            }
            EmbedOutcome::Ready { .. } => None,
        }
    }
}

/// Turns embed block bodies into renderable issues: parse, then serve from
/// the cache or resolve and cache.
pub struct EmbedProcessor<S: IssueSource + ?Sized> {
    resolver: IssueResolver<S>,
    cache: Arc<IssueCache>,
}

impl<S: IssueSource + ?Sized> EmbedProcessor<S> {
    pub fn new(resolver: IssueResolver<S>) -> Self {
        Self::with_cache(resolver, Arc::new(IssueCache::new()))
    }

    pub fn with_cache(resolver: IssueResolver<S>, cache: Arc<IssueCache>) -> Self {
        Self { resolver, cache }
    }

    pub fn resolver(&self) -> &IssueResolver<S> {
        &self.resolver
    }

    pub fn cache(&self) -> &Arc<IssueCache> {
        &self.cache
    }

    pub async fn process(&self, source: &str) -> EmbedOutcome {
        log_debug(&format!("Processing embed source: {:?}", source));

        let parsed = match parse_embed_source(source) {
            Some(parsed) => parsed,
            None => {
                log_error(&format!("Failed to parse embed source: {:?}", source));
                return EmbedOutcome::InvalidSyntax;
            }
        };

        let options = EmbedOptions::from_overrides(&parsed.options);
        let identifier = parsed.identifier;

        match self.fetch_issue(&identifier).await {
            Ok(Some(issue)) => EmbedOutcome::Ready { issue, options },
            Ok(None) => EmbedOutcome::NotFound { identifier },
            Err(LinearError::NotConfigured) => EmbedOutcome::NotConfigured,
            Err(e) => {
                log_error(&format!("Error loading issue {}: {}", identifier, e));
                EmbedOutcome::Failed {
                    identifier,
                    message: e.to_string(),
                }
            }
        }
    }

    /// Cached issue if still fresh, otherwise a resolution that refills the cache.
    pub async fn fetch_issue(&self, identifier: &IssueIdentifier) -> LinearResult<Option<Issue>> {
        if let Some(issue) = self.cache.get(identifier) {
            log_debug(&format!("Found issue in cache: {}", identifier));
            return Ok(Some(issue));
        }

        if !self.resolver.is_configured() {
            return Err(LinearError::NotConfigured);
        }

        let issue = self.resolver.resolve(identifier).await?;
        if let Some(issue) = &issue {
            self.cache.insert(identifier.clone(), issue.clone());
            self.schedule_eviction();
            log_info(&format!("Cached {} for {:?}", identifier, self.cache.ttl()));
        }
        Ok(issue)
    }

    /// Drop the cached copy and resolve again.
    pub async fn refresh_issue(&self, identifier: &IssueIdentifier) -> LinearResult<Option<Issue>> {
        self.cache.remove(identifier);
        self.fetch_issue(identifier).await
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Sweep expired entries once the lifetime of the entry just written has
    /// passed. Without a runtime, expiry is still enforced on read.
    fn schedule_eviction(&self) {
        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            let cache = Arc::clone(&self.cache);
            let ttl = cache.ttl();
            handle.spawn(async move {
                tokio::time::sleep(ttl).await;
                let evicted = cache.evict_expired();
                if evicted > 0 {
                    log_debug(&format!("Cache expired for {} issue(s)", evicted));
                }
            });
        }
    }
}
