use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::constants::ISSUE_CACHE_TTL;
use crate::identifier::IssueIdentifier;
use crate::models::Issue;

struct CacheEntry {
    issue: Issue,
    stored_at: Instant,
}

/// Resolved issues keyed by identifier, each kept for a fixed lifetime.
///
/// Writes are last-writer-wins; concurrent fetches of the same identifier
/// are not de-duplicated.
pub struct IssueCache {
    ttl: Duration,
    entries: Mutex<HashMap<IssueIdentifier, CacheEntry>>,
}

impl IssueCache {
    pub fn new() -> Self {
        Self::with_ttl(ISSUE_CACHE_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn get(&self, identifier: &IssueIdentifier) -> Option<Issue> {
        let mut entries = self.entries.lock().ok()?;
        let expired = match entries.get(identifier) {
            Some(entry) if entry.stored_at.elapsed() < self.ttl => return Some(entry.issue.clone()),
            Some(_) => true,
            None => false,
        };
        if expired {
            entries.remove(identifier);
        }
        None
    }

    pub fn insert(&self, identifier: IssueIdentifier, issue: Issue) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(
                identifier,
                CacheEntry {
                    issue,
                    stored_at: Instant::now(),
                },
            );
        }
    }

    pub fn remove(&self, identifier: &IssueIdentifier) -> Option<Issue> {
        self.entries
            .lock()
            .ok()
            .and_then(|mut entries| entries.remove(identifier))
            .map(|entry| entry.issue)
    }

    /// Drop every entry past its lifetime. Returns how many were removed.
    pub fn evict_expired(&self) -> usize {
        match self.entries.lock() {
            Ok(mut entries) => {
                let before = entries.len();
                entries.retain(|_, entry| entry.stored_at.elapsed() < self.ttl);
                before - entries.len()
            }
            Err(_) => 0,
        }
    }

    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.clear();
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for IssueCache {
    fn default() -> Self {
        Self::new()
    }
}
