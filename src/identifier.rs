use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use crate::error::LinearError;

lazy_static! {
    // 1-10 uppercase letters, a dash, one or more ASCII digits.
    static ref IDENTIFIER_PATTERN: Regex = Regex::new(r"^([A-Z]{1,10})-[0-9]+$").unwrap();
}

pub fn is_valid_issue_identifier(identifier: &str) -> bool {
    IDENTIFIER_PATTERN.is_match(identifier)
}

/// A validated issue key such as `ENG-123`.
///
/// The only way to build one is through validation, so the resolver never
/// sees a malformed key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct IssueIdentifier(String);

impl IssueIdentifier {
    pub fn parse(candidate: &str) -> Option<Self> {
        if is_valid_issue_identifier(candidate) {
            Some(IssueIdentifier(candidate.to_string()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The owning team's key: the letters before the dash.
    pub fn team_key(&self) -> &str {
        self.0.split('-').next().unwrap_or(&self.0)
    }
}

impl FromStr for IssueIdentifier {
    type Err = LinearError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IssueIdentifier::parse(s)
            .ok_or_else(|| LinearError::InvalidInput(format!("Invalid issue identifier: {}", s)))
    }
}

impl fmt::Display for IssueIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for IssueIdentifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
