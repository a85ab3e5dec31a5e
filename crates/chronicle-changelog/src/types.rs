//! Changelog types

use std::collections::BTreeMap;

use chrono::{TimeZone, Utc};
use serde::{Deserialize, Serialize};

use chronicle_core::ReleaseTag;

/// A commit parsed from its message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Commit {
    /// Abbreviated commit hash
    pub hash: String,
    /// Commit time as Unix seconds
    pub timestamp: i64,
    /// Commit type (feature, bugfix, ...) when the header follows the convention
    #[serde(rename = "type")]
    pub commit_type: Option<String>,
    /// Scope, in parentheses after the type
    pub scope: Option<String>,
    /// Summary after the `type(scope): ` prefix
    pub subject: Option<String>,
    /// First line of the message
    pub header: String,
    /// Message body, without notes
    pub body: Option<String>,
    /// Breaking-change notes
    pub notes: Vec<Note>,
    /// Issue references mentioned in the message
    pub references: Vec<Reference>,
    /// Release containing this commit, once resolved
    pub tag: Option<ReleaseTag>,
}

impl Commit {
    /// Whether the commit carries at least one breaking-change note
    pub fn is_breaking(&self) -> bool {
        !self.notes.is_empty()
    }

    /// Attach the resolved release tag
    pub fn with_tag(mut self, tag: ReleaseTag) -> Self {
        debug_assert!(self.tag.is_none(), "commit tag resolved twice");
        self.tag = Some(tag);
        self
    }

    /// Commit date as `YYYY-MM-DD` (UTC)
    pub fn date(&self) -> Option<String> {
        Utc.timestamp_opt(self.timestamp, 0)
            .single()
            .map(|d| d.format("%Y-%m-%d").to_string())
    }
}

/// A breaking-change note
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Note keyword (`BREAKING CHANGE`)
    pub title: String,
    /// Note text
    pub text: String,
}

/// An issue reference such as `closes #12` or `owner/repo#7`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    /// Action keyword preceding the reference, lower-cased
    pub action: Option<String>,
    /// Repository owner for cross-repository references
    pub owner: Option<String>,
    /// Repository name for cross-repository references
    pub repository: Option<String>,
    /// Issue prefix (`#`)
    pub prefix: String,
    /// Issue number
    pub issue: String,
}

impl Reference {
    /// Reference as written in a changelog: `#12` or `owner/repo#12`
    pub fn label(&self) -> String {
        match (&self.owner, &self.repository) {
            (Some(owner), Some(repository)) => {
                format!("{}/{}{}{}", owner, repository, self.prefix, self.issue)
            }
            _ => format!("{}{}", self.prefix, self.issue),
        }
    }
}

/// Commits per release
pub type ReleaseGroups = BTreeMap<ReleaseTag, Vec<Commit>>;

/// One rendered release
#[derive(Debug, Clone, Serialize)]
pub struct Release {
    /// Release tag
    pub tag: ReleaseTag,
    /// Release rendered just before this one (the next older release)
    pub previous_tag: Option<ReleaseTag>,
    /// Commits, newest first
    pub commits: Vec<Commit>,
}

/// Result of a changelog run
#[derive(Debug, Clone, Serialize)]
pub struct Changelog {
    /// Rendered document, newest release first
    pub document: String,
    /// Releases, newest first
    pub releases: Vec<Release>,
}

impl Changelog {
    /// Whether no release was rendered
    pub fn is_empty(&self) -> bool {
        self.releases.is_empty()
    }

    /// Total number of commits across releases
    pub fn commit_count(&self) -> usize {
        self.releases.iter().map(|r| r.commits.len()).sum()
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn test_is_breaking() {
        let plain = commit("a1", "feature", 100);
        assert!(!plain.is_breaking());
        assert!(breaking(plain).is_breaking());
    }

    #[test]
    fn test_date() {
        let c = commit("a1", "feature", 1_700_000_000);
        assert_eq!(c.date().as_deref(), Some("2023-11-14"));
    }

    #[test]
    fn test_reference_label() {
        let local = Reference {
            action: Some("closes".to_string()),
            owner: None,
            repository: None,
            prefix: "#".to_string(),
            issue: "12".to_string(),
        };
        assert_eq!(local.label(), "#12");

        let cross = Reference {
            owner: Some("acme".to_string()),
            repository: Some("widgets".to_string()),
            ..local
        };
        assert_eq!(cross.label(), "acme/widgets#12");
    }

    #[test]
    fn test_changelog_counts() {
        let changelog = Changelog {
            document: String::new(),
            releases: vec![Release {
                tag: tag("1.0.0"),
                previous_tag: None,
                commits: vec![commit("a1", "feature", 1), commit("b2", "bugfix", 2)],
            }],
        };
        assert!(!changelog.is_empty());
        assert_eq!(changelog.commit_count(), 2);
    }
}
