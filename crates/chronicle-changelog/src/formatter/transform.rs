//! Per-commit display transform

use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde::Serialize;

use chronicle_core::config::ChangelogConfig;

use crate::types::{Commit, Reference};

/// Issue tracker keys such as `ABC-123`
static ISSUE_KEY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([A-Z]{3,}-\d+)\b").expect("Invalid regex"));

/// Length of the hash shown in the changelog
const SHORT_HASH_LEN: usize = 7;

/// Title every breaking-change note is listed under
const NOTES_TITLE: &str = "BREAKING CHANGES";

/// A commit as the release template sees it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitView {
    /// Hash shortened for display
    pub hash: String,
    /// Hash as read from the log, for links
    pub full_hash: String,
    /// Display label of the commit type
    #[serde(rename = "type")]
    pub commit_type: Option<String>,
    pub scope: Option<String>,
    pub subject: String,
    pub notes: Vec<NoteView>,
    pub references: Vec<ReferenceView>,
}

/// A breaking-change note as the release template sees it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteView {
    pub title: String,
    pub scope: Option<String>,
    pub text: String,
}

/// An issue reference as the release template sees it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferenceView {
    pub label: String,
    pub issue: String,
    pub owner: Option<String>,
}

/// Prepares a commit for display
pub trait CommitTransform: Send + Sync {
    /// Build the template view of `commit`
    fn transform(&self, commit: &Commit) -> CommitView;
}

/// Default transform
///
/// Maps types to their display labels, hides the `*` scope, shortens the
/// hash, escapes `<` in subjects, links issue keys to the issue tracker and
/// drops references the subject already mentions.
#[derive(Debug, Clone, Default)]
pub struct DisplayTransform {
    config: ChangelogConfig,
}

impl DisplayTransform {
    /// Create a transform from the changelog configuration
    pub fn new(config: &ChangelogConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    fn subject(&self, commit: &Commit) -> String {
        let subject = commit
            .subject
            .as_deref()
            .unwrap_or(&commit.header)
            .replace('<', "&lt;");

        match &self.config.issue_url {
            Some(url) => ISSUE_KEY_REGEX
                .replace_all(&subject, |caps: &Captures| {
                    format!("[{key}]({url}{key})", key = &caps[1], url = url)
                })
                .into_owned(),
            None => subject,
        }
    }
}

impl CommitTransform for DisplayTransform {
    fn transform(&self, commit: &Commit) -> CommitView {
        let scope = commit.scope.clone().filter(|s| s != "*");
        let subject = self.subject(commit);

        let notes = commit
            .notes
            .iter()
            .map(|note| NoteView {
                title: NOTES_TITLE.to_string(),
                scope: scope.clone(),
                text: note.text.clone(),
            })
            .collect();

        let references = commit
            .references
            .iter()
            .filter(|r| !mentions(&subject, &r.label()))
            .map(|r: &Reference| ReferenceView {
                label: r.label(),
                issue: r.issue.clone(),
                owner: r.owner.clone(),
            })
            .collect();

        CommitView {
            hash: commit.hash.chars().take(SHORT_HASH_LEN).collect(),
            full_hash: commit.hash.clone(),
            commit_type: commit
                .commit_type
                .as_deref()
                .map(|t| self.config.type_label(t).to_string()),
            scope,
            subject,
            notes,
            references,
        }
    }
}

/// Whether `text` contains `label` not followed by another digit
fn mentions(text: &str, label: &str) -> bool {
    text.match_indices(label).any(|(start, _)| {
        !text[start + label.len()..].starts_with(|c: char| c.is_ascii_digit())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::fixtures::*;
    use crate::types::Note;

    fn reference(owner: Option<&str>, issue: &str) -> Reference {
        Reference {
            action: None,
            owner: owner.map(String::from),
            repository: owner.map(|_| "widgets".to_string()),
            prefix: "#".to_string(),
            issue: issue.to_string(),
        }
    }

    fn transform() -> DisplayTransform {
        DisplayTransform::new(&ChangelogConfig::default())
    }

    #[test]
    fn test_maps_type_label() {
        let view = transform().transform(&commit("abc", "bugfix", 1));
        assert_eq!(view.commit_type.as_deref(), Some("Bug Fixes"));

        let view = transform().transform(&commit("abc", "chore", 1));
        assert_eq!(view.commit_type.as_deref(), Some("chore"));
    }

    #[test]
    fn test_wildcard_scope_hidden() {
        let mut c = commit("abc", "feature", 1);
        c.scope = Some("*".to_string());
        assert!(transform().transform(&c).scope.is_none());

        c.scope = Some("api".to_string());
        assert_eq!(transform().transform(&c).scope.as_deref(), Some("api"));
    }

    #[test]
    fn test_hash_shortened() {
        let view = transform().transform(&commit("0123456789abcdef", "feature", 1));
        assert_eq!(view.hash, "0123456");
        assert_eq!(view.full_hash, "0123456789abcdef");

        let view = transform().transform(&commit("abc", "feature", 1));
        assert_eq!(view.hash, "abc");
    }

    #[test]
    fn test_subject_escaped() {
        let mut c = commit("abc", "feature", 1);
        c.subject = Some("support <details> blocks".to_string());
        assert_eq!(
            transform().transform(&c).subject,
            "support &lt;details> blocks"
        );
    }

    #[test]
    fn test_issue_keys_linked() {
        let config = ChangelogConfig {
            issue_url: Some("https://issues.example.com/browse/".to_string()),
            ..Default::default()
        };
        let mut c = commit("abc", "bugfix", 1);
        c.subject = Some("fix login loop ABC-123 and AB-1".to_string());

        let view = DisplayTransform::new(&config).transform(&c);
        assert_eq!(
            view.subject,
            "fix login loop [ABC-123](https://issues.example.com/browse/ABC-123) and AB-1"
        );
    }

    #[test]
    fn test_issue_keys_untouched_without_url() {
        let mut c = commit("abc", "bugfix", 1);
        c.subject = Some("fix ABC-123".to_string());
        assert_eq!(transform().transform(&c).subject, "fix ABC-123");
    }

    #[test]
    fn test_references_in_subject_dropped() {
        let mut c = commit("abc", "bugfix", 1);
        c.subject = Some("stop crash (#42)".to_string());
        c.references = vec![
            reference(None, "42"),
            reference(None, "4"),
            reference(Some("acme"), "42"),
        ];

        let labels: Vec<String> = transform()
            .transform(&c)
            .references
            .into_iter()
            .map(|r| r.label)
            .collect();
        assert_eq!(labels, vec!["#4", "acme/widgets#42"]);
    }

    #[test]
    fn test_notes_retitled_with_scope() {
        let mut c = commit("abc", "feature", 1);
        c.scope = Some("api".to_string());
        c.notes.push(Note {
            title: "BREAKING-CHANGE".to_string(),
            text: "drops v1 routes".to_string(),
        });

        let view = transform().transform(&c);
        assert_eq!(
            view.notes,
            vec![NoteView {
                title: "BREAKING CHANGES".to_string(),
                scope: Some("api".to_string()),
                text: "drops v1 routes".to_string(),
            }]
        );
    }

    #[test]
    fn test_untyped_commit_uses_header() {
        let mut c = breaking(commit("abc", "feature", 1));
        c.commit_type = None;
        c.subject = None;
        c.header = "Rewrite storage".to_string();

        let view = transform().transform(&c);
        assert!(view.commit_type.is_none());
        assert_eq!(view.subject, "Rewrite storage");
    }
}
