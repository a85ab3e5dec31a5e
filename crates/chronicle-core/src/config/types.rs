//! Configuration types
//!
//! Every struct is `#[serde(default)]`, so a configuration file only needs
//! to name the fields it overrides; everything else keeps its default.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Main configuration for Chronicle
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Changelog content configuration
    pub changelog: ChangelogConfig,

    /// Git configuration
    pub git: GitConfig,

    /// Output targets
    pub output: OutputConfig,
}

/// Changelog configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChangelogConfig {
    /// Commit types that appear in the changelog. Commits carrying a
    /// breaking-change note are kept whatever their type.
    pub include_types: Vec<String>,

    /// Display label for each commit type
    pub type_map: BTreeMap<String, String>,

    /// Repository URL used for commit and compare links
    /// (defaults to the URL of the configured remote)
    pub repo_url: Option<String>,

    /// Template for the compare link between two releases.
    /// Receives `repo_url`, `previous_tag` and `current_tag`.
    pub compare_url: Option<String>,

    /// Issue tracker URL prefix; issue keys such as `ABC-123` found in
    /// commit subjects are linked to `<issue_url><key>`
    pub issue_url: Option<String>,

    /// Heading used for commits not contained in any release yet
    pub unreleased_label: String,

    /// Path to a custom release template
    pub template: Option<PathBuf>,
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        let include_types = ["feature", "bugfix", "perf", "docs", "style"]
            .into_iter()
            .map(String::from)
            .collect();

        let type_map = [
            ("feature", "Features"),
            ("bugfix", "Bug Fixes"),
            ("perf", "Performance Improvements"),
            ("docs", "Documentation"),
            ("style", "Styles"),
            ("refactor", "Code Refactoring"),
            ("test", "Tests"),
            ("build", "Builds"),
            ("ci", "Continuous Integration"),
            ("format", "Code Formatting"),
            ("merge", "Merges"),
            ("version", "Versioning"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        Self {
            include_types,
            type_map,
            repo_url: None,
            compare_url: None,
            issue_url: None,
            unreleased_label: "Unreleased".to_string(),
            template: None,
        }
    }
}

impl ChangelogConfig {
    /// Display label for a commit type, falling back to the type itself
    pub fn type_label<'a>(&'a self, commit_type: &'a str) -> &'a str {
        self.type_map
            .get(commit_type)
            .map(String::as_str)
            .unwrap_or(commit_type)
    }
}

/// Git configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GitConfig {
    /// Remote whose URL is used when `changelog.repo_url` is unset
    pub remote: String,

    /// Maximum number of tag lookups running at the same time
    pub max_concurrent_queries: usize,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            remote: "origin".to_string(),
            max_concurrent_queries: 5,
        }
    }
}

/// Output targets, one list of destination paths per format.
/// An empty list skips the format.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Markdown files, written verbatim
    pub markdown: Vec<PathBuf>,

    /// HTML files
    pub html: Vec<PathBuf>,

    /// Wiki markup files
    pub wiki: Vec<PathBuf>,
}

impl OutputConfig {
    /// Whether no output target is configured
    pub fn is_empty(&self) -> bool {
        self.markdown.is_empty() && self.html.is_empty() && self.wiki.is_empty()
    }
}
