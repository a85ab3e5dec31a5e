//! Changelog generation

use tracing::{info, instrument};

use chronicle_core::config::ChangelogConfig;
use chronicle_core::Result;
use chronicle_git::{CommitRecord, TagResolver};

use crate::filter::{filter_commits, group_by_tag};
use crate::formatter::{ReleaseFormatter, TemplateFormatter};
use crate::limiter::QueryLimiter;
use crate::ordering::order_tags;
use crate::parser::{CommitParser, ConventionalParser};
use crate::renderer::{render_releases, RenderOptions};
use crate::resolve::resolve_tags;
use crate::types::{Changelog, Commit};

/// Changelog generator
///
/// Owns the tag resolver and the limiter bounding how many tag lookups run
/// at once, plus the parser and formatter used for every release.
pub struct ChangelogGenerator<R: TagResolver> {
    resolver: R,
    limiter: QueryLimiter,
    parser: Box<dyn CommitParser>,
    formatter: Box<dyn ReleaseFormatter>,
    config: ChangelogConfig,
    repo_url: Option<String>,
    include_all: bool,
}

impl<R: TagResolver> ChangelogGenerator<R> {
    /// Create a generator with the default parser and template formatter
    pub fn new(resolver: R, config: ChangelogConfig) -> Result<Self> {
        let formatter = TemplateFormatter::new(&config)?;

        Ok(Self {
            resolver,
            limiter: QueryLimiter::default(),
            parser: Box::new(ConventionalParser::new()),
            formatter: Box::new(formatter),
            repo_url: config.repo_url.clone(),
            config,
            include_all: false,
        })
    }

    /// Set how many tag lookups may run at once
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limiter = QueryLimiter::new(limit);
        self
    }

    /// Use a custom parser
    pub fn with_parser<P: CommitParser + 'static>(mut self, parser: P) -> Self {
        self.parser = Box::new(parser);
        self
    }

    /// Use a custom formatter
    pub fn with_formatter<F: ReleaseFormatter + 'static>(mut self, formatter: F) -> Self {
        self.formatter = Box::new(formatter);
        self
    }

    /// Set the repository URL used for links when none is configured
    pub fn with_repo_url(mut self, url: impl Into<String>) -> Self {
        if self.repo_url.is_none() {
            self.repo_url = Some(url.into());
        }
        self
    }

    /// Keep every commit instead of filtering by type
    pub fn include_all(mut self, include_all: bool) -> Self {
        self.include_all = include_all;
        self
    }

    /// The limiter bounding tag lookups
    pub fn limiter(&self) -> &QueryLimiter {
        &self.limiter
    }

    /// Parse commit records
    pub fn parse(&self, records: &[CommitRecord]) -> Vec<Commit> {
        records.iter().map(|r| self.parser.parse(r)).collect()
    }

    /// Build the changelog from commit records, newest first
    #[instrument(skip(self, records), fields(records = records.len()))]
    pub async fn generate(&self, records: &[CommitRecord]) -> Result<Changelog> {
        let commits = self.parse(records);
        let commits = if self.include_all {
            commits
        } else {
            filter_commits(commits, &self.config.include_types)
        };

        let resolved = resolve_tags(commits, &self.resolver, &self.limiter).await?;
        let groups = group_by_tag(resolved);
        let ordered = order_tags(groups.keys().cloned());

        let options = RenderOptions {
            repo_url: self.repo_url.clone(),
            unreleased_label: self.config.unreleased_label.clone(),
        };
        let changelog = render_releases(&ordered, groups, self.formatter.as_ref(), &options)?;

        info!(
            releases = changelog.releases.len(),
            commits = changelog.commit_count(),
            "Generated changelog"
        );
        Ok(changelog)
    }
}
