//! Chronicle Changelog - Release grouping and changelog rendering
//!
//! The pipeline parses commit records, filters them by type, resolves the
//! release tag of each commit under a concurrency limit, groups commits per
//! release, orders the releases by version and folds them into one document,
//! newest release first. The document can then be written as Markdown, HTML
//! or wiki markup.

pub mod filter;
pub mod formatter;
pub mod generator;
pub mod limiter;
pub mod ordering;
pub mod output;
pub mod parser;
pub mod renderer;
pub mod resolve;
pub mod types;

pub use filter::{filter_commits, group_by_tag};
pub use formatter::{
    CommitTransform, DisplayTransform, ReleaseContext, ReleaseFormatter, TemplateFormatter,
};
pub use generator::ChangelogGenerator;
pub use limiter::QueryLimiter;
pub use ordering::order_tags;
pub use output::{OutputDispatcher, OutputFormat};
pub use parser::{CommitParser, ConventionalParser};
pub use renderer::{render_releases, RenderOptions};
pub use resolve::resolve_tags;
pub use types::{Changelog, Commit, Note, Reference, Release, ReleaseGroups};
