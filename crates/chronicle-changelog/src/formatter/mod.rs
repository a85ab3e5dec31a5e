//! Release formatting
//!
//! A [`ReleaseFormatter`] turns the commits of one release into a document
//! fragment. The default implementation, [`TemplateFormatter`], passes each
//! commit through a [`CommitTransform`] and renders a Markdown template.

mod template;
mod transform;

pub use template::{TemplateFormatter, DEFAULT_COMPARE_URL, DEFAULT_TEMPLATE};
pub use transform::{CommitTransform, CommitView, DisplayTransform, NoteView, ReferenceView};

use chronicle_core::Result;

use crate::types::Commit;

/// What a formatter knows about the release being rendered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseContext {
    /// Heading label: the tag name, or the unreleased label
    pub version: String,
    /// Repository URL for commit, issue and compare links
    pub repo_url: Option<String>,
    /// Whether a compare link to the previous release should be rendered
    pub link_compare: bool,
    /// Tag of the next older release
    pub previous_tag: Option<String>,
    /// Tag of this release
    pub current_tag: String,
    /// Release date (`YYYY-MM-DD`)
    pub date: Option<String>,
}

/// Renders the commits of one release
pub trait ReleaseFormatter: Send + Sync {
    /// Render `commits` (newest first) as a document fragment
    fn format(&self, commits: &[Commit], release: &ReleaseContext) -> Result<String>;
}
