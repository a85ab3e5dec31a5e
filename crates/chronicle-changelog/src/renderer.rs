//! Sequential release rendering

use tracing::{debug, instrument};

use chronicle_core::{ReleaseTag, Result};

use crate::formatter::{ReleaseContext, ReleaseFormatter};
use crate::types::{Changelog, Commit, Release, ReleaseGroups};

/// Settings shared by every release of one run
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Repository URL for links
    pub repo_url: Option<String>,
    /// Heading for the unreleased section
    pub unreleased_label: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            repo_url: None,
            unreleased_label: "Unreleased".to_string(),
        }
    }
}

/// Render releases oldest to newest, prepending each fragment so the
/// finished document lists the newest release first.
///
/// Each release after the first knows the tag rendered before it, which
/// feeds the compare link. Tags in `ordered` without commits are skipped.
#[instrument(skip_all, fields(releases = ordered.len()))]
pub fn render_releases(
    ordered: &[ReleaseTag],
    mut groups: ReleaseGroups,
    formatter: &dyn ReleaseFormatter,
    options: &RenderOptions,
) -> Result<Changelog> {
    let initial = (
        Changelog {
            document: String::new(),
            releases: Vec::new(),
        },
        None::<ReleaseTag>,
    );

    let (changelog, _) = ordered
        .iter()
        .try_fold(initial, |(mut changelog, previous), tag| -> Result<_> {
            let Some(mut commits) = groups.remove(tag) else {
                return Ok((changelog, previous));
            };
            commits.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

            let context = release_context(tag, previous.as_ref(), &commits, options);
            let fragment = formatter.format(&commits, &context)?;
            debug!(version = %context.version, commits = commits.len(), "Rendered release");

            changelog.document.insert_str(0, &fragment);
            changelog.releases.insert(
                0,
                Release {
                    tag: tag.clone(),
                    previous_tag: previous,
                    commits,
                },
            );

            Ok((changelog, Some(tag.clone())))
        })?;

    Ok(changelog)
}

fn release_context(
    tag: &ReleaseTag,
    previous: Option<&ReleaseTag>,
    commits: &[Commit],
    options: &RenderOptions,
) -> ReleaseContext {
    let version = match tag {
        ReleaseTag::Unreleased => options.unreleased_label.clone(),
        ReleaseTag::Version { name, .. } => name.clone(),
    };

    ReleaseContext {
        version,
        repo_url: options.repo_url.clone(),
        link_compare: previous.is_some() && !tag.is_unreleased(),
        previous_tag: previous.map(|t| t.name().to_string()),
        current_tag: tag.name().to_string(),
        // Commits are newest first
        date: commits.first().and_then(Commit::date),
    }
}
