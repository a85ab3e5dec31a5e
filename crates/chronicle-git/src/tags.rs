//! Tag containment queries

use async_trait::async_trait;
use tracing::{debug, instrument};

use chronicle_core::error::GitError;
use chronicle_core::ReleaseTag;

use crate::cli::{command_line, GitCli};
use crate::repository::Result;

/// stderr prefixes git uses when no tag contains a commit
const NOT_DESCRIBED: [&str; 2] = ["fatal: cannot describe", "fatal: No tags can describe"];

/// Finds the release tag that first contains a commit
#[async_trait]
pub trait TagResolver: Send + Sync {
    /// Resolve the tag containing `hash`.
    ///
    /// Returns `Some(ReleaseTag::Unreleased)` when no tag contains the commit,
    /// `None` when the containing tag is not a version tag, and an error
    /// when the lookup itself failed.
    async fn resolve(&self, hash: &str) -> Result<Option<ReleaseTag>>;
}

#[async_trait]
impl TagResolver for GitCli {
    #[instrument(skip(self))]
    async fn resolve(&self, hash: &str) -> Result<Option<ReleaseTag>> {
        let args = ["describe", "--contains", hash];
        let output = self.run(&args).await?;
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);

        let tag = classify_describe(
            &command_line(&args),
            output.status.success(),
            &stdout,
            &stderr,
        )?;
        debug!(hash, raw = stdout.trim(), tag = ?tag, "resolved containing tag");
        Ok(tag)
    }
}

/// Interpret the outcome of `git describe --contains`.
///
/// "cannot describe" and "No tags can describe" on stderr mean no tag
/// contains the commit yet, whatever the exit status. Any other stderr
/// output, or a failing status, is an error carrying `command`. Otherwise
/// stdout names the containing tag.
pub fn classify_describe(
    command: &str,
    success: bool,
    stdout: &str,
    stderr: &str,
) -> Result<Option<ReleaseTag>> {
    let stderr = stderr.trim();

    if NOT_DESCRIBED.iter().any(|prefix| stderr.starts_with(prefix)) {
        return Ok(Some(ReleaseTag::Unreleased));
    }

    if !success || !stderr.is_empty() {
        return Err(GitError::CommandFailed {
            command: command.to_string(),
            stderr: stderr.to_string(),
        });
    }

    Ok(parse_describe_output(stdout))
}

/// Extract the tag from `git describe --contains` output.
///
/// The output names the tag followed by an optional path from it
/// (`v1.2.0~3`, `v1.2.0^2~1`); only the part before the first `~` or `^` is
/// the tag. Returns `None` when that part is not a version.
pub fn parse_describe_output(stdout: &str) -> Option<ReleaseTag> {
    let candidate = stdout.split(['~', '^']).next().unwrap_or_default();
    ReleaseTag::parse(candidate)
}
