//! Locating the repository a changelog is built from

use std::path::{Path, PathBuf};

use git2::{ErrorCode, Repository};
use tracing::{debug, instrument};

use chronicle_core::error::GitError;

use crate::cli::GitCli;

/// Result type for git operations
pub type Result<T> = std::result::Result<T, GitError>;

/// An opened repository and the directory `git` commands run in.
///
/// libgit2 is only used for lookups that need no process (remotes); the
/// commit log and tag queries go through [`GitCli`].
pub struct GitRepo {
    pub(crate) repo: Repository,
    root: PathBuf,
}

impl GitRepo {
    /// Find the repository containing `start`, walking up parent directories
    #[instrument(fields(start = %start.display()))]
    pub fn discover(start: &Path) -> Result<Self> {
        let repo = Repository::discover(start).map_err(|e| match e.code() {
            ErrorCode::NotFound => GitError::NotARepository(start.to_path_buf()),
            _ => GitError::OpenFailed(e.to_string()),
        })?;

        // bare repositories have no working tree; run git in the git dir
        let root = repo.workdir().unwrap_or_else(|| repo.path()).to_path_buf();
        debug!(root = %root.display(), "found repository");

        Ok(Self { repo, root })
    }

    /// Working tree root; configured output paths resolve against it
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// A `git` command runner rooted at this repository
    pub fn cli(&self) -> Result<GitCli> {
        GitCli::new(&self.root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_discover_from_subdirectory() {
        let temp = TempDir::new().unwrap();
        Repository::init(temp.path()).unwrap();

        let subdir = temp.path().join("docs").join("notes");
        std::fs::create_dir_all(&subdir).unwrap();

        let repo = GitRepo::discover(&subdir).unwrap();
        // canonicalize for the macOS /var -> /private/var symlink
        assert_eq!(
            repo.path().canonicalize().unwrap(),
            temp.path().canonicalize().unwrap()
        );
    }

    #[test]
    fn test_discover_bare_repository_uses_git_dir() {
        let temp = TempDir::new().unwrap();
        Repository::init_bare(temp.path()).unwrap();

        let repo = GitRepo::discover(temp.path()).unwrap();
        assert_eq!(
            repo.path().canonicalize().unwrap(),
            temp.path().canonicalize().unwrap()
        );
    }

    #[test]
    fn test_discover_outside_repository() {
        let temp = TempDir::new().unwrap();
        let result = GitRepo::discover(temp.path());
        assert!(matches!(result, Err(GitError::NotARepository(_))));
    }
}
