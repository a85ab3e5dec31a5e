//! `git` executable runner

use std::path::{Path, PathBuf};
use std::process::{Output, Stdio};

use tokio::process::Command;
use tracing::{debug, instrument};

use chronicle_core::error::GitError;

use crate::repository::Result;

/// Runs `git` subcommands inside a repository working directory.
///
/// Cheap to clone and safe to share between concurrent queries; each call
/// spawns its own process.
#[derive(Debug, Clone)]
pub struct GitCli {
    program: PathBuf,
    workdir: PathBuf,
}

impl GitCli {
    /// Locate `git` on `PATH` and run it in `workdir`
    pub fn new(workdir: &Path) -> Result<Self> {
        let program =
            which::which("git").map_err(|e| GitError::ExecutableNotFound(e.to_string()))?;
        Ok(Self::with_program(program, workdir))
    }

    /// Use an explicit git executable
    pub fn with_program(program: impl Into<PathBuf>, workdir: &Path) -> Self {
        Self {
            program: program.into(),
            workdir: workdir.to_path_buf(),
        }
    }

    /// Run `git <args>` and capture its output.
    ///
    /// Only a failure to spawn is an error here; exit status and stderr are
    /// left to the caller to interpret. Messages are forced to the C locale
    /// so stderr can be matched.
    #[instrument(skip(self), fields(workdir = %self.workdir.display()))]
    pub async fn run(&self, args: &[&str]) -> Result<Output> {
        let output = Command::new(&self.program)
            .args(args)
            .current_dir(&self.workdir)
            .env("LC_ALL", "C")
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|source| GitError::SpawnFailed {
                command: command_line(args),
                source,
            })?;

        debug!(
            status = ?output.status.code(),
            stdout_len = output.stdout.len(),
            stderr_len = output.stderr.len(),
            "git command finished"
        );
        Ok(output)
    }
}

/// Human-readable form of a git invocation, used in error messages
pub(crate) fn command_line(args: &[&str]) -> String {
    format!("git {}", args.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_command_line() {
        assert_eq!(
            command_line(&["describe", "--contains", "abc1234"]),
            "git describe --contains abc1234"
        );
    }

    #[tokio::test]
    async fn test_missing_program_is_spawn_error() {
        let temp = TempDir::new().unwrap();
        let cli = GitCli::with_program(temp.path().join("no-such-git"), temp.path());

        let result = cli.run(&["status"]).await;
        assert!(matches!(result, Err(GitError::SpawnFailed { .. })));
    }
}
