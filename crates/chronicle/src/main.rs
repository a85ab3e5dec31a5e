//! Chronicle - Changelog generator driven by git history

mod cli;
mod exit_codes;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use chronicle_core::error::GitError;
use chronicle_core::ChronicleError;

use cli::Cli;

fn main() {
    let cli = Cli::parse();
    let _guard = init_tracing(cli.verbose);

    if let Err(err) = cli.execute() {
        tracing::error!(error = %err, "command failed");
        cli::output::error(&format!("{:#}", err));
        std::process::exit(exit_code(&err));
    }
}

/// Map an error to the process exit code
fn exit_code(err: &anyhow::Error) -> i32 {
    let git_failure = err.downcast_ref::<GitError>().is_some()
        || err
            .downcast_ref::<ChronicleError>()
            .is_some_and(ChronicleError::is_git);

    if git_failure {
        exit_codes::GIT_ERROR
    } else {
        exit_codes::ERROR
    }
}

/// Set up tracing with two layers:
/// - Console: controlled by RUST_LOG (default: warn, or debug with --verbose)
/// - File: always debug-level JSON to ~/.chronicle/logs/
fn init_tracing(verbose: bool) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let default_level = if verbose { "debug" } else { "warn" };
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    if let Some(log_dir) = log_directory() {
        let file_appender = tracing_appender::rolling::daily(&log_dir, "chronicle.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .with_filter(console_filter),
            )
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(non_blocking)
                    .with_target(true)
                    .with_filter(EnvFilter::new("debug")),
            )
            .init();

        return Some(guard);
    }

    // Fallback: console only
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .with_filter(console_filter),
        )
        .init();

    None
}

/// Returns the log directory path, creating it if needed.
fn log_directory() -> Option<std::path::PathBuf> {
    let log_dir = dirs::home_dir()?.join(".chronicle").join("logs");
    std::fs::create_dir_all(&log_dir).ok()?;
    Some(log_dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_errors_map_to_git_exit_code() {
        let err = anyhow::Error::from(GitError::RemoteNotFound("origin".to_string()));
        assert_eq!(exit_code(&err), exit_codes::GIT_ERROR);

        let err = anyhow::Error::from(ChronicleError::from(GitError::CommandFailed {
            command: "git log".to_string(),
            stderr: "fatal".to_string(),
        }));
        assert_eq!(exit_code(&err), exit_codes::GIT_ERROR);
    }

    #[test]
    fn test_other_errors_map_to_generic_exit_code() {
        let err = anyhow::anyhow!("something else");
        assert_eq!(exit_code(&err), exit_codes::ERROR);
    }
}
